//! Static block image catalog: manifest loading, directory scan, search, labels.
#![forbid(unsafe_code)]

pub mod catalog;
pub mod label;
pub mod search;

pub use catalog::{Catalog, CatalogEntry, ImageResource};
pub use label::label;
pub use search::SearchQuery;
