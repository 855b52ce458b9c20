//! Chance parsing, weight normalization, weighted sampling, and the fallback palette.
#![forbid(unsafe_code)]

pub mod chance;
pub mod group;
pub mod normalize;
pub mod palette;
pub mod sample;

pub use chance::Chance;
pub use group::BlockGroup;
pub use normalize::{Normalized, ResolvedGroup, normalize};
pub use palette::{Palette, Rgb};
pub use sample::{WeightedPool, pass_rng, sample};
