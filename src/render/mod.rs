//! Presenters for a composed [`RenderGrid`](crate::tiles::RenderGrid).

pub mod terminal;
#[cfg(feature = "window")]
pub mod window;

use std::error::Error;
use std::io::Write;

use crate::tiles::RenderGrid;

pub fn write_json(out: &mut impl Write, grid: &RenderGrid) -> Result<(), Box<dyn Error>> {
    serde_json::to_writer_pretty(&mut *out, grid)?;
    writeln!(out)?;
    Ok(())
}
