pub mod chart;
pub mod layout;
pub mod surface;
pub mod svg;

pub use chart::render_frame;
pub use layout::Layout;
pub use surface::{map_range, Rgba, Surface};
pub use svg::SvgSurface;

use crate::board::BoardSnapshot;
use crate::error::Result;

/// Renders one frame of the given size to an SVG document.
pub fn render_svg(snapshot: &BoardSnapshot, dates: &[String], width: u32, height: u32) -> Result<String> {
    let mut buffer = String::new();
    {
        let mut surface = SvgSurface::new(&mut buffer, width, height);
        render_frame(&mut surface, snapshot, dates)?;
        surface.finish()?;
    }
    Ok(buffer)
}
