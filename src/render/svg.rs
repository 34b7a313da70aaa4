use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontFamily, FontTransform, RGBAColor};

use super::surface::{HAlign, Rgba, Stroke, Surface, TextStyle, VAlign};
use crate::error::{AppError, Result};

/// A [`Surface`] that writes SVG into a caller-owned string.
pub struct SvgSurface<'a> {
    area: DrawingArea<SVGBackend<'a>, Shift>,
    width: u32,
    height: u32,
}

impl<'a> SvgSurface<'a> {
    pub fn new(buffer: &'a mut String, width: u32, height: u32) -> Self {
        let area = SVGBackend::with_string(buffer, (width, height)).into_drawing_area();
        SvgSurface { area, width, height }
    }

    /// Flushes the document into the buffer.
    pub fn finish(self) -> Result<()> {
        self.area.present().map_err(render_error)
    }
}

fn render_error<E: std::fmt::Display>(err: E) -> AppError {
    AppError::RenderError(err.to_string())
}

fn color(c: Rgba) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, c.a)
}

/// plotters' SVG backend writes `font-size` as the font size divided by this.
const SVG_FONT_SCALE: f64 = 1.24;

fn pixel(v: f64) -> i32 {
    v.round() as i32
}

fn text_style(style: TextStyle) -> plotters::style::TextStyle<'static> {
    let h_pos = match style.h_align {
        HAlign::Left => HPos::Left,
        HAlign::Center => HPos::Center,
        HAlign::Right => HPos::Right,
    };
    let v_pos = match style.v_align {
        VAlign::Top => VPos::Top,
        VAlign::Center => VPos::Center,
        VAlign::Bottom => VPos::Bottom,
    };
    let transform = match style.quarter_turns {
        1 => FontTransform::Rotate90,
        2 => FontTransform::Rotate180,
        3 => FontTransform::Rotate270,
        _ => FontTransform::None,
    };

    (FontFamily::SansSerif, style.size * SVG_FONT_SCALE)
        .into_font()
        .transform(transform)
        .color(&color(style.color))
        .pos(Pos::new(h_pos, v_pos))
}

impl Surface for SvgSurface<'_> {
    fn width(&self) -> f64 {
        f64::from(self.width)
    }

    fn height(&self) -> f64 {
        f64::from(self.height)
    }

    fn clear(&mut self, c: Rgba) -> Result<()> {
        self.area.fill(&color(c)).map_err(render_error)
    }

    fn draw_polyline(&mut self, points: &[(f64, f64)], stroke: Stroke) -> Result<()> {
        if points.len() < 2 {
            return Ok(());
        }
        let path: Vec<(i32, i32)> = points.iter().map(|&(x, y)| (pixel(x), pixel(y))).collect();
        let style = ShapeStyle::from(&color(stroke.color)).stroke_width(stroke.width);
        self.area
            .draw(&PathElement::new(path, style))
            .map_err(render_error)
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) -> Result<()> {
        self.area
            .draw(&Text::new(text.to_string(), (pixel(x), pixel(y)), text_style(style)))
            .map_err(render_error)
    }

    fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: Rgba) -> Result<()> {
        let corners = [(pixel(x), pixel(y)), (pixel(x + w), pixel(y + h))];
        self.area
            .draw(&Rectangle::new(corners, color(fill).filled()))
            .map_err(render_error)
    }
}
