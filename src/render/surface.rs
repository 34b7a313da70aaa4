use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 0.0 transparent .. 1.0 opaque
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 1.0 }
    }

    pub const fn grey(level: u8) -> Self {
        Rgba::rgb(level, level, level)
    }

    pub fn with_alpha(self, alpha: u8) -> Self {
        Rgba {
            a: f64::from(alpha) / 255.0,
            ..self
        }
    }
}

impl From<(u8, u8, u8)> for Rgba {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgba::rgb(r, g, b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: Rgba,
    pub h_align: HAlign,
    pub v_align: VAlign,
    /// Clockwise rotation in quarter turns.
    pub quarter_turns: u8,
}

impl TextStyle {
    pub fn new(size: f64, color: Rgba) -> Self {
        TextStyle {
            size,
            color,
            h_align: HAlign::Left,
            v_align: VAlign::Bottom,
            quarter_turns: 0,
        }
    }

    pub fn align(mut self, h_align: HAlign, v_align: VAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    pub fn rotated(mut self, quarter_turns: u8) -> Self {
        self.quarter_turns = quarter_turns % 4;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: u32,
}

/// Direct-mode drawing target. Coordinates are pixels, origin top left,
/// y growing downwards.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear(&mut self, color: Rgba) -> Result<()>;
    fn draw_polyline(&mut self, points: &[(f64, f64)], stroke: Stroke) -> Result<()>;
    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) -> Result<()>;
    /// Filled rectangle with its top-left corner at `(x, y)`.
    fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: Rgba) -> Result<()>;
}

/// Linear map of `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Not clamped. An empty input range maps everything to `out_min`.
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    let t = (value - in_min) / span;
    if t == 1.0 {
        return out_max;
    }
    out_min + t * (out_max - out_min)
}
