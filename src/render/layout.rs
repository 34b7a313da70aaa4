use super::surface::map_range;

/// Earliest time on the vertical axis, 3:00:00 on the dial.
pub const MIN_TIME: u32 = 10_800;
/// Latest time on the vertical axis, 8:00:00 on the dial.
pub const MAX_TIME: u32 = 28_800;
pub const TIME_STEP: u32 = 3_600;
/// Narrower canvases skip the per-point time labels.
pub const LABEL_MIN_WIDTH: f64 = 490.0;

/// Geometry of one frame, derived from the canvas size and the date count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub col_width: f64,
    pub chart_height: f64,
    pub chart_top: f64,
}

impl Layout {
    pub fn new(width: f64, height: f64, date_count: usize) -> Self {
        // two spare columns leave room either side of the chart
        let col_width = width / (date_count + 2) as f64;
        let chart_height = height * 0.8;
        Layout {
            width,
            height,
            col_width,
            chart_height,
            chart_top: (height - chart_height) / 2.0,
        }
    }

    pub fn point_x(&self, index: usize, count: usize) -> f64 {
        map_range(index as f64, 0.0, count as f64, self.col_width, self.width)
    }

    /// Later times sit higher up the chart.
    pub fn time_y(&self, seconds: u32) -> f64 {
        map_range(
            f64::from(seconds),
            f64::from(MIN_TIME),
            f64::from(MAX_TIME),
            self.chart_height,
            self.col_width,
        )
    }

    pub fn shows_point_labels(&self) -> bool {
        self.width > LABEL_MIN_WIDTH
    }
}
