use chrono::NaiveDate;

use super::layout::{Layout, MAX_TIME, MIN_TIME, TIME_STEP};
use super::surface::{HAlign, Rgba, Stroke, Surface, TextStyle, VAlign};
use crate::board::{BoardSnapshot, CitySeries};
use crate::error::Result;
use crate::model::{LISBON, LONDON};

pub const TITLE: &str = "Sunsets in London and Lisbon";
pub const LOADING: &str = "Loading...";

const BACKGROUND: Rgba = Rgba::grey(240);
const INK: Rgba = Rgba::grey(0);

/// One display refresh: the chart once every city has loaded, a loading
/// placeholder before that.
pub fn render_frame<S: Surface>(surface: &mut S, snapshot: &BoardSnapshot, dates: &[String]) -> Result<()> {
    surface.clear(BACKGROUND)?;

    if !snapshot.is_ready() {
        return draw_loading(surface);
    }

    let layout = Layout::new(surface.width(), surface.height(), dates.len());
    draw_graph_base(surface, &layout, dates)?;
    // London is drawn last so it sits on top
    for name in [LISBON.name, LONDON.name] {
        if let Some(series) = snapshot.series_for(name) {
            draw_city_graph(surface, &layout, series)?;
        }
    }
    Ok(())
}

fn draw_loading<S: Surface>(surface: &mut S) -> Result<()> {
    let (x, y) = (surface.width() / 2.0, surface.height() / 2.0);
    surface.draw_text(
        LOADING,
        x,
        y,
        TextStyle::new(30.0, INK).align(HAlign::Center, VAlign::Bottom),
    )
}

/// Plots one city's sunsets and tags every point after the first with its
/// raw time.
pub fn draw_city_graph<S: Surface>(surface: &mut S, layout: &Layout, series: &CitySeries) -> Result<()> {
    let count = series.sunsets.len();
    let points: Vec<(f64, f64)> = series
        .sunsets
        .iter()
        .enumerate()
        .map(|(i, sunset)| (layout.point_x(i, count), layout.time_y(sunset.seconds_since_midnight())))
        .collect();

    surface.draw_polyline(
        &points,
        Stroke {
            color: series.city.color.into(),
            width: 2,
        },
    )?;

    if !layout.shows_point_labels() {
        return Ok(());
    }
    let label_style = TextStyle::new(8.0, Rgba::grey(230)).align(HAlign::Left, VAlign::Bottom);
    for (&(x, y), sunset) in points.iter().zip(&series.sunsets).skip(1) {
        surface.draw_rect(x + 5.0, y - 15.0, 55.0, 17.0, Rgba::grey(90).with_alpha(220))?;
        surface.draw_text(sunset.raw(), x + 12.0, y - 7.0, label_style)?;
    }
    Ok(())
}

/// Title, legend, hourly axis and one labelled grid line per date.
pub fn draw_graph_base<S: Surface>(surface: &mut S, layout: &Layout, dates: &[String]) -> Result<()> {
    let (w, h) = (layout.width, layout.height);

    surface.draw_text(
        TITLE,
        w / 2.0,
        h * 0.05,
        TextStyle::new(16.0, INK).align(HAlign::Center, VAlign::Bottom),
    )?;

    let legend_style = TextStyle::new(10.0, INK).align(HAlign::Center, VAlign::Center);
    for (city, row) in [(LONDON, 0.95), (LISBON, 0.97)] {
        let y = h * row;
        surface.draw_rect(w / 2.0 - 45.0, y - 5.0, 20.0, 10.0, city.color.into())?;
        surface.draw_text(city.name, w / 2.0 * 1.025, y, legend_style)?;
    }

    let tick = Stroke { color: INK, width: 1 };
    let axis_style = TextStyle::new(8.0, INK).align(HAlign::Right, VAlign::Center);
    for time in (MIN_TIME..=MAX_TIME).step_by(TIME_STEP as usize) {
        let y = layout.time_y(time);
        surface.draw_polyline(&[(layout.col_width, y), (layout.col_width + 10.0, y)], tick)?;
        surface.draw_text(&format!("{} PM", time / 3600), layout.col_width - 10.0, y, axis_style)?;
    }

    let date_style = TextStyle::new(8.0, INK).align(HAlign::Left, VAlign::Top).rotated(1);
    for (i, date) in dates.iter().enumerate() {
        let x = layout.point_x(i, dates.len());
        surface.draw_polyline(&[(x, layout.chart_height), (x, layout.chart_top)], tick)?;
        surface.draw_text(&date_label(date), x, layout.chart_height + 10.0, date_style)?;
    }
    Ok(())
}

/// `2022-08-06` becomes `Aug 06 2022`; anything unparseable is shown as is.
pub fn date_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%b %d %Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}
