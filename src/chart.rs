//! Two-panel release year chart.
//!
//! The upper panel shows one bar per year across the whole observed range,
//! empty years included; the lower panel shows one bar per decade present.

use std::{ops::Range, path::Path};

use plotters::{coord::Shift, prelude::*};

use crate::{
    error::{Error, Result},
    types::NormalizedRecord,
    utils,
};

pub const CHART_SIZE: (u32, u32) = (1500, 1200);

const FONT: &str = "sans-serif";
const YEAR_COLOR: RGBColor = RGBColor(0, 128, 0);
const DECADE_COLOR: RGBColor = RGBColor(135, 206, 235);

type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Renders the histograms of `records` into a PNG at `path`, replacing any existing file.
///
/// `total_songs` is printed in the title.
pub fn render(records: &[NormalizedRecord], total_songs: usize, path: &Path) -> Result<()> {
    let years = utils::year_histogram(records);
    let decades = utils::decade_histogram(records);
    if years.is_empty() {
        return Err(Error::NoData);
    }

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let body = root
        .titled(
            &format!("Spotify Playlist Analysis (Total Songs: {})", total_songs),
            (FONT, 40.0),
        )
        .map_err(render_err)?;

    let panels = body.split_evenly((2, 1));
    draw_year_panel(&panels[0], &years)?;
    draw_decade_panel(&panels[1], &decades)?;

    root.present().map_err(render_err)?;
    Ok(())
}

fn draw_year_panel(area: &Panel<'_>, years: &[(i32, u32)]) -> Result<()> {
    let axis = year_axis(years).ok_or(Error::NoData)?;
    let max = axis.end;

    let mut chart = ChartBuilder::on(area)
        .caption("Spotify Playlist – Songs by Release Year", (FONT, 24.0))
        .margin(15)
        .x_label_area_size(70)
        .y_label_area_size(60)
        .build_cartesian_2d(axis.into_segmented(), 0u32..y_limit(years))
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(years.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(year) if *year <= max => year.to_string(),
            _ => String::new(),
        })
        .x_label_style((FONT, 12.0).into_font().transform(FontTransform::Rotate90))
        .x_desc("Year")
        .y_desc("Number of Songs")
        .axis_desc_style((FONT, 16.0))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(YEAR_COLOR.filled())
                .margin(2)
                .data(years.iter().map(|(year, count)| (*year, *count))),
        )
        .map_err(render_err)?;

    Ok(())
}

// Decades are plotted on an index axis so only decades with songs get a slot.
fn draw_decade_panel(area: &Panel<'_>, decades: &[(i32, u32)]) -> Result<()> {
    let axis = decade_axis(decades).ok_or(Error::NoData)?;

    let mut chart = ChartBuilder::on(area)
        .caption("Spotify Playlist – Songs by Decade", (FONT, 24.0))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(axis.into_segmented(), 0u32..y_limit(decades))
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(decades.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(idx) if *idx >= 0 => decades
                .get(*idx as usize)
                .map(|(decade, _)| decade.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc("Decade")
        .y_desc("Number of Songs")
        .axis_desc_style((FONT, 16.0))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(DECADE_COLOR.filled())
                .margin(10)
                .data(
                    decades
                        .iter()
                        .enumerate()
                        .map(|(idx, (_, count))| (idx as i32, *count)),
                ),
        )
        .map_err(render_err)?;

    Ok(())
}

// Integer ranges are inclusive once segmented: `a..b` yields one slot per value in a..=b.
fn year_axis(years: &[(i32, u32)]) -> Option<Range<i32>> {
    Some(years.first()?.0..years.last()?.0)
}

fn decade_axis(decades: &[(i32, u32)]) -> Option<Range<i32>> {
    let last = decades.len().checked_sub(1)?;
    Some(0..last as i32)
}

fn y_limit(histogram: &[(i32, u32)]) -> u32 {
    histogram.iter().map(|(_, count)| *count).max().unwrap_or(0) + 1
}

fn render_err<E: std::fmt::Display>(err: E) -> Error {
    Error::Render(err.to_string())
}
