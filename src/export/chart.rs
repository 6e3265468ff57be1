use crate::error::EncodingError;
use crate::export::snapshot::Snapshot;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use plotters::prelude::*;
use std::fmt::Display;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

// Slice/bar colors, cycled when a poll has more options than entries.
const PALETTE: [RGBColor; 8] = [
    RGBColor(66, 133, 244),
    RGBColor(219, 68, 55),
    RGBColor(244, 180, 0),
    RGBColor(15, 157, 88),
    RGBColor(171, 71, 188),
    RGBColor(0, 172, 193),
    RGBColor(255, 112, 67),
    RGBColor(158, 157, 36),
];

fn slice_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

fn draw_error(e: impl Display) -> EncodingError {
    EncodingError::Chart(e.to_string())
}

/// Proportion chart: each option's share of the total vote count.
///
/// A poll with no options, or with no votes at all, is rejected: neither
/// has a defined slice layout.
pub fn render_pie(snapshot: &Snapshot) -> Result<Vec<u8>, EncodingError> {
    if snapshot.options.is_empty() {
        return Err(EncodingError::NoOptions);
    }
    let counts = snapshot.vote_counts();
    if counts.iter().sum::<u32>() == 0 {
        return Err(EncodingError::NoVotes);
    }

    let sizes: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
    let labels = snapshot.option_labels();
    let colors: Vec<RGBColor> = (0..sizes.len()).map(slice_color).collect();

    let mut rgb = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut rgb, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;
        let root = root
            .titled(&snapshot.title, ("sans-serif", 28))
            .map_err(draw_error)?;

        let (w, h) = root.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);
        let radius = f64::from(w.min(h)) * 0.35;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.label_style(("sans-serif", 16).into_font().color(&BLACK));
        root.draw(&pie).map_err(draw_error)?;
        root.present().map_err(draw_error)?;
    }

    encode_png(&rgb)
}

/// Magnitude chart: one bar per option, bar height = vote count.
///
/// Unlike the pie, an all-zero poll still has a defined rendering here
/// (every bar at zero), so only the no-options case is rejected.
pub fn render_bar(snapshot: &Snapshot) -> Result<Vec<u8>, EncodingError> {
    if snapshot.options.is_empty() {
        return Err(EncodingError::NoOptions);
    }
    let counts = snapshot.vote_counts();
    let labels = snapshot.option_labels();
    let bars = counts.len() as u32;
    let y_max = counts.iter().max().copied().unwrap_or(0) + 1;

    let mut rgb = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut rgb, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&snapshot.title, ("sans-serif", 28))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(40)
            .build_cartesian_2d((0u32..bars).into_segmented(), 0u32..y_max)
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Options")
            .y_desc("No. of Votes")
            .axis_desc_style(("sans-serif", 16))
            .x_label_formatter(&|segment| match segment {
                SegmentValue::CenterOf(i) => {
                    labels.get(*i as usize).cloned().unwrap_or_default()
                }
                _ => String::new(),
            })
            .draw()
            .map_err(draw_error)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(slice_color(0).filled())
                    .margin(12)
                    .data(counts.iter().enumerate().map(|(i, &c)| (i as u32, c))),
            )
            .map_err(draw_error)?;

        root.present().map_err(draw_error)?;
    }

    encode_png(&rgb)
}

fn encode_png(rgb: &[u8]) -> Result<Vec<u8>, EncodingError> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(rgb, WIDTH, HEIGHT, ColorType::Rgb8)?;
    Ok(png)
}
