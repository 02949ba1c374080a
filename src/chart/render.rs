use anyhow::Result;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};

use super::layout::{axis_max, bar_span, dash_segments, histogram_bins, value_label_y, Unit};
use super::theme::STEEL_BLUE;
use super::{Chart, ChartData, ChartSpec, PlotTheme, Rgb, HISTOGRAM_BINS};
use crate::group::{GroupCount, GroupStats};
use crate::stats::Statistics;
use crate::utils::InsightError;

/// Dashes per reference line
const DASHES: usize = 40;

/// Padding inside the annotation box, in pixels
const BOX_PADDING: i32 = 8;

type CategoryChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Draw one chart to `<output_dir>/<file_name>`, overwriting any previous file
pub fn render_chart(chart: &Chart, output_dir: &Path, theme: &PlotTheme) -> crate::Result<PathBuf> {
    let path = output_dir.join(chart.spec.file_name);
    {
        let root = BitMapBackend::new(&path, theme.pixels(chart.spec.size_in)).into_drawing_area();
        draw_chart(&root, chart, theme)
            .and_then(|()| root.present().map_err(anyhow::Error::from))
            .map_err(|e| InsightError::Chart(format!("{}: {}", path.display(), e)))?;
    }
    Ok(path)
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn font<'a>(theme: &'a PlotTheme, size: f64, style: FontStyle) -> FontDesc<'a> {
    FontDesc::new(FontFamily::from(theme.font_family.as_str()), size, style)
}

fn bar_fill(color: Option<Rgb>, index: usize, count: usize, alpha: f64) -> ShapeStyle {
    match color {
        Some(color) => rgb(color).mix(alpha).filled(),
        // evenly spaced hues, one per bar
        None => HSLColor(index as f64 / count.max(1) as f64, 0.65, 0.55)
            .mix(alpha)
            .filled(),
    }
}

fn draw_chart<DB>(root: &DrawingArea<DB, Shift>, chart: &Chart, theme: &PlotTheme) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let body = root.titled(chart.spec.title, font(theme, theme.title_size, FontStyle::Bold))?;

    match &chart.data {
        ChartData::Histogram {
            values,
            stats,
            unit,
        } => draw_histogram(root, &body, &chart.spec, theme, values, stats, *unit),
        ChartData::Counts {
            entries,
            show_labels,
            reference,
        } => draw_counts(root, &body, &chart.spec, theme, entries, *show_labels, *reference),
        ChartData::Means { groups, unit } => {
            draw_means(root, &body, &chart.spec, theme, groups, *unit)
        }
    }
}

fn draw_histogram<DB>(
    root: &DrawingArea<DB, Shift>,
    area: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    theme: &PlotTheme,
    values: &[f64],
    stats: &Statistics,
    unit: Unit,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let bins = histogram_bins(values, HISTOGRAM_BINS);
    let (x_min, x_max) = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => (first.lower, last.upper),
        _ => return Ok(()),
    };
    let y_max = axis_max(bins.iter().map(|b| b.count as f64));

    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .caption(spec.subtitle, font(theme, theme.label_size, FontStyle::Italic))
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(BLACK.mix(theme.grid_alpha))
        .light_line_style(TRANSPARENT)
        .x_desc(spec.x_label)
        .y_desc(spec.y_label)
        .axis_desc_style(font(theme, theme.label_size, FontStyle::Bold))
        .x_label_formatter(&|v: &f64| format!("{:.0}", v))
        .y_label_formatter(&|v: &f64| format!("{:.0}", v))
        .draw()?;

    let fill = bar_fill(spec.color.or(Some(STEEL_BLUE)), 0, 1, 0.7);
    chart.draw_series(
        bins.iter()
            .map(|b| Rectangle::new([(b.lower, 0.0), (b.upper, b.count as f64)], fill)),
    )?;
    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new(
            [(b.lower, 0.0), (b.upper, b.count as f64)],
            BLACK.stroke_width(1),
        )
    }))?;

    let markers = [
        (stats.mean, theme.mean_line, format!("Mean: {}", unit.format(stats.mean, 1))),
        (
            stats.median,
            theme.median_line,
            format!("Median: {}", unit.format(stats.median, 1)),
        ),
    ];
    for (value, color, label) in markers {
        let style = rgb(color).stroke_width(2);
        chart
            .draw_series(
                dash_segments((value, 0.0), (value, y_max), DASHES)
                    .into_iter()
                    .map(move |segment| PathElement::new(segment.to_vec(), style)),
            )?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(font(theme, theme.annotation_size, FontStyle::Normal))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    let (x_pixels, y_pixels) = chart.plotting_area().get_pixel_range();
    draw_annotation(
        root,
        (x_pixels.start + 10, y_pixels.start + 10),
        &unit.annotation(stats),
        theme,
    )
}

/// Boxed multi-line text anchored at its top-left corner, in pixels
fn draw_annotation<DB>(
    root: &DrawingArea<DB, Shift>,
    origin: (i32, i32),
    lines: &[String],
    theme: &PlotTheme,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let style = TextStyle::from(FontDesc::new(
        FontFamily::Monospace,
        theme.annotation_size,
        FontStyle::Normal,
    ));

    let mut width = 0;
    let mut line_height = 0;
    for line in lines {
        let (w, h) = root.estimate_text_size(line, &style)?;
        width = width.max(w as i32);
        line_height = line_height.max(h as i32 + 4);
    }

    let (x, y) = origin;
    let corner = (
        x + width + 2 * BOX_PADDING,
        y + line_height * lines.len() as i32 + 2 * BOX_PADDING,
    );
    root.draw(&Rectangle::new(
        [(x, y), corner],
        rgb(theme.annotation_fill).mix(0.8).filled(),
    ))?;
    root.draw(&Rectangle::new([(x, y), corner], BLACK.mix(0.5).stroke_width(1)))?;

    for (i, line) in lines.iter().enumerate() {
        let anchor = (x + BOX_PADDING, y + BOX_PADDING + line_height * i as i32);
        root.draw(&Text::new(line.as_str(), anchor, style.clone()))?;
    }

    Ok(())
}

/// Bar chart frame with one slot per category and no numeric x labels
fn category_chart<'a, DB>(
    area: &'a DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    theme: &PlotTheme,
    categories: usize,
    y_max: f64,
) -> Result<CategoryChart<'a, DB>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .caption(spec.subtitle, font(theme, theme.label_size, FontStyle::Italic))
        .x_label_area_size(70)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5..(categories as f64 - 0.5), 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(BLACK.mix(theme.grid_alpha))
        .light_line_style(TRANSPARENT)
        .x_desc(spec.x_label)
        .y_desc(spec.y_label)
        .axis_desc_style(font(theme, theme.label_size, FontStyle::Bold))
        .x_label_formatter(&|_: &f64| String::new())
        .y_label_formatter(&|v: &f64| format!("{:.0}", v))
        .draw()?;

    Ok(chart)
}

/// Category names centred under their bars
fn draw_category_labels<'s, DB, I>(
    root: &DrawingArea<DB, Shift>,
    chart: &CategoryChart<'_, DB>,
    labels: I,
    theme: &PlotTheme,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    I: IntoIterator<Item = &'s str>,
{
    let style = TextStyle::from(font(theme, theme.label_size, FontStyle::Bold))
        .pos(Pos::new(HPos::Center, VPos::Top));
    for (i, label) in labels.into_iter().enumerate() {
        let (x, y) = chart.backend_coord(&(i as f64, 0.0));
        root.draw(&Text::new(label, (x, y + 8), style.clone()))?;
    }
    Ok(())
}

fn draw_counts<DB>(
    root: &DrawingArea<DB, Shift>,
    area: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    theme: &PlotTheme,
    entries: &[GroupCount],
    show_labels: bool,
    reference: Option<f64>,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let n = entries.len();
    let y_max = axis_max(entries.iter().map(|e| e.count as f64).chain(reference));
    let mut chart = category_chart(area, spec, theme, n, y_max)?;

    chart.draw_series(entries.iter().enumerate().map(|(i, e)| {
        let (left, right) = bar_span(i);
        Rectangle::new(
            [(left, 0.0), (right, e.count as f64)],
            bar_fill(spec.color, i, n, theme.bar_alpha),
        )
    }))?;
    chart.draw_series(entries.iter().enumerate().map(|(i, e)| {
        let (left, right) = bar_span(i);
        Rectangle::new([(left, 0.0), (right, e.count as f64)], BLACK.stroke_width(1))
    }))?;

    if show_labels {
        let value_style = TextStyle::from(font(theme, theme.label_size, FontStyle::Bold))
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart.draw_series(entries.iter().enumerate().map(|(i, e)| {
            Text::new(e.count.to_string(), (i as f64, e.count as f64), value_style.clone())
        }))?;
        draw_category_labels(root, &chart, entries.iter().map(|e| e.group.as_str()), theme)?;
    }

    if let Some(average) = reference {
        let style = rgb(theme.mean_line).stroke_width(2);
        chart
            .draw_series(
                dash_segments((-0.5, average), (n as f64 - 0.5, average), DASHES)
                    .into_iter()
                    .map(move |segment| PathElement::new(segment.to_vec(), style)),
            )?
            .label(format!("Average: {:.1} players", average))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font(font(theme, theme.annotation_size, FontStyle::Normal))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(())
}

fn draw_means<DB>(
    root: &DrawingArea<DB, Shift>,
    area: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    theme: &PlotTheme,
    groups: &[GroupStats],
    unit: Unit,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let n = groups.len();
    let offsets = unit.label_offsets();
    let y_max = axis_max(
        groups
            .iter()
            .map(|g| value_label_y(g.mean, g.std, offsets)),
    );
    let mut chart = category_chart(area, spec, theme, n, y_max)?;

    chart.draw_series(groups.iter().enumerate().map(|(i, g)| {
        let (left, right) = bar_span(i);
        Rectangle::new(
            [(left, 0.0), (right, g.mean)],
            bar_fill(spec.color, i, n, theme.bar_alpha),
        )
    }))?;
    chart.draw_series(groups.iter().enumerate().map(|(i, g)| {
        let (left, right) = bar_span(i);
        Rectangle::new([(left, 0.0), (right, g.mean)], BLACK.stroke_width(1))
    }))?;

    chart.draw_series(
        groups
            .iter()
            .enumerate()
            .filter(|(_, g)| g.std > 0.0)
            .map(|(i, g)| {
                ErrorBar::new_vertical(
                    i as f64,
                    g.mean - g.std,
                    g.mean,
                    g.mean + g.std,
                    BLACK.stroke_width(2),
                    12,
                )
            }),
    )?;

    let value_style = TextStyle::from(font(theme, theme.label_size, FontStyle::Bold))
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(groups.iter().enumerate().map(|(i, g)| {
        Text::new(
            unit.bar_label(g.mean),
            (i as f64, value_label_y(g.mean, g.std, offsets)),
            value_style.clone(),
        )
    }))?;

    draw_category_labels(root, &chart, groups.iter().map(|g| g.group.as_str()), theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_conversion() {
        assert_eq!(rgb((70, 130, 180)), RGBColor(70, 130, 180));
    }

    #[test]
    fn test_bar_fill_uses_fixed_colour() {
        let style = bar_fill(Some((0, 128, 128)), 3, 10, 0.7);
        let color = style.color.to_backend_color();
        assert!(style.filled);
        assert_eq!(color.rgb, (0, 128, 128));
        assert!((color.alpha - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_bar_fill_spreads_hues() {
        let first = bar_fill(None, 0, 3, 0.8);
        let second = bar_fill(None, 1, 3, 0.8);
        assert!(first.filled);
        assert_ne!(
            first.color.to_backend_color().rgb,
            second.color.to_backend_color().rgb
        );
    }
}
