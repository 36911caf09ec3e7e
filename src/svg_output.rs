//! SVG charts for the survey analysis
//!
//! Each chart is a self-contained SVG document built as a string, the same
//! way the HTML report is. Charts that have no data still render, with a
//! "No data" notice in place of the plot, so the output set is always
//! complete.

use crate::battery::BatteryReport;
use crate::descriptive::{linear_fit, mean, percentile};
use crate::recode::{CleanedTable, IncomeLevel, PricePerception, Respondent};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const LEFT: f64 = 80.0;
const RIGHT: f64 = 30.0;
const TOP: f64 = 60.0;
const BOTTOM: f64 = 80.0;

// Set2-like qualitative palette
const PALETTE: [&str; 5] = ["#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854"];
const GROUP_COLORS: [&str; 3] = ["#e74c3c", "#3498db", "#2ecc71"];
const INCOME_COLORS: [&str; 4] = ["#e74c3c", "#f39c12", "#f1c40f", "#2ecc71"];

/// One rendered chart and the file name it is written under
#[derive(Debug, Clone)]
pub struct Chart {
    pub file_name: &'static str,
    pub svg: String,
}

/// Escape XML special characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Linear map from data space to pixel space
#[derive(Debug, Clone, Copy)]
struct Scale {
    lo: f64,
    hi: f64,
    px_lo: f64,
    px_hi: f64,
}

impl Scale {
    fn new((lo, hi): (f64, f64), px_lo: f64, px_hi: f64) -> Self {
        Self {
            lo,
            hi,
            px_lo,
            px_hi,
        }
    }

    fn map(&self, value: f64) -> f64 {
        self.px_lo + (value - self.lo) / (self.hi - self.lo) * (self.px_hi - self.px_lo)
    }

    /// Evenly spaced round tick values inside the domain
    fn ticks(&self) -> Vec<f64> {
        let raw = (self.hi - self.lo) / 5.0;
        let magnitude = 10f64.powf(raw.log10().floor());
        let step = match raw / magnitude {
            n if n <= 1.0 => magnitude,
            n if n <= 2.0 => 2.0 * magnitude,
            n if n <= 5.0 => 5.0 * magnitude,
            _ => 10.0 * magnitude,
        };
        let mut ticks = Vec::new();
        let mut tick = (self.lo / step).ceil() * step;
        while tick <= self.hi + step * 1e-9 {
            ticks.push(tick);
            tick += step;
        }
        ticks
    }
}

/// Padded [min, max] of the values, never zero-width
fn domain<'a, I: IntoIterator<Item = &'a f64>>(values: I, include_zero: bool) -> (f64, f64) {
    let (mut lo, mut hi) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    if lo == hi {
        return (lo - 0.5, hi + 0.5);
    }
    let pad = (hi - lo) * 0.05;
    (if include_zero && lo == 0.0 { 0.0 } else { lo - pad }, hi + pad)
}

/// Chart under construction
struct Canvas {
    title: String,
    body: String,
}

impl Canvas {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            body: String::new(),
        }
    }

    /// Append one element on its own line
    fn push(&mut self, element: String) {
        self.body.push_str(&element);
        self.body.push('\n');
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str, opacity: f64) {
        self.push(format!(
            r#"  <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" fill-opacity="{}" stroke="white" stroke-width="0.5"/>"#,
            x, y, w.max(0.0), h.max(0.0), fill, opacity
        ));
    }

    fn line(&mut self, (x1, y1): (f64, f64), (x2, y2): (f64, f64), stroke: &str, width: f64, dashed: bool) {
        let dash = if dashed { r#" stroke-dasharray="6,4""# } else { "" };
        self.push(format!(
            r#"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{}"{}/>"#,
            x1, y1, x2, y2, stroke, width, dash
        ));
    }

    fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str, opacity: f64) {
        self.push(format!(
            r#"  <circle cx="{:.1}" cy="{:.1}" r="{}" fill="{}" fill-opacity="{}"/>"#,
            cx, cy, r, fill, opacity
        ));
    }

    fn text(&mut self, x: f64, y: f64, anchor: &str, size: u32, content: &str) {
        self.push(format!(
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="{}" font-size="{}">{}</text>"#,
            x,
            y,
            anchor,
            size,
            escape_xml(content)
        ));
    }

    fn no_data(&mut self) {
        self.text(WIDTH / 2.0, HEIGHT / 2.0, "middle", 16, "No data");
    }

    /// Horizontal grid lines and tick labels for a vertical value axis
    fn y_axis(&mut self, scale: &Scale, label: &str) {
        for tick in scale.ticks() {
            let y = scale.map(tick);
            self.line((LEFT, y), (WIDTH - RIGHT, y), "#dddddd", 1.0, false);
            self.text(LEFT - 8.0, y + 4.0, "end", 11, &format_tick(tick));
        }
        self.line((LEFT, TOP), (LEFT, HEIGHT - BOTTOM), "#333333", 1.0, false);
        self.push(format!(
            r#"  <text x="20" y="{:.1}" text-anchor="middle" font-size="12" transform="rotate(-90 20 {:.1})">{}</text>"#,
            HEIGHT / 2.0,
            HEIGHT / 2.0,
            escape_xml(label)
        ));
    }

    fn x_label(&mut self, label: &str) {
        self.line(
            (LEFT, HEIGHT - BOTTOM),
            (WIDTH - RIGHT, HEIGHT - BOTTOM),
            "#333333",
            1.0,
            false,
        );
        self.text((LEFT + WIDTH - RIGHT) / 2.0, HEIGHT - 20.0, "middle", 12, label);
    }

    fn legend(&mut self, entries: &[(String, &str)]) {
        for (i, (label, color)) in entries.iter().enumerate() {
            let y = TOP + 10.0 + i as f64 * 18.0;
            self.rect(WIDTH - RIGHT - 170.0, y - 9.0, 12.0, 12.0, color, 0.8);
            self.text(WIDTH - RIGHT - 152.0, y + 1.0, "start", 11, label);
        }
    }

    fn finish(self) -> String {
        let mut svg = String::new();
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
            w = WIDTH,
            h = HEIGHT
        ));
        svg.push('\n');
        svg.push_str(r#"  <rect width="100%" height="100%" fill="white"/>"#);
        svg.push('\n');
        svg.push_str(&format!(
            r#"  <text x="{:.1}" y="32" text-anchor="middle" font-size="16" font-weight="bold">{}</text>"#,
            WIDTH / 2.0,
            escape_xml(&self.title)
        ));
        svg.push('\n');
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }
}

fn format_tick(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn plot_x() -> (f64, f64) {
    (LEFT, WIDTH - RIGHT)
}

fn plot_y() -> (f64, f64) {
    (HEIGHT - BOTTOM, TOP)
}

/// Category centres evenly spread across the plot width
fn category_centres(count: usize) -> Vec<f64> {
    let (x0, x1) = plot_x();
    let slot = (x1 - x0) / count.max(1) as f64;
    (0..count).map(|i| x0 + slot * (i as f64 + 0.5)).collect()
}

/// Bin counts over [min, max]; the last bin is closed on the right
fn bin_counts(values: &[f64], bins: usize) -> Option<(f64, f64, Vec<usize>)> {
    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    if values.is_empty() || bins == 0 {
        return None;
    }
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in values {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Some((lo, hi, counts))
}

fn histogram(title: &str, values: &[f64], bins: usize, color: &str, x_label: &str) -> String {
    let mut canvas = Canvas::new(title);
    let Some((lo, hi, counts)) = bin_counts(values, bins) else {
        canvas.no_data();
        return canvas.finish();
    };

    let max_count = counts.iter().copied().max().unwrap_or(0) as f64;
    let x = Scale::new((lo, hi), plot_x().0, plot_x().1);
    let y = Scale::new((0.0, (max_count * 1.1).max(1.0)), plot_y().0, plot_y().1);
    canvas.y_axis(&y, "Number of respondents");

    let width = (hi - lo) / bins as f64;
    for (i, count) in counts.iter().enumerate() {
        let left = x.map(lo + width * i as f64);
        let right = x.map(lo + width * (i + 1) as f64);
        let top = y.map(*count as f64);
        canvas.rect(left, top, right - left, y.map(0.0) - top, color, 0.8);
    }
    for tick in x.ticks() {
        canvas.text(x.map(tick), HEIGHT - BOTTOM + 18.0, "middle", 11, &format_tick(tick));
    }
    canvas.x_label(x_label);
    canvas.finish()
}

struct BoxStats {
    q1: f64,
    median: f64,
    q3: f64,
    whisker_lo: f64,
    whisker_hi: f64,
    outliers: Vec<f64>,
}

/// Quartiles, 1.5 IQR whiskers clipped to the data, and the points beyond
fn box_stats(values: &[f64]) -> Option<BoxStats> {
    let q1 = percentile(values, 25.0)?;
    let median = percentile(values, 50.0)?;
    let q3 = percentile(values, 75.0)?;
    let iqr = q3 - q1;
    let (fence_lo, fence_hi) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

    let inside = values.iter().copied().filter(|v| (fence_lo..=fence_hi).contains(v));
    let whisker_lo = inside.clone().fold(f64::INFINITY, f64::min);
    let whisker_hi = inside.fold(f64::NEG_INFINITY, f64::max);

    Some(BoxStats {
        q1,
        median,
        q3,
        whisker_lo,
        whisker_hi,
        outliers: values
            .iter()
            .copied()
            .filter(|v| !(fence_lo..=fence_hi).contains(v))
            .collect(),
    })
}

fn box_plot(title: &str, groups: &[(String, Vec<f64>)], colors: &[&str], x_label: &str, y_label: &str) -> String {
    let mut canvas = Canvas::new(title);
    if groups.iter().all(|(_, values)| values.is_empty()) {
        canvas.no_data();
        return canvas.finish();
    }

    let y = Scale::new(
        domain(groups.iter().flat_map(|(_, values)| values), true),
        plot_y().0,
        plot_y().1,
    );
    canvas.y_axis(&y, y_label);

    let centres = category_centres(groups.len());
    let half = (plot_x().1 - plot_x().0) / groups.len() as f64 * 0.3;
    for (i, ((label, values), centre)) in groups.iter().zip(&centres).enumerate() {
        canvas.text(*centre, HEIGHT - BOTTOM + 18.0, "middle", 11, label);
        let Some(stats) = box_stats(values) else {
            continue;
        };
        let color = colors[i % colors.len()];

        canvas.line((*centre, y.map(stats.whisker_lo)), (*centre, y.map(stats.q1)), "#333333", 1.0, false);
        canvas.line((*centre, y.map(stats.q3)), (*centre, y.map(stats.whisker_hi)), "#333333", 1.0, false);
        for whisker in [stats.whisker_lo, stats.whisker_hi] {
            canvas.line(
                (centre - half / 2.0, y.map(whisker)),
                (centre + half / 2.0, y.map(whisker)),
                "#333333",
                1.0,
                false,
            );
        }
        canvas.rect(
            centre - half,
            y.map(stats.q3),
            half * 2.0,
            y.map(stats.q1) - y.map(stats.q3),
            color,
            0.7,
        );
        canvas.line(
            (centre - half, y.map(stats.median)),
            (centre + half, y.map(stats.median)),
            "#d35400",
            2.0,
            false,
        );
        for outlier in &stats.outliers {
            canvas.circle(*centre, y.map(*outlier), 3.0, "#555555", 0.6);
        }
    }
    canvas.x_label(x_label);
    canvas.finish()
}

fn horizontal_bars(title: &str, bars: &[(String, f64)], x_label: &str) -> String {
    let mut canvas = Canvas::new(title);
    let max = bars.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    let x = Scale::new((0.0, (max * 1.1).max(1.0)), LEFT + 60.0, WIDTH - RIGHT);
    let slot = (HEIGHT - BOTTOM - TOP) / bars.len().max(1) as f64;

    for tick in x.ticks() {
        let px = x.map(tick);
        canvas.line((px, TOP), (px, HEIGHT - BOTTOM), "#dddddd", 1.0, false);
        canvas.text(px, HEIGHT - BOTTOM + 18.0, "middle", 11, &format_tick(tick));
    }
    for (i, (label, value)) in bars.iter().enumerate() {
        let top = TOP + slot * i as f64 + slot * 0.2;
        canvas.rect(x.map(0.0), top, x.map(*value) - x.map(0.0), slot * 0.6, PALETTE[i % PALETTE.len()], 0.8);
        canvas.text(x.map(0.0) - 8.0, top + slot * 0.35, "end", 12, label);
    }
    canvas.x_label(x_label);
    canvas.finish()
}

/// Bars for each category, one coloured bar per series
fn grouped_bars(title: &str, categories: &[&str], series: &[(String, Vec<Option<f64>>)], y_label: &str) -> String {
    let mut canvas = Canvas::new(title);
    if series.is_empty() {
        canvas.no_data();
        return canvas.finish();
    }

    let y = Scale::new(
        domain(series.iter().flat_map(|(_, values)| values.iter().flatten()), true),
        plot_y().0,
        plot_y().1,
    );
    canvas.y_axis(&y, y_label);

    let centres = category_centres(categories.len());
    let slot = (plot_x().1 - plot_x().0) / categories.len().max(1) as f64;
    let bar = slot * 0.8 / series.len() as f64;
    for (c, (category, centre)) in categories.iter().zip(&centres).enumerate() {
        canvas.text(*centre, HEIGHT - BOTTOM + 18.0, "middle", 11, category);
        for (s, (_, values)) in series.iter().enumerate() {
            let Some(value) = values.get(c).copied().flatten() else {
                continue;
            };
            let left = centre - slot * 0.4 + bar * s as f64;
            canvas.rect(left, y.map(value), bar, y.map(0.0) - y.map(value), GROUP_COLORS[s % GROUP_COLORS.len()], 0.8);
        }
    }
    let legend: Vec<(String, &str)> = series
        .iter()
        .enumerate()
        .map(|(s, (name, _))| (name.clone(), GROUP_COLORS[s % GROUP_COLORS.len()]))
        .collect();
    canvas.legend(&legend);
    canvas.x_label("Barrier type");
    canvas.finish()
}

/// Diverging blue-white-red colour for a correlation in [-1, 1]
fn diverging_color(r: f64) -> String {
    let (target, t) = if r >= 0.0 {
        ((178.0, 24.0, 43.0), r.min(1.0))
    } else {
        ((33.0, 102.0, 172.0), (-r).min(1.0))
    };
    let blend = |to: f64| (255.0 + (to - 255.0) * t).round() as u8;
    format!("#{:02x}{:02x}{:02x}", blend(target.0), blend(target.1), blend(target.2))
}

fn heatmap(report: &BatteryReport) -> String {
    let matrix = &report.correlation;
    let mut canvas = Canvas::new("Correlation Matrix of Key Variables");
    let k = matrix.names.len();
    if k == 0 {
        canvas.no_data();
        return canvas.finish();
    }

    let left = 200.0;
    let size = ((HEIGHT - TOP - 120.0) / k as f64).min((WIDTH - left - RIGHT) / k as f64);
    for (i, row) in matrix.values.iter().enumerate() {
        let y = TOP + size * i as f64;
        canvas.text(left - 8.0, y + size / 2.0 + 4.0, "end", 11, &matrix.names[i]);
        for (j, cell) in row.iter().enumerate() {
            let x = left + size * j as f64;
            match cell {
                Some(r) => {
                    canvas.rect(x, y, size, size, &diverging_color(*r), 1.0);
                    canvas.text(x + size / 2.0, y + size / 2.0 + 4.0, "middle", 11, &format!("{:.2}", r));
                }
                None => {
                    canvas.rect(x, y, size, size, "#cccccc", 1.0);
                    canvas.text(x + size / 2.0, y + size / 2.0 + 4.0, "middle", 11, "n/a");
                }
            }
        }
    }
    for (j, name) in matrix.names.iter().enumerate() {
        let x = left + size * j as f64 + size / 2.0;
        let y = TOP + size * k as f64 + 12.0;
        canvas.push(format!(
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="end" font-size="10" transform="rotate(-35 {:.1} {:.1})">{}</text>"#,
            x,
            y,
            x,
            y,
            escape_xml(name)
        ));
    }
    canvas.finish()
}

fn price_scatter(table: &CleanedTable) -> String {
    let mut canvas = Canvas::new("Price Perception vs. Thrifting Frequency");
    let points: Vec<(f64, f64)> = table
        .rows()
        .iter()
        .filter_map(|r| Some((r.price_perception_num? as f64, r.thrift_past_year_num?)))
        .collect();
    if points.is_empty() {
        canvas.no_data();
        return canvas.finish();
    }

    let x = Scale::new((0.5, 3.5), plot_x().0, plot_x().1);
    let y = Scale::new(
        domain(points.iter().map(|(_, f)| f), true),
        plot_y().0,
        plot_y().1,
    );
    canvas.y_axis(&y, "Thrifting frequency (times/year)");

    let mut legend = Vec::new();
    for (i, perception) in PricePerception::ALL.into_iter().enumerate() {
        let code = perception.code() as f64;
        let color = PALETTE[i];
        canvas.text(x.map(code), HEIGHT - BOTTOM + 18.0, "middle", 11, perception.label());
        let mut any = false;
        for (_, frequency) in points.iter().filter(|(p, _)| *p == code) {
            canvas.circle(x.map(code), y.map(*frequency), 6.0, color, 0.5);
            any = true;
        }
        if any {
            legend.push((perception.label().to_string(), color));
        }
    }

    let (xs, ys): (Vec<f64>, Vec<f64>) = points.iter().copied().unzip();
    if let Some((slope, intercept)) = linear_fit(&xs, &ys) {
        let lo = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        canvas.line(
            (x.map(lo), y.map(slope * lo + intercept)),
            (x.map(hi), y.map(slope * hi + intercept)),
            "#e74c3c",
            2.0,
            true,
        );
        legend.push(("Trend Line".to_string(), "#e74c3c"));
    }
    canvas.legend(&legend);
    canvas.x_label("Price perception");
    canvas.finish()
}

/// Past-year frequency split by each distinct value of an integer rating
fn frequency_by_rating<F>(table: &CleanedTable, rating: F) -> Vec<(String, Vec<f64>)>
where
    F: Fn(&Respondent) -> Option<i64>,
{
    let mut levels: Vec<i64> = table.rows().iter().filter_map(&rating).collect();
    levels.sort_unstable();
    levels.dedup();
    levels
        .into_iter()
        .map(|level| {
            let values = table
                .rows()
                .iter()
                .filter(|r| rating(*r) == Some(level))
                .filter_map(|r| r.thrift_past_year_num)
                .collect();
            (level.to_string(), values)
        })
        .collect()
}

fn paired_lines(table: &CleanedTable, sample_size: usize, seed: u64) -> String {
    let paired = table.paired();
    let n = sample_size.min(paired.len());
    let mut canvas = Canvas::new(&format!(
        "Individual Changes in Thrifting Frequency (Sample of {})",
        n
    ));
    if paired.is_empty() {
        canvas.no_data();
        return canvas.finish();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let sample: Vec<_> = paired.choose_multiple(&mut rng, n).collect();

    let centres = category_centres(2);
    let y = Scale::new(
        domain(
            paired.iter().flat_map(|p| [&p.five_years_ago, &p.past_year]),
            true,
        ),
        plot_y().0,
        plot_y().1,
    );
    canvas.y_axis(&y, "Frequency (times per year)");

    for obs in &sample {
        let from = (centres[0], y.map(obs.five_years_ago));
        let to = (centres[1], y.map(obs.past_year));
        canvas.line(from, to, "#808080", 1.0, false);
        canvas.circle(from.0, from.1, 3.0, "#808080", 0.3);
        canvas.circle(to.0, to.1, 3.0, "#808080", 0.3);
    }

    let then: Vec<f64> = paired.iter().map(|p| p.five_years_ago).collect();
    let now: Vec<f64> = paired.iter().map(|p| p.past_year).collect();
    if let (Some(then), Some(now)) = (mean(&then), mean(&now)) {
        let from = (centres[0], y.map(then));
        let to = (centres[1], y.map(now));
        canvas.line(from, to, "#e74c3c", 3.0, false);
        canvas.circle(from.0, from.1, 7.0, "#e74c3c", 1.0);
        canvas.circle(to.0, to.1, 7.0, "#e74c3c", 1.0);
        canvas.legend(&[("Average Trend".to_string(), "#e74c3c")]);
    }
    canvas.text(centres[0], HEIGHT - BOTTOM + 18.0, "middle", 12, "Five Years Ago");
    canvas.text(centres[1], HEIGHT - BOTTOM + 18.0, "middle", 12, "Past Year");
    canvas.x_label("");
    canvas.finish()
}

/// Render all eleven charts
pub fn render_charts(table: &CleanedTable, report: &BatteryReport) -> Vec<Chart> {
    let config = &report.config;
    let past_year = table.values(|r| r.thrift_past_year_num);
    let five_years_ago = table.values(|r| r.thrift_five_years_ago_num);
    let changes: Vec<f64> = table.paired().iter().map(|p| p.change).collect();

    let motivations: Vec<(String, f64)> = report
        .descriptives
        .motivations
        .iter()
        .map(|share| (share.label.clone(), share.count as f64))
        .collect();

    let barrier_series: Vec<(String, Vec<Option<f64>>)> = report
        .barriers
        .iter()
        .map(|row| {
            (
                row.thrift_frequency_group.clone(),
                vec![
                    row.avg_price_barrier,
                    row.avg_condition,
                    row.avg_quality_brands,
                    row.avg_style_fit,
                    row.avg_social_accept,
                ],
            )
        })
        .collect();

    let income_groups: Vec<(String, Vec<f64>)> = IncomeLevel::ALL
        .into_iter()
        .filter(|level| table.rows().iter().any(|r| r.income_level == Some(*level)))
        .map(|level| {
            let values = table
                .rows()
                .iter()
                .filter(|r| r.income_level == Some(level))
                .filter_map(|r| r.thrift_past_year_num)
                .collect();
            (level.label().to_string(), values)
        })
        .collect();

    let charts = vec![
        Chart {
            file_name: "01_thrift_frequency_distribution.svg",
            svg: histogram(
                "Distribution of Thrifting Frequency (Past Year)",
                &past_year,
                config.frequency_bins,
                "#3498db",
                "Times per year",
            ),
        },
        Chart {
            file_name: "02_time_comparison_boxplot.svg",
            svg: box_plot(
                "Thrifting Frequency: Five Years Ago vs Past Year",
                &[
                    ("Five Years Ago".to_string(), five_years_ago),
                    ("Past Year".to_string(), past_year.clone()),
                ],
                &["#e74c3c", "#3498db"],
                "",
                "Frequency (times per year)",
            ),
        },
        Chart {
            file_name: "03_motivations.svg",
            svg: horizontal_bars("Motivations for Thrifting", &motivations, "Number of respondents"),
        },
        Chart {
            file_name: "04_barriers_by_group.svg",
            svg: grouped_bars(
                "Barriers to Thrifting by Shopping Frequency Group",
                &["Price Impact", "Condition", "Quality Brands", "Style Fit", "Social Accept"],
                &barrier_series,
                "Average rating (1-5 scale)",
            ),
        },
        Chart {
            file_name: "05_correlation_heatmap.svg",
            svg: heatmap(report),
        },
        Chart {
            file_name: "06_price_vs_frequency.svg",
            svg: price_scatter(table),
        },
        Chart {
            file_name: "07_condition_vs_frequency.svg",
            svg: box_plot(
                "Thrifting Frequency by Perceived Clothing Condition",
                &frequency_by_rating(table, |r| r.condition_rating),
                &["#2ecc71"],
                "Condition rating (1=Never good, 5=Always good)",
                "Thrifting frequency (times/year)",
            ),
        },
        Chart {
            file_name: "08_social_vs_frequency.svg",
            svg: box_plot(
                "Thrifting Frequency by Social Acceptability Perception",
                &frequency_by_rating(table, |r| r.social_accept_num),
                &["#9b59b6"],
                "Social acceptability (1=Very Unacceptable, 5=Very Acceptable)",
                "Thrifting frequency (times/year)",
            ),
        },
        Chart {
            file_name: "09_thrift_change_distribution.svg",
            svg: histogram(
                "Distribution of Change in Thrifting Frequency",
                &changes,
                config.change_bins,
                "#f39c12",
                "Change in times per year (past year - five years ago)",
            ),
        },
        Chart {
            file_name: "10_paired_change_plot.svg",
            svg: paired_lines(table, config.paired_plot_sample, config.sample_seed),
        },
        Chart {
            file_name: "11_income_vs_frequency.svg",
            svg: box_plot(
                "Thrifting Frequency by Income Level",
                &income_groups,
                &INCOME_COLORS,
                "Income level",
                "Frequency (times per year)",
            ),
        },
    ];

    tracing::debug!(charts = charts.len(), "Rendered charts");
    charts
}

/// Write charts into `dir`, creating it if needed
pub fn write_charts(dir: &Path, charts: &[Chart]) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(charts.len());
    for chart in charts {
        let path = dir.join(chart.file_name);
        fs::write(&path, &chart.svg)?;
        written.push(path);
    }
    tracing::info!(dir = %dir.display(), count = written.len(), "Wrote charts");
    Ok(written)
}
