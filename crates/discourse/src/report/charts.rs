//! SVG chart rendering.
//!
//! Geometry is computed here; the embedded Handlebars templates only lay
//! out the precomputed shapes.

use handlebars::Handlebars;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::summary::GroupedSummary;
use crate::analysis::Bucket;
use crate::error::{DiscourseError, Result};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 400.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 60.0;
const Y_TICKS: u32 = 4;

/// Chart file names written by [`ChartRenderer::write_all`].
pub const TREND_CHART: &str = "intensity_trend.svg";
/// See [`TREND_CHART`].
pub const COMPOSITION_CHART: &str = "bucket_composition.svg";

#[derive(Debug, Serialize)]
struct Axis {
    width: f64,
    height: f64,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    title: String,
    y_label: String,
    ticks: Vec<Tick>,
    labels: Vec<Label>,
}

#[derive(Debug, Serialize)]
struct Tick {
    y: f64,
    value: String,
}

#[derive(Debug, Serialize)]
struct Label {
    x: f64,
    text: String,
}

#[derive(Debug, Serialize)]
struct Point {
    x: f64,
    y: f64,
    value: String,
}

#[derive(Debug, Serialize)]
struct TrendData {
    axis: Axis,
    polyline: String,
    points: Vec<Point>,
}

#[derive(Debug, Serialize)]
struct Segment {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: &'static str,
    title: String,
}

#[derive(Debug, Serialize)]
struct LegendEntry {
    x: f64,
    color: &'static str,
    name: String,
}

#[derive(Debug, Serialize)]
struct CompositionData {
    axis: Axis,
    segments: Vec<Segment>,
    legend: Vec<LegendEntry>,
}

fn bucket_color(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::Enemy => "#dc2626",
        Bucket::Economic => "#eab308",
        Bucket::War => "#475569",
        Bucket::Liberty => "#0ea5e9",
    }
}

/// Renders chart SVGs from grouped summaries.
pub struct ChartRenderer {
    handlebars: Handlebars<'static>,
}

impl ChartRenderer {
    /// Create a renderer with the embedded templates.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string("axis", AXIS_PARTIAL)?;
        handlebars.register_template_string("trend", TREND_TEMPLATE)?;
        handlebars.register_template_string("composition", COMPOSITION_TEMPLATE)?;
        Ok(Self { handlebars })
    }

    /// Line chart of mean security intensity per group.
    pub fn render_trend(&self, summary: &GroupedSummary) -> Result<String> {
        let values: Vec<f64> = summary.groups.iter().map(|g| g.intensity_mean).collect();
        let max = nice_max(values.iter().copied().fold(0.0, f64::max));
        let axis = axis(
            summary,
            format!("Mean security intensity per {}", summary.period),
            "mean intensity",
            max,
        );

        let points: Vec<Point> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Point {
                x: x_center(i, values.len()),
                y: y_for(*v, max),
                value: format!("{v:.2}"),
            })
            .collect();
        let polyline = points
            .iter()
            .map(|p| format!("{:.1},{:.1}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");

        let data = TrendData {
            axis,
            polyline,
            points,
        };
        Ok(self.handlebars.render("trend", &data)?)
    }

    /// Stacked bars of mean enemy, economic and war totals per group.
    pub fn render_composition(&self, summary: &GroupedSummary) -> Result<String> {
        let stacks: Vec<f64> = summary
            .groups
            .iter()
            .map(|g| Bucket::scored().iter().map(|b| g.bucket_mean(*b)).sum())
            .collect();
        let max = nice_max(stacks.iter().copied().fold(0.0, f64::max));
        let axis = axis(
            summary,
            format!("Bucket composition per {}", summary.period),
            "mean count",
            max,
        );

        let n = summary.groups.len();
        let bar_width = if n == 0 { 0.0 } else { plot_width() / n as f64 * 0.6 };
        let mut segments = Vec::new();
        for (i, group) in summary.groups.iter().enumerate() {
            let x = x_center(i, n) - bar_width / 2.0;
            let mut base = 0.0;
            for bucket in Bucket::scored() {
                let value = group.bucket_mean(*bucket);
                if value <= 0.0 {
                    continue;
                }
                let top = y_for(base + value, max);
                segments.push(Segment {
                    x,
                    y: top,
                    width: bar_width,
                    height: y_for(base, max) - top,
                    color: bucket_color(*bucket),
                    title: format!("{} {bucket}: {value:.2}", group.label),
                });
                base += value;
            }
        }

        let legend = Bucket::scored()
            .iter()
            .enumerate()
            .map(|(i, b)| LegendEntry {
                x: MARGIN_LEFT + i as f64 * 110.0,
                color: bucket_color(*b),
                name: b.to_string(),
            })
            .collect();

        let data = CompositionData {
            axis,
            segments,
            legend,
        };
        Ok(self.handlebars.render("composition", &data)?)
    }

    /// Render both charts into `dir`. Returns the written paths.
    pub fn write_all(&self, dir: &Path, summary: &GroupedSummary) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir).map_err(|e| DiscourseError::io(dir, e))?;
        let charts = [
            (TREND_CHART, self.render_trend(summary)?),
            (COMPOSITION_CHART, self.render_composition(summary)?),
        ];

        let mut written = Vec::with_capacity(charts.len());
        for (name, svg) in charts {
            let path = dir.join(name);
            std::fs::write(&path, svg).map_err(|e| DiscourseError::io(&path, e))?;
            tracing::info!(path = %path.display(), "Rendered chart");
            written.push(path);
        }
        Ok(written)
    }
}

fn plot_width() -> f64 {
    WIDTH - MARGIN_LEFT - MARGIN_RIGHT
}

fn plot_height() -> f64 {
    HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
}

fn x_center(index: usize, count: usize) -> f64 {
    MARGIN_LEFT + (index as f64 + 0.5) * plot_width() / count.max(1) as f64
}

fn y_for(value: f64, max: f64) -> f64 {
    HEIGHT - MARGIN_BOTTOM - value / max * plot_height()
}

/// Round the axis maximum up to 1, 2, 2.5 or 5 times a power of ten.
fn nice_max(value: f64) -> f64 {
    if value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|step| step * magnitude)
        .find(|candidate| *candidate >= value)
        .unwrap_or(10.0 * magnitude)
}

fn axis(summary: &GroupedSummary, title: String, y_label: &str, max: f64) -> Axis {
    let ticks = (0..=Y_TICKS)
        .map(|i| {
            let value = max * f64::from(i) / f64::from(Y_TICKS);
            Tick {
                y: y_for(value, max),
                value: format!("{value:.2}"),
            }
        })
        .collect();
    let labels = summary
        .groups
        .iter()
        .enumerate()
        .map(|(i, g)| Label {
            x: x_center(i, summary.groups.len()),
            text: g.label.clone(),
        })
        .collect();

    Axis {
        width: WIDTH,
        height: HEIGHT,
        left: MARGIN_LEFT,
        right: WIDTH - MARGIN_RIGHT,
        top: MARGIN_TOP,
        bottom: HEIGHT - MARGIN_BOTTOM,
        title,
        y_label: y_label.to_string(),
        ticks,
        labels,
    }
}

/// Shared frame: background, title, gridlines, tick and group labels.
const AXIS_PARTIAL: &str = r##"<rect width="{{width}}" height="{{height}}" fill="#ffffff"/>
  <text x="{{left}}" y="24" font-size="16" font-weight="600">{{title}}</text>
  {{#each ticks}}
  <line x1="{{../left}}" x2="{{../right}}" y1="{{y}}" y2="{{y}}" stroke="#e5e7eb"/>
  <text x="{{../left}}" dx="-6" y="{{y}}" dy="4" font-size="11" text-anchor="end">{{value}}</text>
  {{/each}}
  <line x1="{{left}}" x2="{{right}}" y1="{{bottom}}" y2="{{bottom}}" stroke="#111827"/>
  {{#each labels}}
  <text x="{{x}}" y="{{../bottom}}" dy="18" font-size="11" text-anchor="middle">{{text}}</text>
  {{/each}}
  <text transform="rotate(-90)" x="-{{top}}" y="14" font-size="11" text-anchor="end">{{y_label}}</text>"##;

const TREND_TEMPLATE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="{{axis.width}}" height="{{axis.height}}" viewBox="0 0 {{axis.width}} {{axis.height}}" font-family="sans-serif">
  {{> axis axis}}
  <polyline points="{{polyline}}" fill="none" stroke="#dc2626" stroke-width="2"/>
  {{#each points}}
  <circle cx="{{x}}" cy="{{y}}" r="3.5" fill="#dc2626"><title>{{value}}</title></circle>
  {{/each}}
</svg>
"##;

const COMPOSITION_TEMPLATE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="{{axis.width}}" height="{{axis.height}}" viewBox="0 0 {{axis.width}} {{axis.height}}" font-family="sans-serif">
  {{> axis axis}}
  {{#each segments}}
  <rect x="{{x}}" y="{{y}}" width="{{width}}" height="{{height}}" fill="{{color}}"><title>{{title}}</title></rect>
  {{/each}}
  {{#each legend}}
  <rect x="{{x}}" y="{{../axis.height}}" transform="translate(0,-22)" width="12" height="12" fill="{{color}}"/>
  <text x="{{x}}" dx="18" y="{{../axis.height}}" dy="-12" font-size="12">{{name}}</text>
  {{/each}}
</svg>
"##;
