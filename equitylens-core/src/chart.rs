//! Chart coordinate mapper — equity curve to a bounded 2-D path.
//!
//! Maps values into a padded drawing area independent of any rendering
//! surface. The x axis is ordinal: points are spread evenly by position, not
//! by elapsed time between timestamps. Higher values map to smaller y.

use crate::domain::EquityPoint;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Drawing surface dimensions, in the caller's units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartCanvas {
    pub width: f64,
    pub height: f64,
    /// Inset applied to all four edges.
    pub padding: f64,
}

impl ChartCanvas {
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    pub fn drawable_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    pub fn drawable_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }
}

impl Default for ChartCanvas {
    fn default() -> Self {
        Self::new(800.0, 300.0, 30.0)
    }
}

/// A drawable point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

/// Chart-ready rendering of an equity curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub path: Vec<ChartPoint>,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub value_min: f64,
    pub value_max: f64,
    /// Final equity value, for captions.
    pub last_value: f64,
}

impl ChartSeries {
    /// Series with no path and zeroed value bounds.
    pub fn empty(canvas: &ChartCanvas) -> Self {
        Self {
            path: Vec::new(),
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            value_min: 0.0,
            value_max: 0.0,
            last_value: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// SVG path data (`M x y L x y ...`) with two decimals per coordinate.
    pub fn svg_path(&self) -> String {
        let mut d = String::with_capacity(self.path.len() * 16);
        for (i, p) in self.path.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            if i > 0 {
                d.push(' ');
            }
            // writing to a String cannot fail
            let _ = write!(d, "{cmd} {:.2} {:.2}", p.x, p.y);
        }
        d
    }
}

/// Map an equity curve onto `canvas`.
///
/// Fewer than two points yield [`ChartSeries::empty`]. A flat curve uses a
/// value range of 1 and draws a horizontal line along the bottom edge.
pub fn to_chart_series(equity_curve: &[EquityPoint], canvas: &ChartCanvas) -> ChartSeries {
    let n = equity_curve.len();
    if n < 2 {
        return ChartSeries::empty(canvas);
    }

    let (value_min, value_max) = equity_curve
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.value), hi.max(p.value))
        });
    let range = if value_max - value_min == 0.0 {
        1.0
    } else {
        value_max - value_min
    };

    let step = canvas.drawable_width() / (n - 1) as f64;
    let drawable_height = canvas.drawable_height();

    let path = equity_curve
        .iter()
        .enumerate()
        .map(|(i, p)| ChartPoint {
            x: canvas.padding + i as f64 * step,
            y: canvas.padding + drawable_height * (1.0 - (p.value - value_min) / range),
        })
        .collect();

    ChartSeries {
        path,
        canvas_width: canvas.width,
        canvas_height: canvas.height,
        value_min,
        value_max,
        last_value: equity_curve[n - 1].value,
    }
}
