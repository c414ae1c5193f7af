//! Line-chart geometry for the projection series
//!
//! Computes scaled point coordinates, line and area paths, gridlines, and
//! axis labels for a fixed-size drawing area, and renders the result as a
//! standalone SVG document. Points before the actual/projected boundary use
//! the actual color; zero-valued slots get no marker.

use std::fmt::Write as _;

use crate::format::axis_amount_label;

use super::series::ExpenseSeries;

/// Marker color for recorded spending
pub const ACTUAL_COLOR: &str = "#4361EE";
/// Marker, line, and area color for extrapolated spending
pub const PROJECTED_COLOR: &str = "#ACBBF7";

/// Number of vertical intervals between horizontal gridlines
const Y_AXIS_INTERVALS: usize = 5;

/// Padding between the drawing area and the chart frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Insets {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 10.0,
            bottom: 30.0,
            left: 50.0,
        }
    }
}

/// Whether a data point is recorded or extrapolated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    Actual,
    Projected,
}

/// A positioned data point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
    pub kind: PointKind,
}

impl ChartPoint {
    /// Zero-valued slots are drawn on the line but get no marker
    pub fn has_marker(&self) -> bool {
        self.value != 0.0
    }

    pub fn color(&self) -> &'static str {
        match self.kind {
            PointKind::Actual => ACTUAL_COLOR,
            PointKind::Projected => PROJECTED_COLOR,
        }
    }
}

/// A horizontal gridline with its y-axis label
#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub y: f64,
    pub label: String,
}

/// An x-axis label slot; hidden slots carry an empty string
#[derive(Debug, Clone, PartialEq)]
pub struct XLabel {
    pub x: f64,
    pub text: String,
}

/// Computed chart geometry for one series and drawing area
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub insets: Insets,
    pub max_value: f64,
    pub points: Vec<ChartPoint>,
    pub line_path: String,
    pub area_path: String,
    pub grid_lines: Vec<GridLine>,
    pub x_labels: Vec<XLabel>,
}

impl ChartLayout {
    /// Lay out `series` inside a `width` x `height` area
    pub fn compute(series: &ExpenseSeries, width: f64, height: f64, insets: Insets) -> Self {
        let chart_width = width - insets.left - insets.right;
        let chart_height = height - insets.top - insets.bottom;

        // Zero floor so an all-zero series still produces finite geometry
        let max_value = series.data.iter().copied().fold(0.1_f64, f64::max);

        let n = series.data.len();
        let step = if n > 1 {
            chart_width / (n - 1) as f64
        } else {
            0.0
        };

        let points: Vec<ChartPoint> = series
            .data
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let x = step * i as f64 + insets.left;
                let y = chart_height - (chart_height * (value / max_value)) + insets.top;
                let kind = if i < series.actual_data_count {
                    PointKind::Actual
                } else {
                    PointKind::Projected
                };
                ChartPoint { x, y, value, kind }
            })
            .collect();

        let mut line_path = String::new();
        for (i, point) in points.iter().enumerate() {
            let op = if i == 0 { 'M' } else { 'L' };
            let _ = write!(line_path, "{} {:.2} {:.2} ", op, point.x, point.y);
        }

        let area_path = match (points.first(), points.last()) {
            (Some(first), Some(last)) => {
                let base_y = chart_height + insets.top;
                format!(
                    "{}L {:.2} {:.2} L {:.2} {:.2} Z",
                    line_path, last.x, base_y, first.x, base_y
                )
            }
            _ => String::new(),
        };

        let grid_lines = (0..=Y_AXIS_INTERVALS)
            .map(|i| {
                let fraction = i as f64 / Y_AXIS_INTERVALS as f64;
                GridLine {
                    y: chart_height - (chart_height * fraction) + insets.top,
                    label: axis_amount_label(max_value * fraction),
                }
            })
            .collect();

        let x_labels = decimate_labels(&series.labels)
            .into_iter()
            .enumerate()
            .map(|(i, text)| XLabel {
                x: step * i as f64 + insets.left,
                text,
            })
            .collect();

        Self {
            width,
            height,
            insets,
            max_value,
            points,
            line_path,
            area_path,
            grid_lines,
            x_labels,
        }
    }

    /// Render the layout as a standalone SVG document
    pub fn to_svg(&self, dark: bool) -> String {
        let text_fill = if dark {
            "rgba(255, 255, 255, 0.7)"
        } else {
            "rgba(0, 0, 0, 0.7)"
        };
        let grid_stroke = if dark {
            "rgba(255, 255, 255, 0.08)"
        } else {
            "rgba(0, 0, 0, 0.08)"
        };

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">",
            self.width, self.height, self.width, self.height
        );

        for line in &self.grid_lines {
            let _ = writeln!(
                svg,
                "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1\" stroke-dasharray=\"5,5\"/>",
                self.insets.left,
                line.y,
                self.width - self.insets.right,
                line.y,
                grid_stroke
            );
        }

        for line in &self.grid_lines {
            let _ = writeln!(
                svg,
                "  <text x=\"{:.2}\" y=\"{:.2}\" font-size=\"10\" text-anchor=\"end\" fill=\"{}\">{}</text>",
                self.insets.left - 5.0,
                line.y + 5.0,
                text_fill,
                line.label
            );
        }

        for label in &self.x_labels {
            if label.text.is_empty() {
                continue;
            }
            let _ = writeln!(
                svg,
                "  <text x=\"{:.2}\" y=\"{:.2}\" font-size=\"10\" text-anchor=\"middle\" fill=\"{}\">{}</text>",
                label.x,
                self.height - 10.0,
                text_fill,
                label.text
            );
        }

        if !self.area_path.is_empty() {
            let _ = writeln!(
                svg,
                "  <path d=\"{}\" fill=\"{}\" fill-opacity=\"0.2\"/>",
                self.area_path.trim_end(),
                PROJECTED_COLOR
            );
        }
        if !self.line_path.is_empty() {
            let _ = writeln!(
                svg,
                "  <path d=\"{}\" stroke=\"{}\" stroke-width=\"2\" fill=\"none\"/>",
                self.line_path.trim_end(),
                PROJECTED_COLOR
            );
        }

        for point in self.points.iter().filter(|p| p.has_marker()) {
            let _ = writeln!(
                svg,
                "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"4\" fill=\"{}\"/>",
                point.x,
                point.y,
                point.color()
            );
        }

        svg.push_str("</svg>\n");
        svg
    }
}

/// Thin dense label sets down to first/last plus evenly spaced intermediates
///
/// Up to 12 labels pass through untouched; beyond 20, every fifth label also
/// stays visible.
fn decimate_labels(labels: &[String]) -> Vec<String> {
    let len = labels.len();
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            if len <= 12 {
                return label.clone();
            }
            if i == 0 || i == len - 1 {
                return label.clone();
            }
            if len > 20 && i % 5 == 0 {
                return label.clone();
            }
            if i % len.div_ceil(6) == 0 {
                return label.clone();
            }
            String::new()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(data: Vec<f64>, actual_data_count: usize) -> ExpenseSeries {
        let projected_total = data.last().copied().unwrap_or(0.0);
        let historical_total = actual_data_count
            .checked_sub(1)
            .and_then(|i| data.get(i))
            .copied()
            .unwrap_or(0.0);
        ExpenseSeries {
            labels: (1..=data.len()).map(|i| i.to_string()).collect(),
            data,
            actual_data_count,
            projected_total,
            historical_total,
            additional_spending: projected_total - historical_total,
        }
    }

    #[test]
    fn points_span_the_drawing_area() {
        let s = series(vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0], 3);
        let layout = ChartLayout::compute(&s, 360.0, 240.0, Insets::default());

        assert_eq!(layout.points.len(), 7);
        assert!((layout.points[0].x - 50.0).abs() < 1e-9);
        assert!((layout.points[6].x - 350.0).abs() < 1e-9);
    }

    #[test]
    fn y_scale_pins_max_to_top_and_zero_to_baseline() {
        let s = series(vec![0.0, 50.0, 100.0], 2);
        let insets = Insets::default();
        let layout = ChartLayout::compute(&s, 360.0, 240.0, insets);

        let chart_height = 240.0 - insets.top - insets.bottom;
        assert!((layout.points[2].y - insets.top).abs() < 1e-9);
        assert!((layout.points[0].y - (chart_height + insets.top)).abs() < 1e-9);
        assert!((layout.points[1].y - (chart_height / 2.0 + insets.top)).abs() < 1e-9);
    }

    #[test]
    fn all_zero_series_uses_the_floor_max() {
        let s = series(vec![0.0; 7], 3);
        let layout = ChartLayout::compute(&s, 360.0, 240.0, Insets::default());
        assert_eq!(layout.max_value, 0.1);
        assert!(layout.points.iter().all(|p| p.y.is_finite()));
    }

    #[test]
    fn six_gridlines_with_scaled_labels() {
        let s = series(vec![0.0, 2500.0], 1);
        let layout = ChartLayout::compute(&s, 360.0, 240.0, Insets::default());

        assert_eq!(layout.grid_lines.len(), 6);
        assert_eq!(layout.grid_lines[0].label, "$0");
        assert_eq!(layout.grid_lines[5].label, "$2.5K");
        // Topmost gridline has the smallest y
        assert!(layout.grid_lines[5].y < layout.grid_lines[0].y);
    }

    #[test]
    fn marker_split_and_zero_suppression() {
        let s = series(vec![10.0, 0.0, 30.0, 40.0], 2);
        let layout = ChartLayout::compute(&s, 360.0, 240.0, Insets::default());

        assert_eq!(layout.points[0].kind, PointKind::Actual);
        assert_eq!(layout.points[1].kind, PointKind::Actual);
        assert_eq!(layout.points[2].kind, PointKind::Projected);
        assert!(!layout.points[1].has_marker());
        assert_eq!(layout.points.iter().filter(|p| p.has_marker()).count(), 3);
        assert_eq!(layout.points[0].color(), ACTUAL_COLOR);
        assert_eq!(layout.points[3].color(), PROJECTED_COLOR);
    }

    #[test]
    fn short_label_sets_are_untouched() {
        let labels: Vec<String> = (1..=7).map(|i| i.to_string()).collect();
        assert_eq!(decimate_labels(&labels), labels);
    }

    #[test]
    fn dense_label_sets_keep_first_last_and_strides() {
        let labels: Vec<String> = (1..=31).map(|i| i.to_string()).collect();
        let thinned = decimate_labels(&labels);

        assert_eq!(thinned.len(), 31);
        assert_eq!(thinned[0], "1");
        assert_eq!(thinned[30], "31");
        // Over 20 labels: every fifth index stays
        assert_eq!(thinned[5], "6");
        assert_eq!(thinned[10], "11");
        // ceil(31/6) == 6 stride also stays
        assert_eq!(thinned[6], "7");
        // Everything else is hidden
        assert_eq!(thinned[1], "");
        assert_eq!(thinned[7], "");
        assert!(thinned.iter().filter(|l| l.is_empty()).count() > 15);
    }

    #[test]
    fn paths_start_with_move_and_close_the_area() {
        let s = series(vec![10.0, 20.0, 30.0], 2);
        let layout = ChartLayout::compute(&s, 360.0, 240.0, Insets::default());

        assert!(layout.line_path.starts_with("M "));
        assert_eq!(layout.line_path.matches('L').count(), 2);
        assert!(layout.area_path.ends_with('Z'));
        // Area adds the two baseline corners
        assert_eq!(layout.area_path.matches('L').count(), 4);
    }

    #[test]
    fn svg_document_contains_all_elements() {
        let s = series(vec![10.0, 0.0, 30.0], 2);
        let layout = ChartLayout::compute(&s, 360.0, 240.0, Insets::default());
        let svg = layout.to_svg(false);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert_eq!(svg.matches("<path").count(), 2);
        assert_eq!(svg.matches("<line").count(), 6);
        assert!(svg.contains(ACTUAL_COLOR));
        assert!(svg.contains(PROJECTED_COLOR));

        let dark = layout.to_svg(true);
        assert!(dark.contains("rgba(255, 255, 255, 0.7)"));
    }
}
