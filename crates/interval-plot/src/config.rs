//! Render configuration and figure styling
//!
//! All display choices live in two plain values passed to the renderer:
//! [`RenderSpec`] for layout decisions, [`PlotStyle`] for colors and
//! typography. Neither is ever read from process-global state.

use interval_summary::IntervalKind;
use plotters::style::RGBColor;
use serde::Deserialize;

/// Which axis carries the outcome values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Categories on the horizontal axis, values on the vertical axis
    Vertical,
    /// Values on the horizontal axis, categories on the vertical axis
    Horizontal,
}

impl Default for Orientation {
    fn default() -> Self {
        Self::Horizontal
    }
}

/// Layout configuration for a paired interval figure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderSpec {
    /// Axis assignment for categories and values
    pub orientation: Orientation,
    /// One sub-chart per facet, or everything on a single axis
    pub show_facets: bool,
    /// Draw ground-truth reference lines when provided
    pub draw_reference: bool,
    /// Offset between markers sharing a category slot, in slot units
    pub dodge_width: f64,
    /// Label for the value axis
    pub value_label: String,
}

impl Default for RenderSpec {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            show_facets: true,
            draw_reference: true,
            dodge_width: 0.1,
            value_label: "value".to_string(),
        }
    }
}

/// Immutable style bundle for the paired figure
///
/// Colors are fixed per interval kind so that CI and PI marks stay
/// visually consistent across every figure of a study.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    /// Figure background
    pub background: [u8; 3],
    /// Error bar and marker color for confidence intervals
    pub ci_color: [u8; 3],
    /// Error bar and marker color for prediction intervals
    pub pi_color: [u8; 3],
    /// Reference line color
    pub reference_color: [u8; 3],
    /// Mean marker radius in pixels
    pub point_size: u32,
    /// Error bar stroke width
    pub bar_stroke: u32,
    /// Reference line stroke width
    pub reference_stroke: u32,
    /// Reference line dash length in pixels
    pub dash_length: u32,
    /// Reference line gap length in pixels
    pub dash_gap: u32,
    /// Font family for every label
    pub font: String,
    /// Panel caption size
    pub caption_size: u32,
    /// Facet label size
    pub facet_label_size: u32,
    /// Axis description size
    pub axis_desc_size: u32,
    /// Chart margin in pixels
    pub margin: u32,
    /// Label area reserved for the category axis
    pub category_label_area: u32,
    /// Label area reserved for the value axis
    pub value_label_area: u32,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            background: [255, 255, 255],
            // Okabe-Ito blue and vermillion
            ci_color: [0, 114, 178],
            pi_color: [213, 94, 0],
            reference_color: [90, 90, 90],
            point_size: 3,
            bar_stroke: 2,
            reference_stroke: 1,
            dash_length: 6,
            dash_gap: 4,
            font: "sans-serif".to_string(),
            caption_size: 18,
            facet_label_size: 14,
            axis_desc_size: 15,
            margin: 10,
            category_label_area: 80,
            value_label_area: 50,
        }
    }
}

impl PlotStyle {
    /// Background fill color
    pub fn background_color(&self) -> RGBColor {
        let [r, g, b] = self.background;
        RGBColor(r, g, b)
    }

    /// Bar and marker color for one interval kind
    pub fn interval_color(&self, kind: IntervalKind) -> RGBColor {
        let [r, g, b] = match kind {
            IntervalKind::Ci => self.ci_color,
            IntervalKind::Pi => self.pi_color,
        };
        RGBColor(r, g, b)
    }

    /// Reference line color
    pub fn reference_line_color(&self) -> RGBColor {
        let [r, g, b] = self.reference_color;
        RGBColor(r, g, b)
    }
}
