//! Plotters-backed rendering of the paired figure
//!
//! The figure is two stacked panels sharing one category axis and one
//! value range: confidence intervals on top, prediction intervals below.
//! Geometry comes from [`crate::layout`]; this module only maps marks
//! onto a drawing backend and handles file export.

use crate::config::{Orientation, PlotStyle, RenderSpec};
use crate::layout::{build_layout, FacetChart, FigureLayout, PanelLayout};
use crate::{Error, Result};
use interval_core::TrueEffect;
use interval_summary::{IntervalKind, IntervalSummary};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

fn to_draw_err(err: impl std::fmt::Display) -> Error {
    Error::Draw(err.to_string())
}

/// Renders an [`IntervalSummary`] as a paired CI/PI figure.
///
/// The renderer is immutable once built; concurrent draws against
/// different backends never interfere with each other.
#[derive(Debug, Clone)]
pub struct PairedIntervalRenderer {
    spec: RenderSpec,
    style: PlotStyle,
}

impl PairedIntervalRenderer {
    pub fn new(spec: RenderSpec) -> Self {
        Self {
            spec,
            style: PlotStyle::default(),
        }
    }

    pub fn with_style(spec: RenderSpec, style: PlotStyle) -> Self {
        Self { spec, style }
    }

    pub fn spec(&self) -> &RenderSpec {
        &self.spec
    }

    pub fn style(&self) -> &PlotStyle {
        &self.style
    }

    /// Draws the full figure onto an already constructed drawing area.
    ///
    /// The CI panel takes the upper half, the PI panel the lower half.
    /// Groups whose bounds are undefined keep their mean marker but get
    /// no error bar.
    #[instrument(skip_all, fields(groups = summary.group_count(), orientation = ?self.spec.orientation))]
    pub fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        summary: &IntervalSummary,
        true_effects: Option<&[TrueEffect]>,
    ) -> Result<()> {
        if summary.is_empty() {
            return Err(Error::Core(interval_core::Error::empty_input("render")));
        }
        let layout = build_layout(&self.spec, summary, true_effects)?;

        root.fill(&self.style.background_color()).map_err(to_draw_err)?;
        let panel_areas = root.split_evenly((2, 1));
        for (area, panel) in panel_areas.iter().zip(layout.panels.iter()) {
            self.draw_panel(area, panel, &layout)?;
        }
        Ok(())
    }

    fn draw_panel<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        panel: &PanelLayout,
        layout: &FigureLayout,
    ) -> Result<()> {
        let inner = area
            .titled(
                &panel.caption,
                (self.style.font.as_str(), self.style.caption_size),
            )
            .map_err(to_draw_err)?;

        let columns = inner.split_evenly((1, panel.facets.len()));
        for (column, chart) in columns.iter().zip(panel.facets.iter()) {
            self.draw_facet(column, chart, panel.kind, layout)?;
        }
        Ok(())
    }

    fn draw_facet<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        chart: &FacetChart,
        kind: IntervalKind,
        layout: &FigureLayout,
    ) -> Result<()> {
        let area = match &chart.facet {
            Some(label) => area
                .titled(label, (self.style.font.as_str(), self.style.facet_label_size))
                .map_err(to_draw_err)?,
            None => area.clone(),
        };

        let slot_range = -0.5..(layout.slots.len() as f64 - 0.5);
        let value_range = layout.value_range.0..layout.value_range.1;
        // One f64 plane serves both orientations; only the axis
        // assignment flips.
        let (x_range, y_range, x_label_area, y_label_area) = match self.spec.orientation {
            Orientation::Vertical => (
                slot_range,
                value_range,
                self.style.category_label_area,
                self.style.value_label_area,
            ),
            Orientation::Horizontal => (
                value_range,
                slot_range,
                self.style.value_label_area,
                self.style.category_label_area,
            ),
        };

        let mut ctx = ChartBuilder::on(&area)
            .margin(self.style.margin)
            .x_label_area_size(x_label_area)
            .y_label_area_size(y_label_area)
            .build_cartesian_2d(x_range, y_range)
            .map_err(to_draw_err)?;

        let slot_labels = &layout.slots;
        let slot_formatter = |v: &f64| -> String {
            let nearest = v.round();
            if (v - nearest).abs() > 0.01 || nearest < 0.0 {
                return String::new();
            }
            match slot_labels.get(nearest as usize) {
                Some(label) => label.clone(),
                None => String::new(),
            }
        };
        let value_formatter = |v: &f64| format!("{v:.1}");

        let mut mesh = ctx.configure_mesh();
        mesh.light_line_style(RGBColor(235, 235, 235).stroke_width(1))
            .axis_desc_style((self.style.font.as_str(), self.style.axis_desc_size));
        match self.spec.orientation {
            Orientation::Vertical => {
                mesh.x_labels(slot_labels.len())
                    .x_label_formatter(&slot_formatter)
                    .y_label_formatter(&value_formatter)
                    .y_desc(self.spec.value_label.as_str());
            }
            Orientation::Horizontal => {
                mesh.y_labels(slot_labels.len())
                    .y_label_formatter(&slot_formatter)
                    .x_label_formatter(&value_formatter)
                    .x_desc(self.spec.value_label.as_str());
            }
        }
        mesh.draw().map_err(to_draw_err)?;

        self.draw_marks(&mut ctx, chart, kind)
    }

    fn draw_marks<DB: DrawingBackend>(
        &self,
        ctx: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
        chart: &FacetChart,
        kind: IntervalKind,
    ) -> Result<()> {
        let orientation = self.spec.orientation;
        let at = move |slot: f64, value: f64| -> (f64, f64) {
            match orientation {
                Orientation::Vertical => (slot, value),
                Orientation::Horizontal => (value, slot),
            }
        };

        // References behind bars, bars behind mean markers.
        for reference in &chart.refs {
            ctx.draw_series(DashedLineSeries::new(
                vec![
                    at(reference.slot_from, reference.value),
                    at(reference.slot_to, reference.value),
                ],
                self.style.dash_length,
                self.style.dash_gap,
                self.style
                    .reference_line_color()
                    .stroke_width(self.style.reference_stroke),
            ))
            .map_err(to_draw_err)?;
        }

        let color = self.style.interval_color(kind);
        ctx.draw_series(chart.bars.iter().map(|bar| {
            PathElement::new(
                vec![at(bar.slot, bar.lower), at(bar.slot, bar.upper)],
                color.stroke_width(self.style.bar_stroke),
            )
        }))
        .map_err(to_draw_err)?;

        ctx.draw_series(chart.points.iter().map(|point| {
            Circle::new(
                at(point.slot, point.value),
                self.style.point_size,
                color.filled(),
            )
        }))
        .map_err(to_draw_err)?;

        Ok(())
    }

    /// Writes the figure to `path`, choosing the backend from the file
    /// extension. Supported: `svg`, `png`, `bmp`, `jpeg`, `jpg`.
    ///
    /// Export is all or nothing. On any failure no file appears at
    /// `path`, and partially rendered output is cleaned up.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save<P: AsRef<Path>>(
        &self,
        summary: &IntervalSummary,
        true_effects: Option<&[TrueEffect]>,
        path: P,
        size: (u32, u32),
    ) -> Result<()> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "svg" => self.save_svg(summary, true_effects, path, size),
            "png" | "bmp" | "jpeg" | "jpg" => self.save_bitmap(summary, true_effects, path, size),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn save_svg(
        &self,
        summary: &IntervalSummary,
        true_effects: Option<&[TrueEffect]>,
        path: &Path,
        size: (u32, u32),
    ) -> Result<()> {
        let mut document = String::new();
        {
            let root = SVGBackend::with_string(&mut document, size).into_drawing_area();
            self.draw(&root, summary, true_effects)?;
            root.present().map_err(to_draw_err)?;
        }

        // Write through the staging file so an interrupted write never
        // leaves a truncated document at the destination.
        let staging = staging_path(path)?;
        if let Err(err) = fs::write(&staging, document.as_bytes()) {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }
        if let Err(err) = fs::rename(&staging, path) {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }
        info!("wrote figure");
        Ok(())
    }

    fn save_bitmap(
        &self,
        summary: &IntervalSummary,
        true_effects: Option<&[TrueEffect]>,
        path: &Path,
        size: (u32, u32),
    ) -> Result<()> {
        // The bitmap backend writes through the filesystem, so render
        // into a staging file and only rename it into place on success.
        let staging = staging_path(path)?;
        let rendered = (|| -> Result<()> {
            let root = BitMapBackend::new(&staging, size).into_drawing_area();
            self.draw(&root, summary, true_effects)?;
            root.present().map_err(to_draw_err)?;
            Ok(())
        })();

        match rendered {
            Ok(()) => {
                if let Err(err) = fs::rename(&staging, path) {
                    let _ = fs::remove_file(&staging);
                    return Err(err.into());
                }
                info!("wrote figure");
                Ok(())
            }
            Err(err) => {
                let _ = fs::remove_file(&staging);
                Err(err)
            }
        }
    }
}

impl Default for PairedIntervalRenderer {
    fn default() -> Self {
        Self::new(RenderSpec::default())
    }
}

/// Sibling path with the same recognized extension, so the bitmap
/// backend still infers the image format while rendering.
fn staging_path(path: &Path) -> Result<PathBuf> {
    match (
        path.file_stem().and_then(OsStr::to_str),
        path.extension().and_then(OsStr::to_str),
    ) {
        (Some(stem), Some(extension)) => {
            Ok(path.with_file_name(format!("{stem}.partial.{extension}")))
        }
        _ => Err(Error::UnsupportedFormat(path.display().to_string())),
    }
}
