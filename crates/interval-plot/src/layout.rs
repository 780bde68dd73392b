//! Backend-independent figure geometry
//!
//! Everything positional is computed here in data space: category slots,
//! dodge offsets, facet membership, and the value range shared by both
//! panels. The renderer only maps these marks onto a plotters backend.

use crate::{Error, RenderSpec, Result};
use interval_core::{TrueEffect, SINGLE_FACET};
use interval_summary::{IntervalBounds, IntervalEstimate, IntervalKind, IntervalSummary};
use std::collections::BTreeMap;
use tracing::warn;

/// Dashed reference line spanning part of the category axis
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RefMark {
    pub slot_from: f64,
    pub slot_to: f64,
    pub value: f64,
}

/// One error bar, positioned at its dodged slot
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BarMark {
    pub slot: f64,
    pub lower: f64,
    pub upper: f64,
}

/// One mean marker, positioned at its dodged slot
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PointMark {
    pub slot: f64,
    pub value: f64,
}

/// Marks for one facet sub-chart
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FacetChart {
    /// Facet label, `None` when the chart is not labeled
    pub facet: Option<String>,
    pub refs: Vec<RefMark>,
    pub bars: Vec<BarMark>,
    pub points: Vec<PointMark>,
}

/// One of the two stacked panels
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PanelLayout {
    pub kind: IntervalKind,
    pub caption: String,
    pub facets: Vec<FacetChart>,
}

/// Complete figure geometry shared by both panels
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FigureLayout {
    pub panels: [PanelLayout; 2],
    /// Condition labels in slot order
    pub slots: Vec<String>,
    /// Padded value range shared by every sub-chart
    pub value_range: (f64, f64),
}

/// Caption stating the interval semantics of one panel
pub(crate) fn panel_caption(kind: IntervalKind, coverage: f64) -> String {
    let pct = coverage * 100.0;
    match kind {
        IntervalKind::Ci => {
            format!("Each bar is a {pct:.0}% confidence interval on the mean")
        }
        IntervalKind::Pi => format!("Each bar shows {pct:.0}% of the population"),
    }
}

pub(crate) fn build_layout(
    spec: &RenderSpec,
    summary: &IntervalSummary,
    true_effects: Option<&[TrueEffect]>,
) -> Result<FigureLayout> {
    if !spec.dodge_width.is_finite() || spec.dodge_width < 0.0 {
        return Err(Error::Core(interval_core::Error::InvalidParameter(
            format!("dodge_width {} must be finite and non-negative", spec.dodge_width),
        )));
    }

    let slots = summary.conditions();
    let facets = summary.facets();
    let effects = if spec.draw_reference {
        true_effects.unwrap_or(&[])
    } else {
        &[]
    };

    let panels = [
        build_panel(IntervalKind::Ci, spec, summary, &slots, &facets, effects),
        build_panel(IntervalKind::Pi, spec, summary, &slots, &facets, effects),
    ];

    let value_range = padded_value_range(&panels);

    Ok(FigureLayout {
        panels,
        slots,
        value_range,
    })
}

fn build_panel(
    kind: IntervalKind,
    spec: &RenderSpec,
    summary: &IntervalSummary,
    slots: &[String],
    facets: &[String],
    effects: &[TrueEffect],
) -> PanelLayout {
    let estimates = summary.of_kind(kind);

    let facet_charts: Vec<FacetChart> = if spec.show_facets {
        facets
            .iter()
            .map(|facet| {
                let members: Vec<&IntervalEstimate> = estimates
                    .iter()
                    .filter(|est| &est.key.facet == facet)
                    .collect();
                let label = if facets.len() == 1 && facet == SINGLE_FACET {
                    None
                } else {
                    Some(facet.clone())
                };
                build_facet_chart(
                    label,
                    &members,
                    slots,
                    facets,
                    spec.dodge_width,
                    effects,
                    Some(facet),
                )
            })
            .collect()
    } else {
        let members: Vec<&IntervalEstimate> = estimates.iter().collect();
        vec![build_facet_chart(
            None,
            &members,
            slots,
            facets,
            spec.dodge_width,
            effects,
            None,
        )]
    };

    PanelLayout {
        kind,
        caption: panel_caption(kind, summary.coverage),
        facets: facet_charts,
    }
}

fn build_facet_chart(
    label: Option<String>,
    members: &[&IntervalEstimate],
    slots: &[String],
    known_facets: &[String],
    dodge_width: f64,
    effects: &[TrueEffect],
    facet_filter: Option<&String>,
) -> FacetChart {
    // Bucket estimates by category slot; entries sharing a slot get dodged
    // symmetrically around the slot center.
    let mut by_slot: BTreeMap<usize, Vec<&IntervalEstimate>> = BTreeMap::new();
    for est in members {
        if let Some(slot) = slots.iter().position(|s| s == &est.key.condition) {
            by_slot.entry(slot).or_default().push(est);
        }
    }

    let mut bars = Vec::new();
    let mut points = Vec::new();
    for (slot, entries) in &by_slot {
        let m = entries.len() as f64;
        for (i, est) in entries.iter().enumerate() {
            let offset = dodge_width * (i as f64 - (m - 1.0) / 2.0);
            let position = *slot as f64 + offset;

            match est.bounds {
                IntervalBounds::Known { lower, upper } => bars.push(BarMark {
                    slot: position,
                    lower,
                    upper,
                }),
                IntervalBounds::Undefined => {
                    warn!(
                        group = %est.key,
                        kind = est.kind.name(),
                        n = est.n,
                        "skipping undefined interval bounds"
                    );
                }
            }
            points.push(PointMark {
                slot: position,
                value: est.mean,
            });
        }
    }

    let mut refs = Vec::new();
    for effect in effects {
        let in_scope = match facet_filter {
            Some(facet) => &effect.facet == facet,
            None => known_facets.contains(&effect.facet),
        };
        if !in_scope {
            continue;
        }
        match &effect.condition {
            None => refs.push(RefMark {
                slot_from: -0.5,
                slot_to: slots.len() as f64 - 0.5,
                value: effect.value,
            }),
            Some(condition) => match slots.iter().position(|s| s == condition) {
                Some(slot) => refs.push(RefMark {
                    slot_from: slot as f64 - 0.5,
                    slot_to: slot as f64 + 0.5,
                    value: effect.value,
                }),
                None => {
                    warn!(%condition, facet = %effect.facet, "reference names an unknown condition");
                }
            },
        }
    }

    FacetChart {
        facet: label,
        refs,
        bars,
        points,
    }
}

/// Shared value range over every mark of both panels, with headroom
fn padded_value_range(panels: &[PanelLayout; 2]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for panel in panels {
        for chart in &panel.facets {
            for bar in &chart.bars {
                min = min.min(bar.lower);
                max = max.max(bar.upper);
            }
            for point in &chart.points {
                min = min.min(point.value);
                max = max.max(point.value);
            }
            for reference in &chart.refs {
                min = min.min(reference.value);
                max = max.max(reference.value);
            }
        }
    }

    if !min.is_finite() || !max.is_finite() {
        return (-1.0, 1.0);
    }
    let span = max - min;
    if span <= 0.0 {
        let half = min.abs().max(1.0) * 0.1;
        return (min - half, max + half);
    }
    let pad = 0.1 * span;
    (min - pad, max + pad)
}
