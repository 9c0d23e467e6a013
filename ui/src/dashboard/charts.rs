use std::f64::consts::{FRAC_PI_2, TAU};

use api::kpi::TrainingBreakdownEntry;
use dioxus::prelude::*;

use crate::core::format::format_number;
use crate::core::normalize::{
    palette_color, WorkforceSlice, BAR_PALETTE, DONUT_PALETTE, GENDER_LEGEND,
};
use crate::t;

const BAR_WIDTH: f64 = 500.0;
const BAR_HEIGHT: f64 = 300.0;
const BAR_PADDING: f64 = 24.0;
const AXIS_BAND: f64 = 28.0;

const DONUT_SIZE: f64 = 300.0;
const DONUT_RADIUS: f64 = 80.0;
const DONUT_THICKNESS: f64 = 40.0;
const DONUT_LABEL_RADIUS: f64 = 122.0;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BarMark {
    pub gender: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: &'static str,
    pub total_hours: f64,
    pub average_hours: f64,
}

/// Bars scaled to the tallest total; colours assigned by position.
pub(crate) fn bar_marks(series: &[TrainingBreakdownEntry]) -> Vec<BarMark> {
    if series.is_empty() {
        return Vec::new();
    }

    let max = series
        .iter()
        .map(|row| row.total_training_hours)
        .filter(|hours| hours.is_finite())
        .fold(0.0_f64, f64::max);
    let max = if max > 0.0 { max } else { 1.0 };

    let plot_width = BAR_WIDTH - 2.0 * BAR_PADDING;
    let plot_height = BAR_HEIGHT - BAR_PADDING - AXIS_BAND;
    let slot = plot_width / series.len() as f64;
    let width = slot * 0.7;

    series
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let share = (row.total_training_hours / max).clamp(0.0, 1.0);
            let height = if share.is_finite() { share * plot_height } else { 0.0 };
            BarMark {
                gender: row.gender.clone(),
                x: BAR_PADDING + index as f64 * slot + (slot - width) / 2.0,
                y: BAR_PADDING + plot_height - height,
                width,
                height,
                color: palette_color(&BAR_PALETTE, index),
                total_hours: row.total_training_hours,
                average_hours: row.average_hours_per_employee,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DonutSegment {
    pub gender: String,
    pub color: &'static str,
    /// Visible stroke length along the ring.
    pub dash: f64,
    /// Remaining ring length, so the dash pattern does not repeat.
    pub gap: f64,
    /// Negated arc length before this slice.
    pub offset: f64,
    pub label: String,
    pub label_x: f64,
    pub label_y: f64,
}

/// Ring segments sized by `value`, starting at 12 o'clock, labelled with
/// the slice percentage.
pub(crate) fn donut_segments(slices: &[WorkforceSlice]) -> Vec<DonutSegment> {
    let total: u64 = slices.iter().map(|slice| slice.value).sum();
    if total == 0 {
        return Vec::new();
    }

    let circumference = TAU * DONUT_RADIUS;
    let center = DONUT_SIZE / 2.0;
    let mut start = 0.0;

    slices
        .iter()
        .enumerate()
        .map(|(index, slice)| {
            let dash = slice.value as f64 / total as f64 * circumference;
            let mid = (start + dash / 2.0) / circumference * TAU - FRAC_PI_2;
            let segment = DonutSegment {
                gender: slice.gender.clone(),
                color: palette_color(&DONUT_PALETTE, index),
                dash,
                gap: circumference - dash,
                offset: -start,
                label: format!("{}%", slice.percentage_label()),
                label_x: center + DONUT_LABEL_RADIUS * mid.cos(),
                label_y: center + DONUT_LABEL_RADIUS * mid.sin(),
            };
            start += dash;
            segment
        })
        .collect()
}

#[component]
pub fn TrainingHoursChart(series: Vec<TrainingBreakdownEntry>) -> Element {
    let marks = bar_marks(&series);
    let baseline = BAR_HEIGHT - AXIS_BAND;
    let axis_end = BAR_WIDTH - BAR_PADDING;
    let view_box = format!("0 0 {BAR_WIDTH} {BAR_HEIGHT}");
    let series_label = t!("chart-training-series");

    rsx! {
        section { class: "chart-card",
            div { class: "chart-card__header",
                h2 { {t!("chart-training-title")} }
                span { class: "badge", "S1-13" }
            }
            ul { class: "chart-legend chart-legend--inline",
                for (label, color) in GENDER_LEGEND {
                    li { key: "{label}", class: "chart-legend__item",
                        span { class: "chart-legend__dot", style: "background-color: {color}" }
                        span { "{label}" }
                    }
                }
            }
            svg {
                class: "chart chart--bar",
                view_box: "{view_box}",
                role: "img",
                "aria-label": "{series_label}",
                line {
                    x1: "{BAR_PADDING}",
                    y1: "{baseline}",
                    x2: "{axis_end}",
                    y2: "{baseline}",
                    class: "chart__axis",
                }
                for (index, mark) in marks.into_iter().enumerate() {
                    {render_bar(index, mark)}
                }
            }
        }
    }
}

/// Keyed by position: the backend may repeat a gender.
fn render_bar(index: usize, mark: BarMark) -> Element {
    let tooltip = format!(
        "{}\n{}\n{}",
        mark.gender,
        t!("chart-training-total", hours = format_number(mark.total_hours, 2)),
        t!("chart-training-average", hours = format_number(mark.average_hours, 2)),
    );
    let center_x = mark.x + mark.width / 2.0;
    let value_y = mark.y + 16.0;
    let axis_y = BAR_HEIGHT - AXIS_BAND + 18.0;
    let value = format_number(mark.total_hours, 0);

    rsx! {
        g { key: "{index}", class: "chart__bar",
            title { "{tooltip}" }
            rect {
                x: "{mark.x}",
                y: "{mark.y}",
                width: "{mark.width}",
                height: "{mark.height}",
                rx: "4",
                fill: "{mark.color}",
            }
            if mark.height > 20.0 {
                text {
                    x: "{center_x}",
                    y: "{value_y}",
                    "text-anchor": "middle",
                    class: "chart__value",
                    "{value}"
                }
            }
            text {
                x: "{center_x}",
                y: "{axis_y}",
                "text-anchor": "middle",
                class: "chart__tick",
                "{mark.gender}"
            }
        }
    }
}

#[component]
pub fn WorkforceDonut(slices: Vec<WorkforceSlice>) -> Element {
    let segments = donut_segments(&slices);
    let center = DONUT_SIZE / 2.0;
    let rotate = format!("rotate(-90 {center} {center})");
    let view_box = format!("0 0 {DONUT_SIZE} {DONUT_SIZE}");
    let legend: Vec<(String, &'static str)> = slices
        .iter()
        .enumerate()
        .map(|(index, slice)| (slice.gender.clone(), palette_color(&DONUT_PALETTE, index)))
        .collect();

    rsx! {
        section { class: "chart-card",
            div { class: "chart-card__header",
                h2 { {t!("chart-workforce-title")} }
                span { class: "badge", "S1-0/S1-9" }
            }
            div { class: "chart-card__body chart-card__body--split",
                ul { class: "chart-legend",
                    for (index, (gender, color)) in legend.into_iter().enumerate() {
                        li { key: "{index}", class: "chart-legend__item",
                            span { class: "chart-legend__swatch", style: "background-color: {color}" }
                            span { "{gender}" }
                        }
                    }
                }
                svg {
                    class: "chart chart--donut",
                    view_box: "{view_box}",
                    role: "img",
                    for (index, segment) in segments.into_iter().enumerate() {
                        g { key: "{index}", class: "chart__slice",
                            title {
                                {t!("chart-workforce-tooltip", gender = segment.gender.clone(), share = segment.label.clone())}
                            }
                            circle {
                                cx: "{center}",
                                cy: "{center}",
                                r: "{DONUT_RADIUS}",
                                fill: "none",
                                stroke: "{segment.color}",
                                stroke_width: "{DONUT_THICKNESS}",
                                "stroke-dasharray": "{segment.dash} {segment.gap}",
                                "stroke-dashoffset": "{segment.offset}",
                                transform: "{rotate}",
                            }
                            text {
                                x: "{segment.label_x}",
                                y: "{segment.label_y}",
                                "text-anchor": "middle",
                                "dominant-baseline": "middle",
                                class: "chart__tick",
                                "{segment.label}"
                            }
                        }
                    }
                }
            }
        }
    }
}
