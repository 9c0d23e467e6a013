use dioxus::prelude::*;

use crate::core::{format::format_metric, normalize::HeadlineMetrics};
use crate::t;

#[component]
pub fn MetricCards(metrics: HeadlineMetrics) -> Element {
    let cards = [
        (
            t!("card-total-employees"),
            metrics.total_employees.to_string(),
            None,
        ),
        (
            t!("card-training-hours"),
            format_metric(metrics.total_training_hours),
            Some("S1-6/S1-9"),
        ),
        (
            t!("card-average-training"),
            format_metric(metrics.average_training_hours),
            Some("S1-6/S1-9"),
        ),
        (
            t!("card-injury-rate"),
            format_metric(metrics.injury_rate),
            Some("S1-14"),
        ),
    ];

    rsx! {
        div { class: "metric-grid",
            for (label, value, badge) in cards {
                div { class: "metric-card", key: "{label}",
                    div { class: "metric-card__header",
                        span { class: "metric-card__label", "{label}" }
                        if let Some(badge) = badge {
                            span { class: "badge", "{badge}" }
                        }
                    }
                    strong { class: "metric-card__value", "{value}" }
                }
            }
        }
    }
}
