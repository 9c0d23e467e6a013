//! KPI normalization: turns a possibly partial backend payload into
//! chart-ready series and headline numbers.
//!
//! Substitution is all-or-nothing per series. If the backend sends a series
//! at all (non-empty), it is used as-is; otherwise the whole built-in default
//! series is shown. Nothing here fails: "no upload yet" is a normal state.

use api::kpi::{KpiResponse, TrainingBreakdownEntry, WorkforceEntry};

/// Denominator used when the workforce series is missing or sums to zero.
pub const DEFAULT_TOTAL_EMPLOYEES: u64 = 3000;
pub const DEFAULT_TOTAL_TRAINING_HOURS: f64 = 61500.0;
pub const DEFAULT_AVERAGE_TRAINING_HOURS: f64 = 20.5;
pub const DEFAULT_INJURY_RATE: f64 = 0.089;

/// Bar chart palette (training hours).
pub const BAR_PALETTE: [&str; 4] = ["#3b82f6", "#ef4444", "#22c55e", "#a855f7"];
/// Donut chart palette (workforce).
pub const DONUT_PALETTE: [&str; 4] = ["#4A90E2", "#50C878", "#DA70D6", "#FFA500"];

/// Fixed legend shown above the training chart.
pub const GENDER_LEGEND: [(&str, &str); 4] = [
    ("Male", "hsl(210, 70%, 60%)"),
    ("Female", "hsl(155, 70%, 45%)"),
    ("Non-binary", "hsl(45, 70%, 50%)"),
    ("Other", "hsl(300, 70%, 50%)"),
];

/// One slice of the workforce donut.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkforceSlice {
    pub gender: String,
    pub value: u64,
    /// Share of the total, rounded to one decimal place.
    pub percentage: f64,
}

impl WorkforceSlice {
    /// Percentage rendered with exactly one decimal, e.g. `"50.0"`.
    pub fn percentage_label(&self) -> String {
        format!("{:.1}", self.percentage)
    }
}

/// Numbers for the four metric cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlineMetrics {
    pub total_employees: u64,
    pub total_training_hours: f64,
    pub average_training_hours: f64,
    pub injury_rate: f64,
}

/// Sum of `employee_count`. Zero for an empty slice; callers pick the fallback.
pub fn calculate_total_employees(entries: &[WorkforceEntry]) -> u64 {
    entries.iter().map(|entry| entry.employee_count).sum()
}

/// Total active employees, never zero.
pub fn total_employees(kpi: Option<&KpiResponse>) -> u64 {
    let entries = kpi.map(KpiResponse::workforce_entries).unwrap_or_default();
    match calculate_total_employees(entries) {
        0 => DEFAULT_TOTAL_EMPLOYEES,
        total => total,
    }
}

/// Training rows for the bar chart.
pub fn training_series(kpi: Option<&KpiResponse>) -> Vec<TrainingBreakdownEntry> {
    let breakdown = kpi.map(KpiResponse::training_breakdown).unwrap_or_default();
    if breakdown.is_empty() {
        tracing::debug!("no training breakdown in payload; using default series");
        default_training_series()
    } else {
        breakdown.to_vec()
    }
}

/// Workforce slices for the donut, with percentages of [`total_employees`].
pub fn workforce_series(kpi: Option<&KpiResponse>) -> Vec<WorkforceSlice> {
    let entries = kpi.map(KpiResponse::workforce_entries).unwrap_or_default();
    if entries.is_empty() {
        tracing::debug!("no workforce breakdown in payload; using default series");
        return default_workforce_series();
    }

    let total = total_employees(kpi);
    entries
        .iter()
        .map(|entry| WorkforceSlice {
            gender: entry.gender.clone(),
            value: entry.employee_count,
            percentage: percentage_of(entry.employee_count, total),
        })
        .collect()
}

pub fn headline_metrics(kpi: Option<&KpiResponse>) -> HeadlineMetrics {
    let training = kpi.and_then(|k| k.training.as_ref());

    HeadlineMetrics {
        total_employees: total_employees(kpi),
        total_training_hours: training
            .and_then(|t| t.total_training_hours)
            .unwrap_or(DEFAULT_TOTAL_TRAINING_HOURS),
        average_training_hours: training
            .and_then(|t| t.overall_average_hours)
            .unwrap_or(DEFAULT_AVERAGE_TRAINING_HOURS),
        injury_rate: kpi
            .and_then(|k| k.injury_rate.as_ref())
            .and_then(|rate| rate.overall_injury_rate)
            .unwrap_or(DEFAULT_INJURY_RATE),
    }
}

/// Colour for the entry at `index`. Wraps, so entries past the palette
/// length reuse earlier colours.
pub fn palette_color(palette: &[&'static str], index: usize) -> &'static str {
    if palette.is_empty() {
        return "currentColor";
    }
    palette[index % palette.len()]
}

/// `count / total * 100`, rounded to one decimal. Slices are rounded
/// independently, so a series need not add up to exactly 100.
fn percentage_of(count: u64, total: u64) -> f64 {
    let raw = count as f64 / total as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

pub fn default_training_series() -> Vec<TrainingBreakdownEntry> {
    [
        ("Male", 430, 27675.0),
        ("Female", 379, 23575.0),
        ("Non-binary", 26, 8126.0),
        ("Other", 358, 10250.0),
    ]
    .into_iter()
    .map(|(gender, total_employees, total_training_hours)| TrainingBreakdownEntry {
        gender: gender.to_string(),
        total_employees,
        total_training_hours,
        average_hours_per_employee: 2.67,
    })
    .collect()
}

pub fn default_workforce_series() -> Vec<WorkforceSlice> {
    [("Male", 1368, 45.6), ("Female", 1100, 36.7), ("Other", 532, 17.7)]
        .into_iter()
        .map(|(gender, value, percentage)| WorkforceSlice {
            gender: gender.to_string(),
            value,
            percentage,
        })
        .collect()
}
