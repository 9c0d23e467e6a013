//! KPI payload returned by `POST /upload` under `kpi_result`.
//!
//! Every metric is optional. A metric whose value does not match the expected
//! shape is treated as absent rather than failing the whole payload, so the
//! dashboard can still fall back to its defaults for that card or chart.
//! Keys we do not model are kept in [`KpiResponse::extra`] and echoed back
//! unchanged when a report is requested.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiResponse {
    #[serde(
        rename = "Total Workforce by Gender",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub workforce_by_gender: Option<Vec<WorkforceEntry>>,

    #[serde(
        rename = "Percentage of Employees with Disabilities",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub disabilities: Option<DisabilityPercentage>,

    #[serde(
        rename = "Employee Turnover Rate",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub turnover: Option<TurnoverRate>,

    #[serde(
        rename = "Average Training Hours per Employee",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub training: Option<AverageTrainingHours>,

    #[serde(
        rename = "Workplace Injury Rate",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub injury_rate: Option<InjuryRate>,

    #[serde(
        rename = "Workforce by Gender by Organizational Unit",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub workforce_by_org_unit: Option<Vec<OrgUnitWorkforce>>,

    #[serde(
        rename = "Employee Turnover Rate by Organizational Unit",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub turnover_by_org_unit: Option<Vec<OrgUnitTurnover>>,

    /// Metrics this client does not chart. Preserved for the report request.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl KpiResponse {
    /// Workforce rows, or an empty slice when the metric is missing.
    pub fn workforce_entries(&self) -> &[WorkforceEntry] {
        self.workforce_by_gender.as_deref().unwrap_or_default()
    }

    /// Training rows, or an empty slice when the metric or its breakdown is missing.
    pub fn training_breakdown(&self) -> &[TrainingBreakdownEntry] {
        self.training
            .as_ref()
            .map(|training| training.breakdown_by_gender.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkforceEntry {
    pub gender: String,
    pub employee_count: u64,
}

impl WorkforceEntry {
    pub fn new(gender: impl Into<String>, employee_count: u64) -> Self {
        Self {
            gender: gender.into(),
            employee_count,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisabilityBreakdown {
    pub gender: String,
    pub total_employees: u64,
    pub employees_with_disabilities: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisabilityPercentage {
    pub overall_percentage: f64,
    pub total_employees: u64,
    pub total_employees_with_disabilities: u64,
    pub breakdown_by_gender: Vec<DisabilityBreakdown>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnoverRate {
    pub overall_turnover_rate: f64,
    pub total_employees: u64,
    pub total_employees_departed: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingBreakdownEntry {
    pub gender: String,
    pub total_employees: u64,
    pub total_training_hours: f64,
    pub average_hours_per_employee: f64,
}

/// Missing numeric fields stay `None` so the headline cards can fall back
/// to their own defaults instead of showing zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageTrainingHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_average_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_employees: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_training_hours: Option<f64>,
    #[serde(default)]
    pub breakdown_by_gender: Vec<TrainingBreakdownEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InjuryRate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_injury_rate: Option<f64>,
    #[serde(default)]
    pub total_employees: u64,
    #[serde(default)]
    pub total_injuries: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgUnitWorkforce {
    #[serde(rename = "OrganizationalUnitID")]
    pub unit_id: i64,
    #[serde(rename = "OrganizationalUnitName")]
    pub unit_name: String,
    pub genders: Vec<WorkforceEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgUnitTurnover {
    #[serde(rename = "OrganizationalUnitID")]
    pub unit_id: i64,
    #[serde(rename = "OrganizationalUnitName")]
    pub unit_name: String,
    pub total_employees: u64,
    pub total_employees_departed: u64,
    pub turnover_rate: f64,
}

/// Body of a successful `POST /upload`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub kpi_result: KpiResponse,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match serde_json::from_value(value) {
        Ok(metric) => Some(metric),
        Err(err) => {
            tracing::warn!(%err, "ignoring malformed KPI metric");
            None
        }
    }))
}
