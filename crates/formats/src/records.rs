use foundation::time::Year;
use serde::{Deserialize, Serialize};

/// Country value used for rows of the worldwide timeline.
pub const GLOBAL_COUNTRY: &str = "global";

/// Killed-journalist total of one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCount {
    pub country: String,
    #[serde(rename = "killed_count")]
    pub count: u64,
}

/// Count of one country (or [`GLOBAL_COUNTRY`]) in one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub country: String,
    pub year: Year,
    #[serde(rename = "killed_count")]
    pub count: u64,
}

/// Row of the worldwide timeline file, which has no country column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct GlobalTimelineRow {
    pub year: Year,
    pub killed_count: u64,
}

impl From<GlobalTimelineRow> for TimelinePoint {
    fn from(row: GlobalTimelineRow) -> Self {
        TimelinePoint {
            country: GLOBAL_COUNTRY.to_string(),
            year: row.year,
            count: row.killed_count,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseType {
    Confirmed,
    Unconfirmed,
}

impl CaseType {
    pub fn label(self) -> &'static str {
        match self {
            CaseType::Confirmed => "Confirmed",
            CaseType::Unconfirmed => "Unconfirmed",
        }
    }
}

/// Accountability outcome counts of one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpunityRecord {
    pub country: String,
    pub case_type: CaseType,
    pub count: u64,
}

/// Total per motive (overview bar chart).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotiveRecord {
    pub motive: String,
    #[serde(rename = "killed_count")]
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathTypeRecord {
    pub motive: String,
    pub type_of_death: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentRecord {
    pub motive: String,
    pub employment_type: String,
    pub count: u64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Killed,
    Imprisoned,
}

impl CaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CaseStatus::Killed => "killed",
            CaseStatus::Imprisoned => "imprisoned",
        }
    }
}

/// Killed / imprisoned totals per year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusYearRecord {
    pub year: Year,
    #[serde(rename = "case_status")]
    pub status: CaseStatus,
    pub count: u64,
}

/// One raw case, as listed by the beeswarm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub country: String,
    pub year: Year,
    pub case_status: CaseStatus,
    #[serde(default)]
    pub role: Option<String>,
}

impl CaseRecord {
    pub fn role_or_default(&self) -> &str {
        match self.role.as_deref() {
            Some(r) if !r.trim().is_empty() => r,
            _ => "Journalist",
        }
    }
}
