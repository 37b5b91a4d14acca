//! Per-view data slices derived from the loaded datasets and a selection.

use formats::{
    CaseRecord, CaseStatus, CaseType, Datasets, DeathTypeRecord, EmploymentRecord, TimelinePoint,
};
use foundation::time::{Year, YearRange};

use crate::analysis::{Aggregate, TemporalAnalysis};

/// How many countries the bubble pack shows.
pub const DEFAULT_BUBBLE_LIMIT: usize = 15;

/// Confirmed / unconfirmed totals of one country.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ImpunitySplit {
    pub confirmed: u64,
    pub unconfirmed: u64,
}

impl ImpunitySplit {
    pub fn total(&self) -> u64 {
        self.confirmed.saturating_add(self.unconfirmed)
    }

    pub fn rate(&self) -> Option<u8> {
        Aggregate::rate(self.confirmed, self.unconfirmed)
    }
}

/// Whether the country appears in the per-country totals.
pub fn has_country_data(ds: &Datasets, country: &str) -> bool {
    ds.country_totals.iter().any(|c| c.country == country)
}

pub fn country_total(ds: &Datasets, country: &str) -> Option<u64> {
    ds.country_totals
        .iter()
        .find(|c| c.country == country)
        .map(|c| c.count)
}

/// Yearly counts of one country, ordered by year.
pub fn country_timeline(ds: &Datasets, country: &str) -> Vec<(Year, u64)> {
    let mut points: Vec<(Year, u64)> = ds
        .country_timeline
        .iter()
        .filter(|p| p.country == country)
        .map(|p| (p.year, p.count))
        .collect();
    points.sort_by_key(|(year, _)| *year);
    points
}

pub fn impunity_split(ds: &Datasets, country: &str) -> ImpunitySplit {
    let count_of = |case_type: CaseType| {
        ds.impunity
            .iter()
            .find(|r| r.country == country && r.case_type == case_type)
            .map(|r| r.count)
            .unwrap_or(0)
    };
    ImpunitySplit {
        confirmed: count_of(CaseType::Confirmed),
        unconfirmed: count_of(CaseType::Unconfirmed),
    }
}

/// Worldwide confirmed / unconfirmed totals.
pub fn global_impunity_split(ds: &Datasets) -> ImpunitySplit {
    let total_of = |case_type: CaseType| {
        ds.impunity
            .iter()
            .filter(|r| r.case_type == case_type)
            .map(|r| r.count)
            .fold(0u64, u64::saturating_add)
    };
    ImpunitySplit {
        confirmed: total_of(CaseType::Confirmed),
        unconfirmed: total_of(CaseType::Unconfirmed),
    }
}

pub fn death_types_for<'a>(ds: &'a Datasets, motive: &str) -> Vec<&'a DeathTypeRecord> {
    ds.death_types.iter().filter(|d| d.motive == motive).collect()
}

pub fn employment_for<'a>(ds: &'a Datasets, motive: &str) -> Vec<&'a EmploymentRecord> {
    ds.employment.iter().filter(|d| d.motive == motive).collect()
}

/// Years covered by the worldwide timeline.
pub fn global_extent(ds: &Datasets) -> Option<YearRange> {
    Aggregate::extent(&ds.global_timeline, |p| p.year).map(|(a, b)| YearRange::normalized(a, b))
}

/// Per-country totals within `range`, largest first, at most `limit`.
pub fn bubbles_in_range(ds: &Datasets, range: YearRange, limit: usize) -> Vec<(String, u64)> {
    let in_range = TemporalAnalysis::filter_range(&ds.bubbles, |p: &TimelinePoint| p.year, range);
    let grouped = Aggregate::group_sum(&in_range, |p| p.country.clone(), |p| p.count);
    Aggregate::top_n(&grouped, limit, |(_, count)| *count)
}

/// Killed / imprisoned totals within `range`, in first-seen order.
pub fn status_in_range(ds: &Datasets, range: YearRange) -> Vec<(CaseStatus, u64)> {
    let in_range = TemporalAnalysis::filter_range(&ds.status_by_year, |r| r.year, range);
    Aggregate::group_sum(&in_range, |r| r.status, |r| r.count)
}

pub fn cases_in_range(ds: &Datasets, range: YearRange) -> Vec<&CaseRecord> {
    TemporalAnalysis::filter_range(&ds.cases, |c| c.year, range)
}
