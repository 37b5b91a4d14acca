use formats::CaseStatus;

/// Page colours.
pub mod palette {
    pub const STAMP: &str = "#b71c1c";
    pub const INK: &str = "#2b2b2b";
    pub const PAPER: &str = "#f3f0e6";
    pub const PAPER_DARK: &str = "#e3dfd0";
    pub const FREELANCE: &str = "#b5b32e";
    pub const OTHER: &str = "#c58936";
    pub const REDACTION: &str = "#111111";
}

/// Step colour scale: a value below `domain[0]` gets `range[0]`, a value in
/// `[domain[i], domain[i + 1])` gets `range[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdScale {
    domain: Vec<u64>,
    range: Vec<&'static str>,
}

impl ThresholdScale {
    /// `range` must be one longer than `domain`; extra entries are ignored
    /// and missing ones repeat the last colour.
    pub fn new(domain: Vec<u64>, range: Vec<&'static str>) -> Self {
        Self { domain, range }
    }

    /// Scale of the killed-journalists map.
    pub fn choropleth() -> Self {
        Self::new(
            vec![1, 5, 20, 50, 100],
            vec![
                palette::PAPER,
                "#ffcdd2",
                "#ef9a9a",
                "#e57373",
                "#ef5350",
                palette::STAMP,
            ],
        )
    }

    pub fn color(&self, value: u64) -> &'static str {
        let bucket = self.domain.partition_point(|&t| t <= value);
        self.range
            .get(bucket)
            .or_else(|| self.range.last())
            .copied()
            .unwrap_or(palette::PAPER_DARK)
    }
}

/// Fill of a map region: countries without casualties (or without data)
/// get the "no data" tone.
pub fn region_fill(scale: &ThresholdScale, count: Option<u64>) -> &'static str {
    match count {
        Some(v) if v > 0 => scale.color(v),
        _ => palette::PAPER_DARK,
    }
}

/// Waffle cell colour; unknown employment types stay transparent.
pub fn employment_cell_color(employment_type: &str) -> &'static str {
    match employment_type {
        "staff" => palette::INK,
        "freelance" => palette::FREELANCE,
        "other" => palette::OTHER,
        _ => "transparent",
    }
}

/// Legend swatch colour; anything not freelance or other is drawn in ink.
pub fn employment_legend_color(employment_type: &str) -> &'static str {
    match employment_type {
        "freelance" => palette::FREELANCE,
        "other" => palette::OTHER,
        _ => palette::INK,
    }
}

pub fn status_color(status: CaseStatus) -> &'static str {
    match status {
        CaseStatus::Killed => palette::STAMP,
        CaseStatus::Imprisoned => palette::INK,
    }
}
