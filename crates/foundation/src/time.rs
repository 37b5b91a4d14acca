/// Calendar year as it appears in the datasets.
pub type Year = i32;

/// Inclusive range of years.
///
/// Invariant: `start <= end`. Every constructor normalizes, so a range
/// built from a reversed drag gesture is still ordered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct YearRange {
    start: Year,
    end: Year,
}

impl YearRange {
    /// Builds a range from two endpoints in either order.
    pub fn normalized(a: Year, b: Year) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Builds a range from raw (fractional) brush positions.
    ///
    /// Both endpoints are rounded to the nearest year before ordering.
    pub fn from_brush(a: f64, b: f64) -> Option<Self> {
        if !a.is_finite() || !b.is_finite() {
            return None;
        }
        Some(Self::normalized(a.round() as Year, b.round() as Year))
    }

    pub fn single(year: Year) -> Self {
        Self {
            start: year,
            end: year,
        }
    }

    pub fn start(&self) -> Year {
        self.start
    }

    pub fn end(&self) -> Year {
        self.end
    }

    pub fn contains(&self, year: Year) -> bool {
        year >= self.start && year <= self.end
    }

    /// Number of years covered, counting both endpoints.
    pub fn year_count(&self) -> u32 {
        self.end.abs_diff(self.start).saturating_add(1)
    }

    /// Clamps both endpoints into `bounds`.
    pub fn clamp_to(&self, bounds: YearRange) -> Self {
        Self::normalized(
            self.start.clamp(bounds.start, bounds.end),
            self.end.clamp(bounds.start, bounds.end),
        )
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}–{}", self.start, self.end)
    }
}
