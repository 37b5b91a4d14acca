use foundation::time::{Year, YearRange};

pub struct TemporalAnalysis;

impl TemporalAnalysis {
    /// Rows whose year lies in `range`, both ends inclusive, in input order.
    ///
    /// `YearRange` is always ordered, so reversed brush gestures must be
    /// normalized before they get here.
    pub fn filter_range<T>(rows: &[T], year: impl Fn(&T) -> Year, range: YearRange) -> Vec<&T> {
        rows.iter().filter(|r| range.contains(year(r))).collect()
    }

    pub fn intersects(a: YearRange, b: YearRange) -> bool {
        !(a.end() < b.start() || b.end() < a.start())
    }
}
