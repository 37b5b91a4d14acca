//! Position scales and tick generation.

/// Continuous mapping from a data interval onto a pixel interval.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// A collapsed domain maps every value onto the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (a, b) = self.domain;
        ticks(a.min(b), a.max(b), count)
    }

    /// Ticks that are whole numbers, for years and counts.
    pub fn integer_ticks(&self, count: usize) -> Vec<f64> {
        self.ticks(count)
            .into_iter()
            .filter(|t| (t - t.round()).abs() < 1e-9)
            .collect()
    }
}

/// Round step close to `(stop - start) / count`: 1, 2 or 5 times a power
/// of ten.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start) / count.max(1) as f64;
    if !(raw.is_finite() && raw > 0.0) {
        return 0.0;
    }
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let error = raw / base;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

/// Evenly spaced round values within `[start, stop]`.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if start == stop {
        return vec![start];
    }
    let step = tick_step(start, stop, count);
    if step == 0.0 {
        return Vec::new();
    }
    let first = (start / step).ceil() as i64;
    let last = (stop / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Tick label without trailing fractional noise.
pub fn tick_label(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        let s = format!("{value:.3}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Discrete bands over a pixel interval, padded equally inside and outside.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    keys: Vec<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new(keys: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        let n = keys.len() as f64;
        let (r0, r1) = range;
        let step = (r1 - r0) / (n + padding).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - padding)) / 2.0;
        Self {
            keys,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn position(&self, key: &str) -> Option<f64> {
        self.keys
            .iter()
            .position(|k| k == key)
            .map(|i| self.start + self.step * i as f64)
    }
}
