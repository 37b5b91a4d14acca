use std::collections::HashMap;
use std::hash::Hash;

/// Pure aggregation over in-memory rows.
///
/// Every operation is deterministic: ties resolve by input order and
/// grouped output keeps the order in which keys were first seen.
pub struct Aggregate;

impl Aggregate {
    /// Total of `field`; 0 for no rows. Saturates at `u64::MAX`.
    pub fn sum<T>(rows: &[T], field: impl Fn(&T) -> u64) -> u64 {
        rows.iter().map(field).fold(0u64, u64::saturating_add)
    }

    /// Row with the largest `field`. The first of several equal maxima wins.
    pub fn argmax<T>(rows: &[T], field: impl Fn(&T) -> u64) -> Option<&T> {
        let mut best: Option<(&T, u64)> = None;
        for row in rows {
            let v = field(row);
            if best.map(|(_, bv)| v > bv).unwrap_or(true) {
                best = Some((row, v));
            }
        }
        best.map(|(row, _)| row)
    }

    pub fn max<T>(rows: &[T], field: impl Fn(&T) -> u64) -> Option<u64> {
        rows.iter().map(field).max()
    }

    /// Smallest and largest value of `field`.
    pub fn extent<T, V: Copy + Ord>(rows: &[T], field: impl Fn(&T) -> V) -> Option<(V, V)> {
        let mut it = rows.iter().map(field);
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Share of unconfirmed cases as a rounded percentage (halves round up).
    ///
    /// `None` when there are no cases at all; callers render a placeholder.
    pub fn rate(confirmed: u64, unconfirmed: u64) -> Option<u8> {
        let total = confirmed.checked_add(unconfirmed)?;
        if total == 0 {
            return None;
        }
        let total = u128::from(total);
        let pct = (200 * u128::from(unconfirmed) + total) / (2 * total);
        Some(pct as u8)
    }

    /// Sums `value` per `key`, keys in first-seen order.
    pub fn group_sum<T, K>(
        rows: &[T],
        key: impl Fn(&T) -> K,
        value: impl Fn(&T) -> u64,
    ) -> Vec<(K, u64)>
    where
        K: Eq + Hash + Clone,
    {
        let mut index: HashMap<K, usize> = HashMap::new();
        let mut out: Vec<(K, u64)> = Vec::new();
        for row in rows {
            let k = key(row);
            match index.get(&k) {
                Some(&i) => out[i].1 = out[i].1.saturating_add(value(row)),
                None => {
                    index.insert(k.clone(), out.len());
                    out.push((k, value(row)));
                }
            }
        }
        out
    }

    /// The `n` rows with the largest `field`, descending; equal values keep
    /// their input order.
    pub fn top_n<T: Clone>(rows: &[T], n: usize, field: impl Fn(&T) -> u64) -> Vec<T> {
        let mut sorted: Vec<T> = rows.to_vec();
        // `sort_by` is stable.
        sorted.sort_by(|a, b| field(b).cmp(&field(a)));
        sorted.truncate(n);
        sorted
    }

    /// Spreads category counts over exactly `slots` discrete cells.
    ///
    /// Each category receives `round(share * slots)` cells in input order
    /// until the grid is full; a rounding shortfall is padded with the first
    /// category. Lossy by construction. Empty input or a zero total yields
    /// no cells.
    pub fn proportional_fill<T, L: Clone>(
        rows: &[T],
        value: impl Fn(&T) -> u64,
        label: impl Fn(&T) -> L,
        slots: usize,
    ) -> Vec<L> {
        let total = Self::sum(rows, &value);
        let Some(first) = rows.first() else {
            return Vec::new();
        };
        if total == 0 || slots == 0 {
            return Vec::new();
        }

        let mut out = Vec::with_capacity(slots);
        for row in rows {
            let cells = Self::rounded_share(value(row), total, slots as u64) as usize;
            let room = slots - out.len();
            out.extend(std::iter::repeat_n(label(row), cells.min(room)));
        }
        let pad = slots - out.len();
        out.extend(std::iter::repeat_n(label(first), pad));
        out
    }

    /// `round(part / total * scale)` with halves rounding up.
    pub fn rounded_share(part: u64, total: u64, scale: u64) -> u64 {
        if total == 0 {
            return 0;
        }
        let total = u128::from(total);
        ((2 * u128::from(part) * u128::from(scale) + total) / (2 * total)) as u64
    }
}
