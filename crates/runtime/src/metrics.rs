use std::collections::BTreeMap;

use foundation::ids::ViewId;

/// Render counters keyed by view.
///
/// Sorted maps keep snapshots stable between runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Metrics {
    renders: BTreeMap<ViewId, u64>,
    placeholders: BTreeMap<ViewId, u64>,
    nodes: BTreeMap<ViewId, Histogram>,
}

/// Distribution of scene sizes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Histogram {
    pub count: u64,
    pub sum: u64,
    pub min: u64,
    pub max: u64,
}

impl Histogram {
    pub fn record(&mut self, value: u64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
        self.sum += value;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewStats {
    pub view: ViewId,
    pub renders: u64,
    pub placeholders: u64,
    pub nodes: Histogram,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.renders.clear();
        self.placeholders.clear();
        self.nodes.clear();
    }

    /// Records one rebuild of `view` that produced `node_count` scene nodes.
    pub fn record_render(&mut self, view: ViewId, node_count: usize, placeholder: bool) {
        *self.renders.entry(view).or_insert(0) += 1;
        if placeholder {
            *self.placeholders.entry(view).or_insert(0) += 1;
        }
        self.nodes
            .entry(view)
            .or_default()
            .record(node_count as u64);
    }

    pub fn renders(&self, view: ViewId) -> u64 {
        self.renders.get(&view).copied().unwrap_or(0)
    }

    pub fn placeholders(&self, view: ViewId) -> u64 {
        self.placeholders.get(&view).copied().unwrap_or(0)
    }

    pub fn total_renders(&self) -> u64 {
        self.renders.values().sum()
    }

    /// Per-view stats in `ViewId` order, for logs.
    pub fn snapshot(&self) -> Vec<ViewStats> {
        self.renders
            .iter()
            .map(|(view, renders)| ViewStats {
                view: *view,
                renders: *renders,
                placeholders: self.placeholders(*view),
                nodes: self.nodes.get(view).copied().unwrap_or_default(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Histogram, Metrics};
    use foundation::ids::ViewId;

    #[test]
    fn renders_accumulate_per_view() {
        let mut m = Metrics::new();
        m.record_render(ViewId::Map, 12, false);
        m.record_render(ViewId::Map, 14, false);
        m.record_render(ViewId::DeathTreemap, 0, true);
        assert_eq!(m.renders(ViewId::Map), 2);
        assert_eq!(m.placeholders(ViewId::DeathTreemap), 1);
        assert_eq!(m.renders(ViewId::Bubbles), 0);
        assert_eq!(m.total_renders(), 3);
    }

    #[test]
    fn histogram_tracks_min_max_sum_count() {
        let mut h = Histogram::default();
        h.record(5);
        h.record(2);
        h.record(7);
        assert_eq!(h.count, 3);
        assert_eq!(h.sum, 14);
        assert_eq!(h.min, 2);
        assert_eq!(h.max, 7);
    }

    #[test]
    fn snapshot_is_in_view_order() {
        let mut m = Metrics::new();
        m.record_render(ViewId::Beeswarm, 3, false);
        m.record_render(ViewId::Map, 1, false);
        let views: Vec<ViewId> = m.snapshot().iter().map(|s| s.view).collect();
        assert_eq!(views, vec![ViewId::Map, ViewId::Beeswarm]);
        m.clear();
        assert!(m.snapshot().is_empty());
    }
}
