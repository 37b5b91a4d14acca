use std::collections::BTreeSet;

use foundation::ids::{Scope, ViewId};
use foundation::time::YearRange;

use crate::viewport::Viewports;

/// The three independent selection axes of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    /// Data identifier of the selected country.
    pub country: String,
    pub motive: String,
    pub range: YearRange,
}

impl SelectionState {
    pub fn new(country: impl Into<String>, motive: impl Into<String>, range: YearRange) -> Self {
        Self {
            country: country.into(),
            motive: motive.into(),
            range,
        }
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new("Mexico", "Confirmed", YearRange::normalized(2011, 2015))
    }
}

/// Tagged update, the only way selection changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Click on a map region or a country-scoped chart element.
    SelectCountry(String),
    /// Click on a motive bar.
    SelectMotive(String),
    /// Brush over the global timeline; raw (fractional) year positions in
    /// either order.
    SelectRange { start: f64, end: f64 },
    /// Container sizes changed.
    Resize(Viewports),
}

/// Views that must be rebuilt after a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Invalidation {
    views: BTreeSet<ViewId>,
}

impl Invalidation {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            views: ViewId::ALL.into_iter().collect(),
        }
    }

    pub fn scope(scope: Scope) -> Self {
        Self {
            views: ViewId::in_scope(scope).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn contains(&self, view: ViewId) -> bool {
        self.views.contains(&view)
    }

    /// Views in `ViewId` order.
    pub fn iter(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.views.iter().copied()
    }
}

/// Owner of the selection state and container sizes.
///
/// Renderers only ever see `&SelectionState`; `dispatch` is the single
/// writer.
#[derive(Debug, Clone)]
pub struct Store {
    state: SelectionState,
    viewports: Viewports,
    range_bounds: Option<YearRange>,
    revision: u64,
}

impl Store {
    pub fn new(state: SelectionState, viewports: Viewports) -> Self {
        Self {
            state,
            viewports,
            range_bounds: None,
            revision: 0,
        }
    }

    /// Restricts brushed ranges to `bounds` (the years the timeline covers).
    /// The current range is clamped immediately.
    pub fn with_range_bounds(mut self, bounds: Option<YearRange>) -> Self {
        self.range_bounds = bounds;
        if let Some(b) = bounds {
            self.state.range = self.state.range.clamp_to(b);
        }
        self
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn viewports(&self) -> &Viewports {
        &self.viewports
    }

    /// Number of dispatches that changed something.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn dispatch(&mut self, action: Action) -> Invalidation {
        let invalidation = match action {
            Action::SelectCountry(country) => {
                if self.state.country == country {
                    return Invalidation::none();
                }
                self.state.country = country;
                Invalidation::scope(Scope::Country)
            }
            Action::SelectMotive(motive) => {
                if self.state.motive == motive {
                    return Invalidation::none();
                }
                self.state.motive = motive;
                Invalidation::scope(Scope::Motive)
            }
            Action::SelectRange { start, end } => {
                let Some(mut range) = YearRange::from_brush(start, end) else {
                    return Invalidation::none();
                };
                if let Some(b) = self.range_bounds {
                    range = range.clamp_to(b);
                }
                if self.state.range == range {
                    return Invalidation::none();
                }
                self.state.range = range;
                Invalidation::scope(Scope::Range)
            }
            Action::Resize(viewports) => {
                if self.viewports == viewports {
                    return Invalidation::none();
                }
                self.viewports = viewports;
                Invalidation::all()
            }
        };
        self.revision += 1;
        invalidation
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, Invalidation, SelectionState, Store};
    use crate::viewport::Viewports;
    use foundation::ids::ViewId;
    use foundation::time::YearRange;

    fn store() -> Store {
        Store::new(SelectionState::default(), Viewports::default())
    }

    #[test]
    fn defaults_match_page_start() {
        let s = store();
        assert_eq!(s.state().country, "Mexico");
        assert_eq!(s.state().motive, "Confirmed");
        assert_eq!(s.state().range, YearRange::normalized(2011, 2015));
    }

    #[test]
    fn country_click_invalidates_country_views_only() {
        let mut s = store();
        let inv = s.dispatch(Action::SelectCountry("Syria".to_string()));
        assert!(inv.contains(ViewId::Map));
        assert!(inv.contains(ViewId::Impunity));
        assert!(inv.contains(ViewId::SelectedCountry));
        assert!(!inv.contains(ViewId::MotiveBars));
        assert_eq!(s.state().country, "Syria");
        assert_eq!(s.revision(), 1);
    }

    #[test]
    fn repeated_selection_is_a_no_op() {
        let mut s = store();
        assert!(s.dispatch(Action::SelectMotive("Confirmed".to_string())).is_empty());
        assert_eq!(s.revision(), 0);
    }

    #[test]
    fn reversed_brush_is_normalized() {
        let mut s = store();
        let inv = s.dispatch(Action::SelectRange {
            start: 2015.2,
            end: 2009.9,
        });
        assert!(inv.contains(ViewId::Beeswarm));
        assert_eq!(s.state().range, YearRange::normalized(2010, 2015));
    }

    #[test]
    fn brush_is_clamped_to_timeline_bounds() {
        let mut s = store().with_range_bounds(Some(YearRange::normalized(1992, 2024)));
        s.dispatch(Action::SelectRange {
            start: 1980.0,
            end: 2030.0,
        });
        assert_eq!(s.state().range, YearRange::normalized(1992, 2024));
    }

    #[test]
    fn non_finite_brush_is_ignored() {
        let mut s = store();
        let inv = s.dispatch(Action::SelectRange {
            start: f64::NAN,
            end: 2012.0,
        });
        assert!(inv.is_empty());
        assert_eq!(s.state().range, YearRange::normalized(2011, 2015));
    }

    #[test]
    fn resize_invalidates_everything() {
        let mut s = store();
        let inv = s.dispatch(Action::Resize(Viewports::default().scaled(0.5)));
        assert_eq!(inv, Invalidation::all());
        assert!(s.dispatch(Action::Resize(Viewports::default().scaled(0.5))).is_empty());
    }
}
