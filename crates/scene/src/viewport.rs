use std::collections::BTreeMap;

use foundation::bounds::Size;
use foundation::ids::ViewId;

/// Container sizes, one per view.
///
/// Text-only views have no entry; asking for one yields `Size::new(0, 0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewports {
    sizes: BTreeMap<ViewId, Size>,
}

impl Viewports {
    pub fn empty() -> Self {
        Self {
            sizes: BTreeMap::new(),
        }
    }

    pub fn get(&self, view: ViewId) -> Size {
        self.sizes
            .get(&view)
            .copied()
            .unwrap_or(Size::new(0.0, 0.0))
    }

    pub fn set(&mut self, view: ViewId, size: Size) {
        self.sizes.insert(view, size);
    }

    pub fn with(mut self, view: ViewId, size: Size) -> Self {
        self.set(view, size);
        self
    }

    /// Every size multiplied by `factor`, e.g. for a narrower window.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            sizes: self
                .sizes
                .iter()
                .map(|(v, s)| (*v, s.scaled(factor)))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ViewId, Size)> + '_ {
        self.sizes.iter().map(|(v, s)| (*v, *s))
    }
}

impl Default for Viewports {
    /// Desktop layout of the page.
    fn default() -> Self {
        Self::empty()
            .with(ViewId::Map, Size::new(960.0, 520.0))
            .with(ViewId::CountryTimeline, Size::new(360.0, 200.0))
            .with(ViewId::Impunity, Size::new(300.0, 300.0))
            .with(ViewId::MotiveBars, Size::new(560.0, 320.0))
            .with(ViewId::DeathTreemap, Size::new(416.0, 316.0))
            .with(ViewId::EmploymentWaffle, Size::new(280.0, 280.0))
            .with(ViewId::GlobalTimeline, Size::new(960.0, 280.0))
            .with(ViewId::Bubbles, Size::new(480.0, 420.0))
            .with(ViewId::StatusPie, Size::new(220.0, 220.0))
            .with(ViewId::Beeswarm, Size::new(480.0, 420.0))
    }
}
