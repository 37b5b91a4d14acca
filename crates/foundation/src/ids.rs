/// Which selection axis a view depends on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    /// Rendered once from the full datasets; only a resize redraws it.
    Static,
    Country,
    Motive,
    Range,
}

/// Logical view of the page, one per output container.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewId {
    Map,
    CountryTimeline,
    Impunity,
    KeyTotalVictims,
    KeyDangerousZone,
    KeyImpunityRate,
    SelectedCountry,
    MotiveBars,
    SelectedMotive,
    DeathTreemap,
    EmploymentWaffle,
    WaffleLegend,
    GlobalTimeline,
    Bubbles,
    StatusPie,
    Beeswarm,
}

impl ViewId {
    pub const ALL: [ViewId; 16] = [
        ViewId::Map,
        ViewId::CountryTimeline,
        ViewId::Impunity,
        ViewId::KeyTotalVictims,
        ViewId::KeyDangerousZone,
        ViewId::KeyImpunityRate,
        ViewId::SelectedCountry,
        ViewId::MotiveBars,
        ViewId::SelectedMotive,
        ViewId::DeathTreemap,
        ViewId::EmploymentWaffle,
        ViewId::WaffleLegend,
        ViewId::GlobalTimeline,
        ViewId::Bubbles,
        ViewId::StatusPie,
        ViewId::Beeswarm,
    ];

    /// DOM id of the container this view renders into.
    pub const fn container_id(self) -> &'static str {
        match self {
            ViewId::Map => "map-viz",
            ViewId::CountryTimeline => "timeline-viz",
            ViewId::Impunity => "impunity-viz",
            ViewId::KeyTotalVictims => "key-total-victims",
            ViewId::KeyDangerousZone => "key-dangerous-zone",
            ViewId::KeyImpunityRate => "key-impunity-rate",
            ViewId::SelectedCountry => "selected-country-label",
            ViewId::MotiveBars => "motive-bar-chart",
            ViewId::SelectedMotive => "selected-motive-label",
            ViewId::DeathTreemap => "death-treemap",
            ViewId::EmploymentWaffle => "employment-waffle",
            ViewId::WaffleLegend => "waffle-legend",
            ViewId::GlobalTimeline => "timeline-chart",
            ViewId::Bubbles => "bubble-chart",
            ViewId::StatusPie => "status-pie-chart",
            ViewId::Beeswarm => "beeswarm-chart",
        }
    }

    pub fn from_container_id(id: &str) -> Option<ViewId> {
        ViewId::ALL.into_iter().find(|v| v.container_id() == id)
    }

    pub const fn scope(self) -> Scope {
        match self {
            ViewId::Map
            | ViewId::CountryTimeline
            | ViewId::Impunity
            | ViewId::SelectedCountry => Scope::Country,
            ViewId::MotiveBars
            | ViewId::SelectedMotive
            | ViewId::DeathTreemap
            | ViewId::EmploymentWaffle
            | ViewId::WaffleLegend => Scope::Motive,
            ViewId::GlobalTimeline | ViewId::Bubbles | ViewId::StatusPie | ViewId::Beeswarm => {
                Scope::Range
            }
            ViewId::KeyTotalVictims | ViewId::KeyDangerousZone | ViewId::KeyImpunityRate => {
                Scope::Static
            }
        }
    }

    pub fn in_scope(scope: Scope) -> impl Iterator<Item = ViewId> {
        ViewId::ALL.into_iter().filter(move |v| v.scope() == scope)
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.container_id())
    }
}
