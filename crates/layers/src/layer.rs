use catalog::NameNormalizer;
use compute::slices::DEFAULT_BUBBLE_LIMIT;
use formats::Datasets;
use foundation::bounds::Size;
use foundation::ids::ViewId;
use scene::node::Scene;
use scene::selection::SelectionState;

use crate::beeswarm::BeeswarmView;
use crate::bubbles::BubblesView;
use crate::country::{CountryTimelineView, ImpunityView};
use crate::labels::{KeyFigureView, SelectedCountryView, SelectedMotiveView};
use crate::map::MapView;
use crate::motives::{DeathTreemapView, EmploymentWaffleView, MotiveBarsView, WaffleLegendView};
use crate::status::StatusPieView;
use crate::timeline::GlobalTimelineView;

/// Tunables shared by the renderers.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderOptions {
    /// Countries shown in the bubble pack.
    pub bubble_limit: usize,
    /// Cells of the employment waffle.
    pub waffle_slots: usize,
    /// Minimum share of the treemap area any death type gets.
    pub treemap_min_share: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            bubble_limit: DEFAULT_BUBBLE_LIMIT,
            waffle_slots: 100,
            treemap_min_share: 0.06,
        }
    }
}

/// Everything a renderer may read.
pub struct RenderContext<'a> {
    pub datasets: &'a Datasets,
    pub names: &'a dyn NameNormalizer,
    pub selection: &'a SelectionState,
    /// Size of the container being rendered.
    pub size: Size,
    pub options: RenderOptions,
}

impl RenderContext<'_> {
    pub fn display_name(&self, identifier: &str) -> String {
        self.names.to_display_name(identifier)
    }
}

/// Builds the complete scene of one container from the context.
///
/// Implementations are pure: the same context always yields the same
/// scene, and an empty slice of data yields [`Scene::Placeholder`].
pub trait ViewRenderer {
    fn view(&self) -> ViewId;
    fn render(&self, ctx: &RenderContext<'_>) -> Scene;
}

pub fn renderer_for(view: ViewId) -> &'static dyn ViewRenderer {
    match view {
        ViewId::Map => &MapView,
        ViewId::CountryTimeline => &CountryTimelineView,
        ViewId::Impunity => &ImpunityView,
        ViewId::KeyTotalVictims => &KeyFigureView::TotalVictims,
        ViewId::KeyDangerousZone => &KeyFigureView::DangerousZone,
        ViewId::KeyImpunityRate => &KeyFigureView::ImpunityRate,
        ViewId::SelectedCountry => &SelectedCountryView,
        ViewId::MotiveBars => &MotiveBarsView,
        ViewId::SelectedMotive => &SelectedMotiveView,
        ViewId::DeathTreemap => &DeathTreemapView,
        ViewId::EmploymentWaffle => &EmploymentWaffleView,
        ViewId::WaffleLegend => &WaffleLegendView,
        ViewId::GlobalTimeline => &GlobalTimelineView,
        ViewId::Bubbles => &BubblesView,
        ViewId::StatusPie => &StatusPieView,
        ViewId::Beeswarm => &BeeswarmView,
    }
}

pub fn render_view(view: ViewId, ctx: &RenderContext<'_>) -> Scene {
    renderer_for(view).render(ctx)
}

#[cfg(test)]
mod tests {
    use super::{RenderContext, RenderOptions, renderer_for};
    use crate::fixtures;
    use catalog::CountryNames;
    use foundation::bounds::Size;
    use foundation::ids::ViewId;
    use scene::selection::SelectionState;

    #[test]
    fn every_view_has_a_matching_renderer() {
        for v in ViewId::ALL {
            assert_eq!(renderer_for(v).view(), v);
        }
    }

    #[test]
    fn empty_datasets_never_panic() {
        let ds = formats::Datasets::default();
        let names = CountryNames::default();
        let sel = SelectionState::default();
        for v in ViewId::ALL {
            let ctx = RenderContext {
                datasets: &ds,
                names: &names,
                selection: &sel,
                size: Size::new(300.0, 200.0),
                options: RenderOptions::default(),
            };
            let _ = renderer_for(v).render(&ctx);
        }
    }

    #[test]
    fn zero_sized_containers_never_panic() {
        let ds = fixtures::datasets();
        let names = CountryNames::default();
        let sel = SelectionState::default();
        for v in ViewId::ALL {
            let ctx = RenderContext {
                datasets: &ds,
                names: &names,
                selection: &sel,
                size: Size::new(0.0, 0.0),
                options: RenderOptions::default(),
            };
            let _ = renderer_for(v).render(&ctx);
        }
    }
}
