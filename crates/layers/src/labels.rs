//! Text-only views: headline figures and selection labels.

use compute::KeyFigures;
use foundation::ids::ViewId;
use scene::node::Scene;

use crate::layer::{RenderContext, ViewRenderer};

/// One of the three headline numbers next to the map.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyFigureView {
    TotalVictims,
    DangerousZone,
    ImpunityRate,
}

impl ViewRenderer for KeyFigureView {
    fn view(&self) -> ViewId {
        match self {
            KeyFigureView::TotalVictims => ViewId::KeyTotalVictims,
            KeyFigureView::DangerousZone => ViewId::KeyDangerousZone,
            KeyFigureView::ImpunityRate => ViewId::KeyImpunityRate,
        }
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Scene {
        let figures = KeyFigures::compute(ctx.datasets);
        let text = match self {
            KeyFigureView::TotalVictims => figures.total_victims_text(),
            KeyFigureView::DangerousZone => match &figures.dangerous_zone {
                Some(id) => ctx.display_name(id),
                None => "N/A".to_string(),
            },
            KeyFigureView::ImpunityRate => figures.impunity_rate_text(),
        };
        Scene::Text(text)
    }
}

/// `[REG: NAME]` tag of the selected country.
pub struct SelectedCountryView;

impl ViewRenderer for SelectedCountryView {
    fn view(&self) -> ViewId {
        ViewId::SelectedCountry
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Scene {
        let name = ctx.display_name(&ctx.selection.country);
        Scene::Text(format!("[REG: {}]", name.to_uppercase()))
    }
}

pub struct SelectedMotiveView;

impl ViewRenderer for SelectedMotiveView {
    fn view(&self) -> ViewId {
        ViewId::SelectedMotive
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Scene {
        Scene::Text(ctx.selection.motive.to_uppercase())
    }
}
