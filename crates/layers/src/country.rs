//! Views of the selected country: yearly timeline and impunity donut.

use compute::slices::{country_timeline, has_country_data, impunity_split};
use foundation::bounds::{Margin, Rect};
use foundation::ids::ViewId;
use scene::node::{Scene, SceneNode, Style, TextAnchor, TextStyle};

use crate::arc::{arc_path, pie};
use crate::axis::{bottom_axis, left_axis};
use crate::layer::{RenderContext, ViewRenderer};
use crate::scale::LinearScale;
use crate::shape::{area_path, line_path};
use crate::symbology::palette;

pub struct CountryTimelineView;

impl ViewRenderer for CountryTimelineView {
    fn view(&self) -> ViewId {
        ViewId::CountryTimeline
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Scene {
        let country = &ctx.selection.country;
        if !has_country_data(ctx.datasets, country) {
            return Scene::Placeholder;
        }
        let data = country_timeline(ctx.datasets, country);
        let (Some(first), Some(last)) = (data.first(), data.last()) else {
            return Scene::Placeholder;
        };

        let margin = Margin::new(10.0, 15.0, 25.0, 30.0);
        let (w, h) = (ctx.size.width, ctx.size.height);
        let max = data.iter().map(|(_, c)| *c).max().unwrap_or(0);
        let x = LinearScale::new(
            (f64::from(first.0), f64::from(last.0)),
            (margin.left, w - margin.right),
        );
        let y = LinearScale::new((0.0, max as f64), (h - margin.bottom, margin.top));
        let points: Vec<[f64; 2]> = data
            .iter()
            .map(|(year, count)| [x.apply(f64::from(*year)), y.apply(*count as f64)])
            .collect();

        Scene::svg(
            ctx.size,
            vec![
                bottom_axis(&x, h - margin.bottom, 5),
                left_axis(&y, margin.left, 3),
                SceneNode::path(
                    area_path(&points, h - margin.bottom),
                    Style::fill(palette::STAMP).with_opacity(0.2),
                ),
                SceneNode::path(line_path(&points), Style::stroke(palette::STAMP, 2.0)),
            ],
        )
    }
}

/// Share of cases without confirmed accountability for the selected country.
pub struct ImpunityView;

const LEGEND_ROW: f64 = 18.0;

impl ViewRenderer for ImpunityView {
    fn view(&self) -> ViewId {
        ViewId::Impunity
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Scene {
        let country = &ctx.selection.country;
        if !has_country_data(ctx.datasets, country) {
            return Scene::Placeholder;
        }
        let split = impunity_split(ctx.datasets, country);
        let Some(rate) = split.rate() else {
            return Scene::Placeholder;
        };

        let (top, bottom) = (5.0, 60.0);
        let (w, h) = (ctx.size.width, ctx.size.height);
        let radius = ((w.min(h - bottom)) / 2.0 - 5.0).max(0.0);

        let parts = [
            ("Unconfirmed", split.unconfirmed, palette::STAMP),
            ("Confirmed", split.confirmed, palette::INK),
        ];
        let values: Vec<u64> = parts.iter().map(|(_, v, _)| *v).collect();
        let mut donut: Vec<SceneNode> = pie(&values, false)
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(|s| {
                let (label, value, color) = parts[s.index];
                SceneNode::path(
                    arc_path(radius * 0.6, radius, s.start_angle, s.end_angle),
                    Style::fill(color).with_stroke(palette::PAPER, 2.0),
                )
                .with_title(format!("{label}: {value}"))
            })
            .collect();
        donut.push(SceneNode::text(
            [0.0, 0.0],
            format!("{rate}%"),
            TextStyle {
                anchor: TextAnchor::Middle,
                class: Some("font-serif font-bold text-3xl".to_string()),
                ..TextStyle::default()
            },
        ));

        let legend = parts
            .iter()
            .enumerate()
            .flat_map(|(i, (label, value, color))| {
                let y = i as f64 * LEGEND_ROW;
                [
                    SceneNode::rect(Rect::new(0.0, y, 10.0, 10.0), Style::fill(*color)),
                    SceneNode::text(
                        [20.0, y + 10.0],
                        format!("{}: {value}", label.to_uppercase()),
                        TextStyle {
                            class: Some("font-mono".to_string()),
                            font_size_px: Some(15.0),
                            ..TextStyle::default()
                        },
                    ),
                ]
            })
            .collect();

        Scene::svg(
            ctx.size,
            vec![
                SceneNode::group([w / 2.0, radius + top], donut),
                SceneNode::group([w / 2.0 - 55.0, radius * 2.0 + top + 15.0], legend),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{CountryTimelineView, ImpunityView};
    use crate::fixtures;
    use crate::layer::{RenderContext, RenderOptions, ViewRenderer};
    use catalog::CountryNames;
    use foundation::bounds::Size;
    use scene::node::{Scene, SceneNode};
    use scene::selection::SelectionState;

    fn render(view: &dyn ViewRenderer, country: &str) -> Scene {
        let ds = fixtures::datasets();
        let names = CountryNames::default();
        let mut sel = SelectionState::default();
        sel.country = country.to_string();
        let ctx = RenderContext {
            datasets: &ds,
            names: &names,
            selection: &sel,
            size: Size::new(360.0, 300.0),
            options: RenderOptions::default(),
        };
        view.render(&ctx)
    }

    #[test]
    fn impunity_rate_is_centred_with_legend() {
        let scene = render(&ImpunityView, "Mexico");
        let texts = scene.texts();
        assert_eq!(texts, vec!["80%", "UNCONFIRMED: 40", "CONFIRMED: 10"]);
        let arcs = scene
            .svg_nodes()
            .into_iter()
            .filter(|n| matches!(n, SceneNode::Path { .. }))
            .count();
        assert_eq!(arcs, 2);
    }

    #[test]
    fn country_without_data_shows_placeholder() {
        assert!(render(&ImpunityView, "Atlantis").is_placeholder());
        assert!(render(&CountryTimelineView, "Atlantis").is_placeholder());
    }

    #[test]
    fn country_without_impunity_rows_shows_placeholder() {
        assert!(render(&ImpunityView, "Syria").is_placeholder());
    }

    #[test]
    fn timeline_draws_area_and_line() {
        let scene = render(&CountryTimelineView, "Mexico");
        let paths: Vec<&SceneNode> = scene
            .svg_nodes()
            .into_iter()
            .filter(|n| matches!(n, SceneNode::Path { .. }))
            .collect();
        assert_eq!(paths.len(), 2);
        assert!(scene.texts().contains(&"2010".to_string()));
        assert!(scene.texts().contains(&"2012".to_string()));
    }

    #[test]
    fn single_year_timeline_renders() {
        let scene = render(&CountryTimelineView, "Syria");
        assert!(!scene.is_placeholder());
    }
}
