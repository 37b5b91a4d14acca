use compute::slices::status_in_range;
use foundation::bounds::Size;
use foundation::ids::ViewId;
use scene::node::{HtmlNode, Scene, SceneNode, Style};

use crate::arc::{arc_path, pie};
use crate::layer::{RenderContext, ViewRenderer};
use crate::symbology::{palette, status_color};

/// Killed versus imprisoned within the selected range.
pub struct StatusPieView;

const PIE_SIZE: f64 = 220.0;
const INNER_RADIUS: f64 = 35.0;
const OUTER_RADIUS: f64 = 105.0;

impl ViewRenderer for StatusPieView {
    fn view(&self) -> ViewId {
        ViewId::StatusPie
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Scene {
        let totals = status_in_range(ctx.datasets, ctx.selection.range);
        let values: Vec<u64> = totals.iter().map(|(_, count)| *count).collect();
        let slices = pie(&values, true);
        if slices.is_empty() {
            return Scene::Placeholder;
        }

        let arcs = slices
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| {
                let (status, count) = totals[s.index];
                SceneNode::path(
                    arc_path(INNER_RADIUS, OUTER_RADIUS, s.start_angle, s.end_angle),
                    Style::fill(status_color(status)).with_stroke(palette::PAPER, 1.0),
                )
                .with_title(format!("{}: {count}", status.as_str()))
            })
            .collect();
        let chart = Scene::svg(
            Size::new(PIE_SIZE, PIE_SIZE),
            vec![SceneNode::group([PIE_SIZE / 2.0, PIE_SIZE / 2.0], arcs)],
        );

        let entries = totals
            .iter()
            .map(|(status, count)| {
                HtmlNode::element(
                    "span",
                    "status-entry",
                    vec![HtmlNode::text(format!(
                        "{}: {count}",
                        status.as_str().to_uppercase()
                    ))],
                )
                .with_style(format!("color: {}", status_color(*status)))
            })
            .collect();
        let legend = Scene::Html(vec![HtmlNode::element(
            "div",
            "flex gap-3 mt-4 text-[15px] font-mono font-bold",
            entries,
        )]);
        Scene::Stack(vec![chart, legend])
    }
}

#[cfg(test)]
mod tests {
    use super::StatusPieView;
    use crate::fixtures;
    use crate::layer::{RenderContext, RenderOptions, ViewRenderer};
    use crate::symbology::palette;
    use catalog::CountryNames;
    use foundation::bounds::Size;
    use foundation::time::YearRange;
    use scene::node::{Scene, SceneNode};
    use scene::selection::SelectionState;

    fn render(range: YearRange) -> Scene {
        let ds = fixtures::datasets();
        let names = CountryNames::default();
        let mut sel = SelectionState::default();
        sel.range = range;
        let ctx = RenderContext {
            datasets: &ds,
            names: &names,
            selection: &sel,
            size: Size::new(300.0, 300.0),
            options: RenderOptions::default(),
        };
        StatusPieView.render(&ctx)
    }

    #[test]
    fn legend_and_slices_follow_range() {
        let scene = render(YearRange::normalized(2011, 2015));
        assert_eq!(scene.texts(), vec!["KILLED: 75", "IMPRISONED: 230"]);
        let fills: Vec<Option<String>> = scene
            .svg_nodes()
            .into_iter()
            .filter_map(|n| match n {
                SceneNode::Path { style, .. } => Some(style.fill.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            fills,
            vec![
                Some(palette::STAMP.to_string()),
                Some(palette::INK.to_string())
            ]
        );
    }

    #[test]
    fn single_status_is_a_full_ring() {
        let scene = render(YearRange::single(2009));
        assert_eq!(scene.texts(), vec!["KILLED: 70"]);
        assert_eq!(scene.svg_nodes().len(), 2);
    }

    #[test]
    fn empty_range_shows_placeholder() {
        assert!(render(YearRange::single(2020)).is_placeholder());
    }
}
