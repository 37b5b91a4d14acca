use compute::slices::bubbles_in_range;
use foundation::ids::ViewId;
use scene::node::{Scene, SceneNode, Style, TextAnchor, TextStyle};
use scene::selection::Action;

use crate::layer::{RenderContext, ViewRenderer};
use crate::pack::pack;
use crate::symbology::palette;

/// Circle pack of the countries with most victims in the selected range.
pub struct BubblesView;

const PACK_PADDING: f64 = 4.0;
const MAX_FONT_PX: f64 = 11.0;

impl ViewRenderer for BubblesView {
    fn view(&self) -> ViewId {
        ViewId::Bubbles
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Scene {
        let top = bubbles_in_range(ctx.datasets, ctx.selection.range, ctx.options.bubble_limit);
        if top.is_empty() {
            return Scene::Placeholder;
        }
        let values: Vec<u64> = top.iter().map(|(_, count)| *count).collect();
        let circles = pack(&values, ctx.size, PACK_PADDING);

        let nodes = top
            .iter()
            .zip(circles)
            .map(|((country, count), c)| {
                let name = ctx.display_name(country);
                let font = (c.r / 3.0).min(MAX_FONT_PX);
                let circle = SceneNode::circle(
                    [0.0, 0.0],
                    c.r,
                    Style::fill(palette::PAPER).with_stroke(palette::INK, 1.5),
                )
                .with_title(format!("{name}: {count}"))
                .on_click(Action::SelectCountry(country.clone()));
                let label = SceneNode::text(
                    [0.0, font * 0.3],
                    name,
                    TextStyle {
                        anchor: TextAnchor::Middle,
                        font_size_px: Some(font),
                        fill: Some(palette::INK.to_string()),
                        class: Some("font-serif font-bold".to_string()),
                        rotate_deg: None,
                    },
                );
                SceneNode::group(c.center, vec![circle, label])
            })
            .collect();
        Scene::svg(ctx.size, nodes)
    }
}
