//! Motive overview and the breakdowns of the selected motive.

use compute::Aggregate;
use compute::slices::{death_types_for, employment_for};
use foundation::bounds::{Margin, Rect, Size};
use foundation::ids::ViewId;
use scene::node::{HtmlNode, Scene, SceneNode, Style, TextAnchor, TextStyle};
use scene::selection::Action;

use crate::layer::{RenderContext, ViewRenderer};
use crate::scale::{BandScale, LinearScale};
use crate::symbology::{employment_cell_color, employment_legend_color, palette};
use crate::treemap::squarify;

fn mono(anchor: TextAnchor, size: f64) -> TextStyle {
    TextStyle {
        anchor,
        font_size_px: Some(size),
        fill: Some(palette::INK.to_string()),
        class: Some("font-mono".to_string()),
        rotate_deg: None,
    }
}

/// Horizontal bars of victims per motive; clicking a bar selects it.
pub struct MotiveBarsView;

impl ViewRenderer for MotiveBarsView {
    fn view(&self) -> ViewId {
        ViewId::MotiveBars
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Scene {
        let motives = &ctx.datasets.motives;
        if motives.is_empty() {
            return Scene::Placeholder;
        }
        let margin = Margin::new(10.0, 40.0, 20.0, 120.0);
        let plot = margin.inner(ctx.size);
        let max = Aggregate::max(motives, |m| m.count).unwrap_or(0).max(1);
        let x = LinearScale::new((0.0, max as f64), (0.0, plot.width));
        let y = BandScale::new(
            motives.iter().map(|m| m.motive.clone()).collect(),
            (0.0, plot.height),
            0.4,
        );
        let band = y.bandwidth();

        let mut children = Vec::with_capacity(motives.len() * 3);
        for m in motives {
            let top = y.position(&m.motive).unwrap_or(0.0);
            let selected = m.motive == ctx.selection.motive;
            let fill = if selected { palette::STAMP } else { palette::INK };
            let width = x.apply(m.count as f64);
            children.push(
                SceneNode::rect(
                    Rect::new(0.0, top, width, band),
                    Style::fill(fill).with_class(if selected { "bar selected" } else { "bar" }),
                )
                .with_title(format!("{}: {}", m.motive, m.count))
                .on_click(Action::SelectMotive(m.motive.clone())),
            );
            children.push(SceneNode::text(
                [-15.0, top + band / 2.0 + 4.0],
                m.motive.clone(),
                mono(TextAnchor::End, 13.0),
            ));
            children.push(SceneNode::text(
                [width + 10.0, top + band / 2.0 + 5.0],
                m.count.to_string(),
                mono(TextAnchor::Start, 13.0),
            ));
        }
        Scene::svg(ctx.size, vec![SceneNode::group([plot.x, plot.y], children)])
    }
}

/// Treemap of how victims of the selected motive died.
pub struct DeathTreemapView;

/// Inset of the treemap inside its container.
const TREEMAP_INSET: f64 = 16.0;

/// Cells narrower than this get no label.
const LABEL_MIN_WIDTH: f64 = 45.0;

/// Cells narrower than this wrap their label after the first word.
const LABEL_WRAP_WIDTH: f64 = 100.0;

fn cell_label(label: &str, width: f64) -> Vec<String> {
    if width <= LABEL_MIN_WIDTH {
        return Vec::new();
    }
    match label.split_once(' ') {
        Some((head, rest)) if width < LABEL_WRAP_WIDTH => vec![head.to_string(), rest.to_string()],
        _ => vec![label.to_string()],
    }
}

impl ViewRenderer for DeathTreemapView {
    fn view(&self) -> ViewId {
        ViewId::DeathTreemap
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Scene {
        let mut rows = death_types_for(ctx.datasets, &ctx.selection.motive);
        let total = Aggregate::sum(&rows, |r| r.count);
        if total == 0 {
            return Scene::Placeholder;
        }
        // Biggest first: cell order drives the fading opacity.
        rows.sort_by(|a, b| b.count.cmp(&a.count));

        let size = Size::new(
            (ctx.size.width - TREEMAP_INSET).max(0.0),
            (ctx.size.height - TREEMAP_INSET).max(0.0),
        );
        let floor = total as f64 * ctx.options.treemap_min_share;
        let weights: Vec<f64> = rows.iter().map(|r| (r.count as f64).max(floor)).collect();
        let cells = squarify(&weights, Rect::new(0.0, 0.0, size.width, size.height), 2.0);

        let nodes = rows
            .iter()
            .zip(cells)
            .enumerate()
            .map(|(i, (row, cell))| {
                let x0 = cell.x.round();
                let y0 = cell.y.round();
                let w = cell.right().round() - x0;
                let h = cell.bottom().round() - y0;
                let opacity = ((100.0 - 15.0 * i as f64) / 100.0).max(0.1);
                let rect = SceneNode::rect(
                    Rect::new(0.0, 0.0, w, h),
                    Style::fill(palette::INK)
                        .with_stroke(palette::PAPER, 1.0)
                        .with_opacity(opacity),
                )
                .with_title(format!("{}: {} cases", row.type_of_death, row.count));
                let mut children = vec![rect];
                let lines = cell_label(&row.type_of_death, w);
                if !lines.is_empty() {
                    children.push(SceneNode::Text {
                        origin: [8.0, 22.0],
                        lines,
                        line_height_em: 1.2,
                        style: TextStyle {
                            anchor: TextAnchor::Start,
                            font_size_px: Some(11.0),
                            fill: Some(palette::PAPER.to_string()),
                            class: Some("font-mono uppercase".to_string()),
                            rotate_deg: None,
                        },
                    });
                }
                SceneNode::group([x0, y0], children)
            })
            .collect();
        Scene::svg(size, nodes)
    }
}

/// Ten-by-ten grid of employment types of the selected motive.
pub struct EmploymentWaffleView;

const WAFFLE_MAX_SIZE: f64 = 260.0;
const WAFFLE_GAP: f64 = 3.0;

impl ViewRenderer for EmploymentWaffleView {
    fn view(&self) -> ViewId {
        ViewId::EmploymentWaffle
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Scene {
        let rows = employment_for(ctx.datasets, &ctx.selection.motive);
        let slots = ctx.options.waffle_slots;
        let cells = Aggregate::proportional_fill(
            &rows,
            |r| r.count,
            |r| r.employment_type.clone(),
            slots,
        );
        if cells.is_empty() {
            return Scene::Placeholder;
        }
        let columns = (slots as f64).sqrt().ceil().max(1.0) as usize;
        let size = WAFFLE_MAX_SIZE.min(ctx.size.height - 20.0);
        let cell = size / columns as f64 - WAFFLE_GAP;
        if cell <= 0.0 {
            return Scene::Placeholder;
        }

        let nodes = cells
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                let x = (i % columns) as f64 * (cell + WAFFLE_GAP);
                let y = (i / columns) as f64 * (cell + WAFFLE_GAP);
                SceneNode::Rect {
                    rect: Rect::new(x, y, cell, cell),
                    style: Style::fill(employment_cell_color(kind)).with_stroke(palette::INK, 1.0),
                    rx: 1.0,
                    title: Some(kind.to_string()),
                }
            })
            .collect();
        Scene::svg(Size::new(size, size), nodes)
    }
}

/// Colour key of the waffle with each type's share.
pub struct WaffleLegendView;

impl ViewRenderer for WaffleLegendView {
    fn view(&self) -> ViewId {
        ViewId::WaffleLegend
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Scene {
        let rows = employment_for(ctx.datasets, &ctx.selection.motive);
        let total = Aggregate::sum(&rows, |r| r.count);
        let items = rows
            .iter()
            .map(|r| {
                let share = Aggregate::rounded_share(r.count, total, 100);
                let color = employment_legend_color(&r.employment_type);
                HtmlNode::element(
                    "div",
                    "flex items-center",
                    vec![
                        HtmlNode::element("span", "w-4 h-4 mr-2 border border-ink", vec![])
                            .with_style(format!("background-color: {color}")),
                        HtmlNode::element(
                            "span",
                            "uppercase",
                            vec![HtmlNode::text(r.employment_type.clone())],
                        ),
                        HtmlNode::element(
                            "span",
                            "ml-1 opacity-60",
                            vec![HtmlNode::text(format!("{share}%"))],
                        ),
                    ],
                )
            })
            .collect();
        Scene::Html(items)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DeathTreemapView, EmploymentWaffleView, MotiveBarsView, WaffleLegendView, cell_label,
    };
    use crate::fixtures;
    use crate::layer::{RenderContext, RenderOptions, ViewRenderer};
    use crate::symbology::palette;
    use catalog::CountryNames;
    use formats::Datasets;
    use foundation::bounds::Size;
    use pretty_assertions::assert_eq;
    use scene::node::{Scene, SceneNode};
    use scene::selection::{Action, SelectionState};

    fn render_with(view: &dyn ViewRenderer, ds: &Datasets, motive: &str, size: Size) -> Scene {
        let names = CountryNames::default();
        let mut sel = SelectionState::default();
        sel.motive = motive.to_string();
        let ctx = RenderContext {
            datasets: ds,
            names: &names,
            selection: &sel,
            size,
            options: RenderOptions::default(),
        };
        view.render(&ctx)
    }

    fn render(view: &dyn ViewRenderer, motive: &str) -> Scene {
        render_with(view, &fixtures::datasets(), motive, Size::new(560.0, 320.0))
    }

    fn rect_fills(scene: &Scene) -> Vec<String> {
        scene
            .svg_nodes()
            .into_iter()
            .filter_map(|n| match n {
                SceneNode::Rect { style, .. } => style.fill.clone(),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn default_motive_bar_is_highlighted() {
        let scene = render(&MotiveBarsView, "Confirmed");
        assert_eq!(rect_fills(&scene), vec![palette::STAMP, palette::INK]);
        assert_eq!(
            scene.actions(),
            vec![
                &Action::SelectMotive("Confirmed".to_string()),
                &Action::SelectMotive("Unconfirmed".to_string()),
            ]
        );
        assert!(scene.texts().contains(&"500".to_string()));
        assert!(scene.texts().contains(&"120".to_string()));
    }

    #[test]
    fn treemap_cells_fade_and_carry_tooltips() {
        let scene = render(&DeathTreemapView, "Confirmed");
        let rects: Vec<(Option<f64>, Option<String>)> = scene
            .svg_nodes()
            .into_iter()
            .filter_map(|n| match n {
                SceneNode::Rect { style, title, .. } => Some((style.opacity, title.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(
            rects,
            vec![
                (Some(1.0), Some("Murder: 380 cases".to_string())),
                (Some(0.85), Some("Crossfire: 100 cases".to_string())),
                (Some(0.7), Some("Dangerous Assignment: 20 cases".to_string())),
            ]
        );
    }

    #[test]
    fn small_categories_still_get_a_visible_cell() {
        let scene = render(&DeathTreemapView, "Confirmed");
        let widths: Vec<f64> = scene
            .svg_nodes()
            .into_iter()
            .filter_map(|n| match n {
                SceneNode::Rect { rect, .. } => Some(rect.area()),
                _ => None,
            })
            .collect();
        // 20 of 500 cases is raised to 6% of the total weight.
        let total: f64 = widths.iter().sum();
        assert!(widths[2] / total > 0.04);
    }

    #[test]
    fn labels_hide_on_narrow_cells_and_wrap_on_medium_ones() {
        assert!(cell_label("Crossfire", 40.0).is_empty());
        assert_eq!(cell_label("Dangerous Assignment", 80.0), vec!["Dangerous", "Assignment"]);
        assert_eq!(cell_label("Dangerous Assignment", 120.0), vec!["Dangerous Assignment"]);
        assert_eq!(cell_label("Murder", 60.0), vec!["Murder"]);
    }

    #[test]
    fn waffle_has_one_cell_per_slot() {
        let scene = render(&EmploymentWaffleView, "Confirmed");
        let fills = rect_fills(&scene);
        assert_eq!(fills.len(), 100);
        assert_eq!(fills.iter().filter(|f| *f == palette::INK).count(), 60);
        assert_eq!(fills.iter().filter(|f| *f == palette::FREELANCE).count(), 30);
        assert_eq!(fills.iter().filter(|f| *f == palette::OTHER).count(), 10);
        let Scene::Svg(svg) = &scene else {
            panic!("waffle is svg");
        };
        assert_eq!(svg.size, Size::new(260.0, 260.0));
    }

    #[test]
    fn legend_lists_shares() {
        let scene = render(&WaffleLegendView, "Confirmed");
        assert_eq!(
            scene.texts(),
            vec!["staff", "60%", "freelance", "30%", "other", "10%"]
        );
    }

    #[test]
    fn motive_without_breakdown_shows_placeholder() {
        assert!(render(&DeathTreemapView, "Unconfirmed").is_placeholder());
        assert!(render(&EmploymentWaffleView, "Unconfirmed").is_placeholder());
        assert_eq!(render(&WaffleLegendView, "Unconfirmed"), Scene::Html(vec![]));
    }

    #[test]
    fn empty_overview_shows_placeholder() {
        let scene = render_with(
            &MotiveBarsView,
            &Datasets::default(),
            "Confirmed",
            Size::new(560.0, 320.0),
        );
        assert!(scene.is_placeholder());
    }
}
