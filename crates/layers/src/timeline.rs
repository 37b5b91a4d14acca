//! Worldwide yearly timeline with the selected range as a brush band.

use compute::Aggregate;
use foundation::bounds::{Margin, Rect};
use foundation::ids::ViewId;
use scene::node::{Scene, SceneNode, Style, TextAnchor, TextStyle};

use crate::axis::{bottom_axis, horizontal_grid, left_axis};
use crate::layer::{RenderContext, ViewRenderer};
use crate::scale::LinearScale;
use crate::shape::line_path;
use crate::symbology::palette;

pub struct GlobalTimelineView;

/// Pixel layout shared by the renderer and brush hit-testing.
pub struct TimelineFrame {
    pub margin: Margin,
    pub x: LinearScale,
    pub y: LinearScale,
    pub plot: Rect,
}

impl TimelineFrame {
    pub fn new(ctx: &RenderContext<'_>) -> Option<Self> {
        let rows = &ctx.datasets.global_timeline;
        let (first, last) = Aggregate::extent(rows, |p| p.year)?;
        let max = Aggregate::max(rows, |p| p.count).unwrap_or(0);
        let margin = Margin::new(20.0, 30.0, 30.0, 60.0);
        let plot = margin.inner(ctx.size);
        let x = LinearScale::new((f64::from(first), f64::from(last)), (0.0, plot.width));
        let top = if max == 0 { 1.0 } else { max as f64 * 1.1 };
        let y = LinearScale::new((0.0, top), (plot.height, 0.0));
        Some(Self { margin, x, y, plot })
    }

    /// Year under a horizontal pixel of the plot area (fractional).
    pub fn year_at(&self, px: f64) -> f64 {
        self.x.invert(px)
    }
}

impl ViewRenderer for GlobalTimelineView {
    fn view(&self) -> ViewId {
        ViewId::GlobalTimeline
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Scene {
        let Some(frame) = TimelineFrame::new(ctx) else {
            return Scene::Placeholder;
        };
        let mut rows: Vec<(f64, f64)> = ctx
            .datasets
            .global_timeline
            .iter()
            .map(|p| (f64::from(p.year), p.count as f64))
            .collect();
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));
        let points: Vec<[f64; 2]> = rows
            .iter()
            .map(|(year, count)| [frame.x.apply(*year), frame.y.apply(*count)])
            .collect();

        let range = ctx.selection.range;
        let x0 = frame.x.apply(f64::from(range.start()));
        let x1 = frame.x.apply(f64::from(range.end()));
        let (lo, hi) = (x0.min(x1).max(0.0), x0.max(x1).min(frame.plot.width));
        let brush = SceneNode::rect(
            Rect::new(lo, 0.0, (hi - lo).max(0.0), frame.plot.height),
            Style::fill(palette::INK)
                .with_opacity(0.15)
                .with_stroke(palette::STAMP, 1.0)
                .with_class("brush-selection"),
        )
        .with_title(range.to_string());

        let mut axis_y = left_axis(&frame.y, 0.0, 5);
        if let SceneNode::Group { children, .. } = &mut axis_y {
            children.push(SceneNode::text(
                [-45.0, frame.plot.height / 2.0],
                "Victims",
                TextStyle {
                    anchor: TextAnchor::Middle,
                    font_size_px: Some(10.0),
                    fill: Some(palette::INK.to_string()),
                    class: Some("uppercase tracking-widest".to_string()),
                    rotate_deg: Some(-90.0),
                },
            ));
        }

        Scene::svg(
            ctx.size,
            vec![SceneNode::group(
                [frame.margin.left, frame.margin.top],
                vec![
                    horizontal_grid(&frame.y, frame.plot.width, 5),
                    SceneNode::path(line_path(&points), Style::stroke(palette::INK, 2.0)),
                    bottom_axis(&frame.x, frame.plot.height, 10),
                    axis_y,
                    brush,
                ],
            )],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{GlobalTimelineView, TimelineFrame};
    use crate::fixtures;
    use crate::layer::{RenderContext, RenderOptions, ViewRenderer};
    use catalog::CountryNames;
    use formats::Datasets;
    use foundation::bounds::Size;
    use foundation::time::YearRange;
    use scene::node::{Scene, SceneNode};
    use scene::selection::SelectionState;

    fn with_ctx<R>(ds: &Datasets, range: YearRange, f: impl FnOnce(&RenderContext<'_>) -> R) -> R {
        let names = CountryNames::default();
        let mut sel = SelectionState::default();
        sel.range = range;
        let ctx = RenderContext {
            datasets: ds,
            names: &names,
            selection: &sel,
            size: Size::new(790.0, 250.0),
            options: RenderOptions::default(),
        };
        f(&ctx)
    }

    fn brush_of(scene: &Scene) -> (f64, f64, Option<String>) {
        scene
            .svg_nodes()
            .into_iter()
            .find_map(|n| match n {
                SceneNode::Rect { rect, title, .. } => Some((rect.x, rect.width, title.clone())),
                _ => None,
            })
            .expect("brush drawn")
    }

    #[test]
    fn brush_spans_selected_years() {
        let ds = fixtures::datasets();
        // Plot width 700 over 2009..2016: 100 px per year.
        let scene = with_ctx(&ds, YearRange::normalized(2011, 2015), |ctx| {
            GlobalTimelineView.render(ctx)
        });
        let (x, width, title) = brush_of(&scene);
        assert!((x - 200.0).abs() < 1e-9);
        assert!((width - 400.0).abs() < 1e-9);
        assert_eq!(title.as_deref(), Some("2011–2015"));
        assert!(scene.texts().contains(&"Victims".to_string()));
    }

    #[test]
    fn pixel_positions_invert_to_years() {
        let ds = fixtures::datasets();
        let year = with_ctx(&ds, YearRange::single(2012), |ctx| {
            TimelineFrame::new(ctx).map(|f| f.year_at(350.0))
        });
        assert_eq!(year, Some(2012.5));
    }

    #[test]
    fn missing_timeline_shows_placeholder() {
        let scene = with_ctx(&Datasets::default(), YearRange::single(2012), |ctx| {
            GlobalTimelineView.render(ctx)
        });
        assert!(scene.is_placeholder());
    }
}
