//! World choropleth of killed journalists per country.

use std::collections::HashMap;

use formats::CountryShape;
use foundation::ids::ViewId;
use foundation::math::Mercator;
use scene::node::{Scene, SceneNode, Style};
use scene::selection::Action;
use scene::svg::num;

use crate::layer::{RenderContext, ViewRenderer};
use crate::symbology::{ThresholdScale, palette, region_fill};

/// Horizontal copies of the world, in world widths, so panning wraps.
const WORLD_OFFSETS: [f64; 3] = [-1.0, 0.0, 1.0];

pub struct MapView;

/// Projection filling the container the way the page frames the world.
pub fn projection_for(width: f64, height: f64) -> Mercator {
    Mercator::new(width / 6.5, [width / 2.0, height / 1.4])
}

/// SVG path of every ring of the shape; empty for null geometries.
pub fn shape_path(projection: &Mercator, shape: &CountryShape) -> String {
    let mut d = String::new();
    for polygon in &shape.polygons {
        for ring in polygon {
            for (i, [lon, lat]) in ring.iter().enumerate() {
                let [x, y] = projection.project(*lon, *lat);
                d.push(if i == 0 { 'M' } else { 'L' });
                d.push_str(&num(x));
                d.push(',');
                d.push_str(&num(y));
            }
            if !ring.is_empty() {
                d.push('Z');
            }
        }
    }
    d
}

impl ViewRenderer for MapView {
    fn view(&self) -> ViewId {
        ViewId::Map
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Scene {
        let ds = ctx.datasets;
        if ds.world.is_empty() {
            return Scene::Placeholder;
        }
        let projection = projection_for(ctx.size.width, ctx.size.height);
        let scale = ThresholdScale::choropleth();
        let counts: HashMap<&str, u64> = ds
            .country_totals
            .iter()
            .map(|c| (c.country.as_str(), c.count))
            .collect();

        // Paths are the same for every copy; only the translation differs.
        let regions: Vec<SceneNode> = ds
            .world
            .iter()
            .filter(|shape| !shape.polygons.is_empty())
            .map(|shape| {
                let id = ctx.names.to_data_identifier(&shape.name);
                let selected = id == ctx.selection.country;
                let (stroke, width) = if selected {
                    (palette::STAMP, 1.5)
                } else {
                    (palette::INK, 0.5)
                };
                let count = counts.get(id.as_str()).copied();
                let title = match count {
                    Some(n) => format!("{}: {n}", ctx.display_name(&id)),
                    None => ctx.display_name(&id),
                };
                let style = Style::fill(region_fill(&scale, count))
                    .with_stroke(stroke, width)
                    .with_class(if selected {
                        "country-path selected"
                    } else {
                        "country-path"
                    });
                let node =
                    SceneNode::path(shape_path(&projection, shape), style).with_title(title);
                // Unnamed shapes cannot be selected.
                if shape.name.trim().is_empty() {
                    node
                } else {
                    node.on_click(Action::SelectCountry(id))
                }
            })
            .collect();

        let world_width = projection.world_width();
        let copies = WORLD_OFFSETS
            .iter()
            .map(|offset| SceneNode::group([offset * world_width, 0.0], regions.clone()))
            .collect();
        Scene::svg(
            ctx.size,
            vec![SceneNode::Group {
                translate: [0.0, 0.0],
                class: Some("map".to_string()),
                children: copies,
            }],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{MapView, projection_for, shape_path};
    use crate::fixtures;
    use crate::layer::{RenderContext, RenderOptions, ViewRenderer};
    use crate::symbology::palette;
    use catalog::CountryNames;
    use formats::{CountryShape, Datasets};
    use foundation::bounds::Size;
    use scene::node::{Scene, SceneNode, Style};
    use scene::selection::{Action, SelectionState};

    fn render(ds: &Datasets, sel: &SelectionState) -> Scene {
        let names = CountryNames::default();
        let ctx = RenderContext {
            datasets: ds,
            names: &names,
            selection: sel,
            size: Size::new(650.0, 400.0),
            options: RenderOptions::default(),
        };
        MapView.render(&ctx)
    }

    fn region_styles(scene: &Scene) -> Vec<(String, Style)> {
        scene
            .svg_nodes()
            .into_iter()
            .filter_map(|n| match n {
                SceneNode::Path {
                    style,
                    title: Some(t),
                    ..
                } => Some((t.clone(), style.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn world_is_drawn_three_times() {
        let ds = fixtures::datasets();
        let scene = render(&ds, &SelectionState::default());
        assert_eq!(region_styles(&scene).len(), 9);
        assert_eq!(scene.actions().len(), 9);
    }

    #[test]
    fn fills_follow_counts_through_name_overrides() {
        let ds = fixtures::datasets();
        let scene = render(&ds, &SelectionState::default());
        let styles = region_styles(&scene);
        let fill_of = |title: &str| {
            styles
                .iter()
                .find(|(t, _)| t == title)
                .and_then(|(_, s)| s.fill.clone())
        };
        // Syria's geo spelling resolves to the data row (120 victims).
        assert_eq!(
            fill_of("Syrian Arab Republic: 120").as_deref(),
            Some(palette::STAMP)
        );
        assert_eq!(fill_of("Mexico: 90").as_deref(), Some("#ef5350"));
        assert_eq!(fill_of("Iceland").as_deref(), Some(palette::PAPER_DARK));
    }

    #[test]
    fn selected_country_is_outlined_and_clicks_select_data_ids() {
        let ds = fixtures::datasets();
        let mut sel = SelectionState::default();
        sel.country = "Syria".to_string();
        let scene = render(&ds, &sel);
        let styles = region_styles(&scene);
        let (_, syria) = styles
            .iter()
            .find(|(t, _)| t.starts_with("Syrian"))
            .expect("syria drawn");
        assert_eq!(syria.stroke.as_deref(), Some(palette::STAMP));
        assert_eq!(syria.stroke_width, Some(1.5));
        assert!(
            scene
                .actions()
                .contains(&&Action::SelectCountry("Syria".to_string()))
        );
    }

    #[test]
    fn unnamed_shapes_are_drawn_but_not_clickable() {
        let mut ds = fixtures::datasets();
        let mut unnamed = ds.world[0].clone();
        unnamed.name = String::new();
        ds.world.push(unnamed);
        let scene = render(&ds, &SelectionState::default());
        assert_eq!(region_styles(&scene).len(), 12);
        assert_eq!(scene.actions().len(), 9);
        assert!(
            !scene
                .actions()
                .contains(&&Action::SelectCountry(String::new()))
        );
    }

    #[test]
    fn no_shapes_means_placeholder() {
        assert!(render(&Datasets::default(), &SelectionState::default()).is_placeholder());
    }

    #[test]
    fn equator_meridian_projects_to_translate() {
        let p = projection_for(650.0, 420.0);
        let shape = CountryShape {
            id: None,
            name: "dot".to_string(),
            polygons: vec![vec![vec![[0.0, 0.0], [0.0, 0.0]]]],
        };
        assert_eq!(shape_path(&p, &shape), "M325,300L325,300Z");
    }
}
