//! Axes and grid lines built from a [`LinearScale`]. Every axis here
//! shows whole numbers (years or counts).

use scene::node::{SceneNode, Style, TextAnchor, TextStyle};

use crate::scale::{LinearScale, tick_label};
use crate::symbology::palette;

const TICK_SIZE: f64 = 6.0;

fn tick_text(anchor: TextAnchor) -> TextStyle {
    TextStyle {
        anchor,
        font_size_px: Some(9.0),
        fill: Some(palette::INK.to_string()),
        class: Some("font-mono".to_string()),
        rotate_deg: None,
    }
}

/// Horizontal axis drawn at `y`, labels below the ticks.
pub fn bottom_axis(scale: &LinearScale, y: f64, tick_count: usize) -> SceneNode {
    let (r0, r1) = scale.range();
    let line = Style::stroke(palette::INK, 1.0);
    let mut children = vec![SceneNode::Line {
        from: [r0, 0.0],
        to: [r1, 0.0],
        style: line.clone(),
    }];
    for t in scale.integer_ticks(tick_count) {
        let x = scale.apply(t);
        children.push(SceneNode::Line {
            from: [x, 0.0],
            to: [x, TICK_SIZE],
            style: line.clone(),
        });
        children.push(SceneNode::text(
            [x, TICK_SIZE + 10.0],
            tick_label(t),
            tick_text(TextAnchor::Middle),
        ));
    }
    SceneNode::Group {
        translate: [0.0, y],
        class: Some("axis axis-x".to_string()),
        children,
    }
}

/// Vertical axis drawn at `x`, labels left of the ticks.
pub fn left_axis(scale: &LinearScale, x: f64, tick_count: usize) -> SceneNode {
    let (r0, r1) = scale.range();
    let line = Style::stroke(palette::INK, 1.0);
    let mut children = vec![SceneNode::Line {
        from: [0.0, r0],
        to: [0.0, r1],
        style: line.clone(),
    }];
    for t in scale.integer_ticks(tick_count) {
        let y = scale.apply(t);
        children.push(SceneNode::Line {
            from: [-TICK_SIZE, y],
            to: [0.0, y],
            style: line.clone(),
        });
        children.push(SceneNode::text(
            [-TICK_SIZE - 3.0, y + 3.0],
            tick_label(t),
            tick_text(TextAnchor::End),
        ));
    }
    SceneNode::Group {
        translate: [x, 0.0],
        class: Some("axis axis-y".to_string()),
        children,
    }
}

/// Horizontal grid lines across `width` at the ticks of `scale`.
pub fn horizontal_grid(scale: &LinearScale, width: f64, tick_count: usize) -> SceneNode {
    let children = scale
        .ticks(tick_count)
        .into_iter()
        .map(|t| {
            let y = scale.apply(t);
            SceneNode::Line {
                from: [0.0, y],
                to: [width, y],
                style: Style::stroke(palette::INK, 1.0).with_opacity(0.1),
            }
        })
        .collect();
    SceneNode::Group {
        translate: [0.0, 0.0],
        class: Some("grid".to_string()),
        children,
    }
}
