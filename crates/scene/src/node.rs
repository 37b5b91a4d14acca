use foundation::bounds::{Rect, Size};

use crate::selection::Action;

/// Paint attributes shared by SVG shapes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub opacity: Option<f64>,
    pub class: Option<String>,
}

impl Style {
    pub fn fill(color: impl Into<String>) -> Self {
        Self {
            fill: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn stroke(color: impl Into<String>, width: f64) -> Self {
        Self {
            fill: Some("none".to_string()),
            stroke: Some(color.into()),
            stroke_width: Some(width),
            ..Self::default()
        }
    }

    pub fn with_stroke(mut self, color: impl Into<String>, width: f64) -> Self {
        self.stroke = Some(color.into());
        self.stroke_width = Some(width);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    pub anchor: TextAnchor,
    pub font_size_px: Option<f64>,
    pub fill: Option<String>,
    pub class: Option<String>,
    /// Rotation in degrees around the text origin.
    pub rotate_deg: Option<f64>,
}

/// One element of an SVG scene description.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Group {
        translate: [f64; 2],
        class: Option<String>,
        children: Vec<SceneNode>,
    },
    Rect {
        rect: Rect,
        style: Style,
        rx: f64,
        title: Option<String>,
    },
    Circle {
        center: [f64; 2],
        r: f64,
        style: Style,
        title: Option<String>,
    },
    Path {
        d: String,
        style: Style,
        title: Option<String>,
    },
    Line {
        from: [f64; 2],
        to: [f64; 2],
        style: Style,
    },
    /// Multi-line text; lines after the first are offset by `line_height_em`.
    Text {
        origin: [f64; 2],
        lines: Vec<String>,
        line_height_em: f64,
        style: TextStyle,
    },
    /// Clicking the child dispatches `action`.
    Interactive {
        action: Action,
        child: Box<SceneNode>,
    },
}

impl SceneNode {
    pub fn group(translate: [f64; 2], children: Vec<SceneNode>) -> Self {
        SceneNode::Group {
            translate,
            class: None,
            children,
        }
    }

    pub fn rect(rect: Rect, style: Style) -> Self {
        SceneNode::Rect {
            rect,
            style,
            rx: 0.0,
            title: None,
        }
    }

    pub fn circle(center: [f64; 2], r: f64, style: Style) -> Self {
        SceneNode::Circle {
            center,
            r,
            style,
            title: None,
        }
    }

    pub fn path(d: impl Into<String>, style: Style) -> Self {
        SceneNode::Path {
            d: d.into(),
            style,
            title: None,
        }
    }

    pub fn text(origin: [f64; 2], text: impl Into<String>, style: TextStyle) -> Self {
        SceneNode::Text {
            origin,
            lines: vec![text.into()],
            line_height_em: 1.2,
            style,
        }
    }

    pub fn on_click(self, action: Action) -> Self {
        SceneNode::Interactive {
            action,
            child: Box::new(self),
        }
    }

    /// Attaches a tooltip to shapes that support one; other nodes are unchanged.
    pub fn with_title(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            SceneNode::Rect { title, .. }
            | SceneNode::Circle { title, .. }
            | SceneNode::Path { title, .. } => *title = Some(text.into()),
            _ => {}
        }
        self
    }

    /// Depth-first visit of this node and its descendants.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a SceneNode)) {
        f(self);
        match self {
            SceneNode::Group { children, .. } => {
                for c in children {
                    c.walk(f);
                }
            }
            SceneNode::Interactive { child, .. } => child.walk(f),
            _ => {}
        }
    }
}

/// One element of an HTML scene description.
#[derive(Debug, Clone, PartialEq)]
pub enum HtmlNode {
    Element {
        tag: &'static str,
        class: Option<String>,
        style: Option<String>,
        title: Option<String>,
        children: Vec<HtmlNode>,
    },
    Text(String),
    LineBreak,
}

impl HtmlNode {
    pub fn element(tag: &'static str, class: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Element {
            tag,
            class: Some(class.into()),
            style: None,
            title: None,
            children,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        HtmlNode::Text(text.into())
    }

    pub fn with_style(mut self, css: impl Into<String>) -> Self {
        if let HtmlNode::Element { style, .. } = &mut self {
            *style = Some(css.into());
        }
        self
    }

    pub fn with_title(mut self, text: impl Into<String>) -> Self {
        if let HtmlNode::Element { title, .. } = &mut self {
            *title = Some(text.into());
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SvgScene {
    pub size: Size,
    pub nodes: Vec<SceneNode>,
}

pub const NO_DATA_MESSAGE: &str = "NO SUCH DATA";

/// Complete content of one container. Every render replaces the previous
/// scene of that container wholesale.
#[derive(Debug, Clone, PartialEq)]
pub enum Scene {
    Svg(SvgScene),
    Html(Vec<HtmlNode>),
    Text(String),
    /// Shown instead of a chart when there is nothing to draw.
    Placeholder,
    /// Several parts stacked in document order (e.g. chart plus legend).
    Stack(Vec<Scene>),
}

impl Scene {
    pub fn svg(size: Size, nodes: Vec<SceneNode>) -> Self {
        Scene::Svg(SvgScene { size, nodes })
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Scene::Placeholder)
    }

    /// All SVG nodes of the scene, depth first.
    pub fn svg_nodes(&self) -> Vec<&SceneNode> {
        let mut out = Vec::new();
        self.collect_svg(&mut out);
        out
    }

    fn collect_svg<'a>(&'a self, out: &mut Vec<&'a SceneNode>) {
        match self {
            Scene::Svg(svg) => {
                for n in &svg.nodes {
                    n.walk(&mut |node| out.push(node));
                }
            }
            Scene::Stack(parts) => {
                for p in parts {
                    p.collect_svg(out);
                }
            }
            _ => {}
        }
    }

    /// Actions reachable from clickable nodes, in document order.
    pub fn actions(&self) -> Vec<&Action> {
        self.svg_nodes()
            .into_iter()
            .filter_map(|n| match n {
                SceneNode::Interactive { action, .. } => Some(action),
                _ => None,
            })
            .collect()
    }

    /// Every piece of visible text (SVG text lines, HTML text, plain text).
    pub fn texts(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts(&self, out: &mut Vec<String>) {
        match self {
            Scene::Svg(_) => {
                for n in self.svg_nodes() {
                    if let SceneNode::Text { lines, .. } = n {
                        out.extend(lines.iter().cloned());
                    }
                }
            }
            Scene::Html(nodes) => collect_html_texts(nodes, out),
            Scene::Text(t) => out.push(t.clone()),
            Scene::Placeholder => out.push(NO_DATA_MESSAGE.to_string()),
            Scene::Stack(parts) => {
                for p in parts {
                    p.collect_texts(out);
                }
            }
        }
    }
}

fn collect_html_texts(nodes: &[HtmlNode], out: &mut Vec<String>) {
    for n in nodes {
        match n {
            HtmlNode::Element { children, .. } => collect_html_texts(children, out),
            HtmlNode::Text(t) => out.push(t.clone()),
            HtmlNode::LineBreak => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HtmlNode, Scene, SceneNode, Style, TextStyle};
    use crate::selection::Action;
    use foundation::bounds::{Rect, Size};

    #[test]
    fn walk_reaches_nested_interactive_children() {
        let bar = SceneNode::rect(Rect::new(0.0, 0.0, 10.0, 5.0), Style::fill("#000"))
            .on_click(Action::SelectMotive("Confirmed".to_string()));
        let scene = Scene::svg(
            Size::new(100.0, 100.0),
            vec![SceneNode::group([5.0, 5.0], vec![bar])],
        );
        assert_eq!(scene.svg_nodes().len(), 3);
        assert_eq!(
            scene.actions(),
            vec![&Action::SelectMotive("Confirmed".to_string())]
        );
    }

    #[test]
    fn texts_cover_every_scene_kind() {
        let scene = Scene::Stack(vec![
            Scene::svg(
                Size::new(10.0, 10.0),
                vec![SceneNode::text([0.0, 0.0], "80%", TextStyle::default())],
            ),
            Scene::Html(vec![HtmlNode::element(
                "div",
                "legend",
                vec![HtmlNode::text("KILLED: 3")],
            )]),
            Scene::Placeholder,
        ]);
        assert_eq!(scene.texts(), vec!["80%", "KILLED: 3", "NO SUCH DATA"]);
    }

    #[test]
    fn title_only_applies_to_shapes() {
        let c = SceneNode::circle([0.0, 0.0], 1.0, Style::default()).with_title("x");
        assert!(matches!(c, SceneNode::Circle { title: Some(_), .. }));
        let t = SceneNode::text([0.0, 0.0], "a", TextStyle::default()).with_title("x");
        assert!(matches!(t, SceneNode::Text { .. }));
    }
}
