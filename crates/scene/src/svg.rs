//! Markup serialization of scene descriptions.

use std::fmt::Write;

use crate::node::{HtmlNode, Scene, SceneNode, Style, SvgScene, TextStyle};
use crate::selection::Action;

/// Turns clickable nodes into links. The server maps actions onto query
/// strings; static exports have no links at all.
pub trait LinkResolver {
    fn href(&self, action: &Action) -> Option<String>;
}

pub struct NoLinks;

impl LinkResolver for NoLinks {
    fn href(&self, _action: &Action) -> Option<String> {
        None
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Shortest representation with at most two decimals.
pub fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        let s = format!("{rounded:.2}");
        s.trim_end_matches('0').to_string()
    }
}

pub fn render_scene(scene: &Scene, links: &dyn LinkResolver) -> String {
    let mut out = String::new();
    write_scene(&mut out, scene, links);
    out
}

fn write_scene(out: &mut String, scene: &Scene, links: &dyn LinkResolver) {
    match scene {
        Scene::Svg(svg) => write_svg(out, svg, links),
        Scene::Html(nodes) => {
            for n in nodes {
                write_html(out, n);
            }
        }
        Scene::Text(t) => out.push_str(&escape(t)),
        Scene::Placeholder => out.push_str("<div class=\"placeholder\">NO SUCH<br>DATA</div>"),
        Scene::Stack(parts) => {
            for p in parts {
                write_scene(out, p, links);
            }
        }
    }
}

fn write_svg(out: &mut String, svg: &SvgScene, links: &dyn LinkResolver) {
    let _ = write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = num(svg.size.width),
        h = num(svg.size.height)
    );
    for n in &svg.nodes {
        write_node(out, n, links);
    }
    out.push_str("</svg>");
}

fn style_attrs(style: &Style) -> String {
    let mut s = String::new();
    if let Some(class) = &style.class {
        let _ = write!(s, " class=\"{}\"", escape(class));
    }
    if let Some(fill) = &style.fill {
        let _ = write!(s, " fill=\"{}\"", escape(fill));
    }
    if let Some(stroke) = &style.stroke {
        let _ = write!(s, " stroke=\"{}\"", escape(stroke));
    }
    if let Some(w) = style.stroke_width {
        let _ = write!(s, " stroke-width=\"{}\"", num(w));
    }
    if let Some(o) = style.opacity {
        let _ = write!(s, " opacity=\"{}\"", num(o));
    }
    s
}

fn text_attrs(style: &TextStyle, origin: [f64; 2]) -> String {
    let mut s = format!(" text-anchor=\"{}\"", style.anchor.as_str());
    if let Some(class) = &style.class {
        let _ = write!(s, " class=\"{}\"", escape(class));
    }
    if let Some(size) = style.font_size_px {
        let _ = write!(s, " font-size=\"{}px\"", num(size));
    }
    if let Some(fill) = &style.fill {
        let _ = write!(s, " fill=\"{}\"", escape(fill));
    }
    if let Some(deg) = style.rotate_deg {
        let _ = write!(
            s,
            " transform=\"rotate({} {} {})\"",
            num(deg),
            num(origin[0]),
            num(origin[1])
        );
    }
    s
}

/// Closes a shape, with an optional `<title>` child.
fn close_shape(out: &mut String, tag: &str, title: &Option<String>) {
    match title {
        Some(t) => {
            let _ = write!(out, "><title>{}</title></{tag}>", escape(t));
        }
        None => out.push_str("/>"),
    }
}

fn write_node(out: &mut String, node: &SceneNode, links: &dyn LinkResolver) {
    match node {
        SceneNode::Group {
            translate,
            class,
            children,
        } => {
            out.push_str("<g");
            if let Some(c) = class {
                let _ = write!(out, " class=\"{}\"", escape(c));
            }
            if translate[0] != 0.0 || translate[1] != 0.0 {
                let _ = write!(
                    out,
                    " transform=\"translate({},{})\"",
                    num(translate[0]),
                    num(translate[1])
                );
            }
            out.push('>');
            for c in children {
                write_node(out, c, links);
            }
            out.push_str("</g>");
        }
        SceneNode::Rect {
            rect,
            style,
            rx,
            title,
        } => {
            let _ = write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                num(rect.x),
                num(rect.y),
                num(rect.width.max(0.0)),
                num(rect.height.max(0.0))
            );
            if *rx > 0.0 {
                let _ = write!(out, " rx=\"{}\"", num(*rx));
            }
            out.push_str(&style_attrs(style));
            close_shape(out, "rect", title);
        }
        SceneNode::Circle {
            center,
            r,
            style,
            title,
        } => {
            let _ = write!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}",
                num(center[0]),
                num(center[1]),
                num(r.max(0.0)),
                style_attrs(style)
            );
            close_shape(out, "circle", title);
        }
        SceneNode::Path { d, style, title } => {
            let _ = write!(out, "<path d=\"{}\"{}", escape(d), style_attrs(style));
            close_shape(out, "path", title);
        }
        SceneNode::Line { from, to, style } => {
            let _ = write!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{}/>",
                num(from[0]),
                num(from[1]),
                num(to[0]),
                num(to[1]),
                style_attrs(style)
            );
        }
        SceneNode::Text {
            origin,
            lines,
            line_height_em,
            style,
        } => {
            let _ = write!(
                out,
                "<text x=\"{}\" y=\"{}\"{}>",
                num(origin[0]),
                num(origin[1]),
                text_attrs(style, *origin)
            );
            if let [only] = lines.as_slice() {
                out.push_str(&escape(only));
            } else {
                for (i, line) in lines.iter().enumerate() {
                    let dy = if i == 0 { 0.0 } else { *line_height_em };
                    let _ = write!(
                        out,
                        "<tspan x=\"{}\" dy=\"{}em\">{}</tspan>",
                        num(origin[0]),
                        num(dy),
                        escape(line)
                    );
                }
            }
            out.push_str("</text>");
        }
        SceneNode::Interactive { action, child } => match links.href(action) {
            Some(href) => {
                let _ = write!(out, "<a class=\"clickable\" href=\"{}\">", escape(&href));
                write_node(out, child, links);
                out.push_str("</a>");
            }
            None => {
                out.push_str("<g class=\"clickable\">");
                write_node(out, child, links);
                out.push_str("</g>");
            }
        },
    }
}

fn write_html(out: &mut String, node: &HtmlNode) {
    match node {
        HtmlNode::Element {
            tag,
            class,
            style,
            title,
            children,
        } => {
            let _ = write!(out, "<{tag}");
            if let Some(c) = class {
                let _ = write!(out, " class=\"{}\"", escape(c));
            }
            if let Some(s) = style {
                let _ = write!(out, " style=\"{}\"", escape(s));
            }
            if let Some(t) = title {
                let _ = write!(out, " title=\"{}\"", escape(t));
            }
            out.push('>');
            for c in children {
                write_html(out, c);
            }
            let _ = write!(out, "</{tag}>");
        }
        HtmlNode::Text(t) => out.push_str(&escape(t)),
        HtmlNode::LineBreak => out.push_str("<br>"),
    }
}
