use std::collections::BTreeMap;
use std::fmt::Write;

use foundation::ids::{Scope, ViewId};
use scene::node::Scene;
use scene::selection::SelectionState;
use scene::svg::{LinkResolver, escape, render_scene};

/// Scenes produced by one render pass, keyed by view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedPage {
    /// Index of the pass that produced these scenes.
    pub pass: u64,
    scenes: BTreeMap<ViewId, Scene>,
}

impl RenderedPage {
    pub fn new(pass: u64) -> Self {
        Self {
            pass,
            scenes: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, view: ViewId, scene: Scene) {
        self.scenes.insert(view, scene);
    }

    pub fn get(&self, view: ViewId) -> Option<&Scene> {
        self.scenes.get(&view)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn views(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.scenes.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ViewId, &Scene)> + '_ {
        self.scenes.iter().map(|(v, s)| (*v, s))
    }

    /// Replaces the scenes of every view present in `update`.
    pub fn merge(&mut self, update: RenderedPage) {
        self.pass = update.pass;
        self.scenes.extend(update.scenes);
    }

    /// Markup of one container's content.
    pub fn fragment(&self, view: ViewId, links: &dyn LinkResolver) -> Option<String> {
        self.get(view).map(|scene| render_scene(scene, links))
    }

    /// Markup of every container, keyed by container id.
    pub fn fragments(&self, links: &dyn LinkResolver) -> BTreeMap<&'static str, String> {
        self.scenes
            .iter()
            .map(|(view, scene)| (view.container_id(), render_scene(scene, links)))
            .collect()
    }
}

/// How the page shell is assembled.
pub struct Shell<'a> {
    pub title: &'a str,
    pub selection: &'a SelectionState,
    pub links: &'a dyn LinkResolver,
    /// Target of the year range form; `None` leaves the form out (static
    /// exports).
    pub form_action: Option<&'a str>,
}

const STYLE: &str = "body{background:#f3f0e6;color:#2b2b2b;font-family:monospace;margin:0 auto;max-width:1000px}\
section{border-top:2px solid #2b2b2b;padding:12px 0}\
.view{margin:8px 0}\
.placeholder{color:#b71c1c;font-weight:bold;text-align:center;padding:24px 0}\
.clickable{cursor:pointer}\
.bg-stamp{background:#b71c1c}.bg-ink{background:#2b2b2b}\
.w-2{width:8px}.h-2{height:8px}.rounded-full{border-radius:50%}.inline-block{display:inline-block}.m-0\\.5{margin:2px}\
.error-banner{background:#2b2b2b;color:#f3f0e6;padding:24px;font-size:24px}";

fn section_class(scope: Scope) -> &'static str {
    match scope {
        Scope::Static | Scope::Country => "block-country",
        Scope::Motive => "block-motive",
        Scope::Range => "block-range",
    }
}

/// Full HTML document with one element per container id, in page order.
/// Views missing from `page` get an empty container.
pub fn page_shell(page: &RenderedPage, shell: &Shell<'_>) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>{}</title><style>{STYLE}</style></head><body>",
        escape(shell.title)
    );
    let _ = write!(out, "<h1>{}</h1>", escape(shell.title));

    let mut current: Option<&'static str> = None;
    for view in ViewId::ALL {
        let class = section_class(view.scope());
        if current != Some(class) {
            if current.is_some() {
                out.push_str("</section>");
            }
            let _ = write!(out, "<section class=\"{class}\">");
            current = Some(class);
        }
        if view == ViewId::GlobalTimeline {
            if let Some(action) = shell.form_action {
                write_range_form(&mut out, action, shell.selection);
            }
        }
        let body = page.fragment(view, shell.links).unwrap_or_default();
        let _ = write!(
            out,
            "<div id=\"{}\" class=\"view\">{body}</div>",
            view.container_id()
        );
    }
    if current.is_some() {
        out.push_str("</section>");
    }
    out.push_str("</body></html>");
    out
}

fn write_range_form(out: &mut String, action: &str, selection: &SelectionState) {
    let _ = write!(
        out,
        "<form class=\"range-form\" method=\"get\" action=\"{}\">\
<input type=\"hidden\" name=\"country\" value=\"{}\">\
<input type=\"hidden\" name=\"motive\" value=\"{}\">\
<label>FROM <input type=\"number\" name=\"start\" value=\"{}\"></label>\
<label>TO <input type=\"number\" name=\"end\" value=\"{}\"></label>\
<button type=\"submit\">APPLY</button></form>",
        escape(action),
        escape(&selection.country),
        escape(&selection.motive),
        selection.range.start(),
        selection.range.end(),
    );
}

/// Page shown instead of the dashboard when the datasets failed to load.
pub fn error_page(title: &str, reason: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>{t}</title><style>{STYLE}</style></head><body>\
<div class=\"error-banner\">DATA UNAVAILABLE</div><p class=\"error-reason\">{r}</p></body></html>",
        t = escape(title),
        r = escape(reason)
    )
}
