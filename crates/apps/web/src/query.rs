//! Selection encoded in a page URL.
//!
//! Every interaction of the served page is a plain link or form submit; the
//! query string carries the full selection, so a request can be replayed as
//! a sequence of actions against a fresh session.

use foundation::ids::ViewId;
use foundation::time::YearRange;
use scene::selection::{Action, SelectionState};
use scene::svg::LinkResolver;
use scene::viewport::Viewports;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Narrowest and widest page width honoured by the `width` parameter.
pub const MIN_PAGE_WIDTH: f64 = 240.0;
pub const MAX_PAGE_WIDTH: f64 = 3840.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionQuery {
    pub country: Option<String>,
    pub motive: Option<String>,
    pub start: Option<f64>,
    pub end: Option<f64>,
    /// Page width in pixels; scales the default layout.
    pub width: Option<f64>,
}

impl SelectionQuery {
    pub fn parse(query: &str) -> Self {
        let mut out = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "country" => out.country = non_empty(&value),
                "motive" => out.motive = non_empty(&value),
                "start" => out.start = value.trim().parse().ok(),
                "end" => out.end = value.trim().parse().ok(),
                "width" => out.width = value.trim().parse().ok(),
                _ => {}
            }
        }
        out
    }

    /// Requested page width clamped to the honoured span; `None` when absent
    /// or not finite.
    pub fn page_width(&self) -> Option<f64> {
        self.width
            .filter(|w| w.is_finite())
            .map(|w| w.clamp(MIN_PAGE_WIDTH, MAX_PAGE_WIDTH))
    }

    /// Actions that turn the default selection into the requested one.
    ///
    /// A range with only one endpoint keeps the default for the other.
    pub fn actions(&self, defaults: &SelectionState, viewports: &Viewports) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(country) = &self.country {
            actions.push(Action::SelectCountry(country.clone()));
        }
        if let Some(motive) = &self.motive {
            actions.push(Action::SelectMotive(motive.clone()));
        }
        if self.start.is_some() || self.end.is_some() {
            actions.push(Action::SelectRange {
                start: self.start.unwrap_or(f64::from(defaults.range.start())),
                end: self.end.unwrap_or(f64::from(defaults.range.end())),
            });
        }
        if let Some(width) = self.page_width() {
            let base = viewports.get(ViewId::Map).width;
            if base > 0.0 {
                actions.push(Action::Resize(viewports.scaled(width / base)));
            }
        }
        actions
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Resolves clicks to links that keep the rest of the selection.
pub struct QueryLinks {
    base: String,
    selection: SelectionState,
    width: Option<f64>,
}

impl QueryLinks {
    pub fn new(base: impl Into<String>, selection: SelectionState, width: Option<f64>) -> Self {
        Self {
            base: base.into(),
            selection,
            width,
        }
    }

    pub fn href_for(&self, selection: &SelectionState) -> String {
        format!("{}?{}", self.base, encode(selection, self.width))
    }
}

impl LinkResolver for QueryLinks {
    fn href(&self, action: &Action) -> Option<String> {
        let mut next = self.selection.clone();
        match action {
            Action::SelectCountry(c) => next.country = c.clone(),
            Action::SelectMotive(m) => next.motive = m.clone(),
            Action::SelectRange { start, end } => {
                next.range = YearRange::from_brush(*start, *end)?;
            }
            Action::Resize(_) => return None,
        }
        Some(self.href_for(&next))
    }
}

pub fn encode(selection: &SelectionState, width: Option<f64>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("country", &selection.country)
        .append_pair("motive", &selection.motive)
        .append_pair("start", &selection.range.start().to_string())
        .append_pair("end", &selection.range.end().to_string());
    if let Some(w) = width {
        query.append_pair("width", &(w.round() as i64).to_string());
    }
    query.finish()
}
