use scene::selection::Action;

use crate::frame::RenderPass;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventKind {
    Loaded,
    Dispatch,
    /// A dispatch that changed nothing.
    Ignored,
    Rendered,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Loaded => "loaded",
            EventKind::Dispatch => "dispatch",
            EventKind::Ignored => "ignored",
            EventKind::Rendered => "rendered",
        }
    }
}

/// Interaction history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub pass_index: u64,
    pub kind: EventKind,
    pub message: String,
}

/// Ordered log of what happened to a dashboard session.
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, pass: &RenderPass, kind: EventKind, message: impl Into<String>) {
        self.events.push(Event {
            pass_index: pass.index,
            kind,
            message: message.into(),
        });
    }

    pub fn action(&mut self, pass: &RenderPass, action: &Action, changed: bool) {
        let kind = if changed {
            EventKind::Dispatch
        } else {
            EventKind::Ignored
        };
        self.emit(pass, kind, describe(action));
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

pub fn describe(action: &Action) -> String {
    match action {
        Action::SelectCountry(c) => format!("country={c}"),
        Action::SelectMotive(m) => format!("motive={m}"),
        Action::SelectRange { start, end } => format!("range={start}..{end}"),
        Action::Resize(_) => "resize".to_string(),
    }
}
