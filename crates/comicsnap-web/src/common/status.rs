use dominator::{html, Dom};
use futures_signals::signal::{Signal, SignalExt};

/// What a list container shows besides its cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    Idle,
    Loading,
    Ready,
    /// Replaces the container content: empty states and failures.
    Message(String),
}

impl ListStatus {
    pub fn message(text: impl Into<String>) -> Self {
        ListStatus::Message(text.into())
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            ListStatus::Message(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListStatus::Loading)
    }
}

pub fn render_message<S>(status: S) -> impl Signal<Item = Option<Dom>>
where
    S: Signal<Item = ListStatus>,
{
    status.map(|status| {
        status.text().map(|text| html!("p", {
            .class("status-message")
            .text(text)
        }))
    })
}
