use std::cell::Cell;
use std::rc::Rc;

use comicsnap_schema::ApiError;
use dominator::{clone, html, Dom};
use futures_signals::signal::{Mutable, SignalExt};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

use crate::common::{events, icons};

const DISMISS_AFTER_MS: u32 = 5_000;

thread_local! {
    static SNACKBAR: std::cell::RefCell<Rc<Snackbar>> = std::cell::RefCell::new(Snackbar::new());
}

/// Shows `message` to the user and mirrors it to the console.
pub fn show(message: impl Into<String>) {
    let message = message.into();
    info!("{}", message);
    SNACKBAR.with(|s| Snackbar::show(s.borrow().clone(), message));
}

pub fn render() -> Dom {
    SNACKBAR.with(|s| Snackbar::render(s.borrow().clone()))
}

pub struct Snackbar {
    message: Mutable<Option<String>>,
    shown: Cell<usize>,
}

impl Snackbar {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            message: Mutable::new(None),
            shown: Cell::new(0),
        })
    }

    pub fn show(snackbar: Rc<Self>, message: String) {
        let id = snackbar.shown.get().wrapping_add(1);
        snackbar.shown.set(id);
        snackbar.message.set(Some(message));

        spawn_local(async move {
            TimeoutFuture::new(DISMISS_AFTER_MS).await;
            // a newer message owns the timer now
            if snackbar.shown.get() == id {
                snackbar.message.set(None);
            }
        });
    }

    pub fn render(snackbar: Rc<Self>) -> Dom {
        html!("div", {
            .class("snackbar")
            .attr("role", "status")
            .visible_signal(snackbar.message.signal_ref(|message| message.is_some()))
            .children(&mut [
                html!("div", {
                    .child_signal(snackbar.message.signal_cloned().map(|message| message.map(|msg| html!("span", {
                            .text(msg.as_str())
                        })
                    )))
                    .children(&mut [
                        html!("button", {
                            .attr("aria-label", "Chiudi")
                            .event(clone!(snackbar => move |_: events::Click| snackbar.message.set(None)))
                            .children(&mut [
                                icons::close(),
                            ])
                        })
                    ])
                })
            ])
        })
    }
}

/// User facing text for a failed request: the server's own message when it
/// sent one, `fallback` otherwise.
pub fn error_message(err: &ApiError, fallback: &str) -> String {
    match err.server_message() {
        Some(message) => message.to_string(),
        None => fallback.to_string(),
    }
}

pub fn show_error(err: &ApiError, fallback: &str) {
    error!("Errore: {}", err);
    show(error_message(err, fallback));
}
