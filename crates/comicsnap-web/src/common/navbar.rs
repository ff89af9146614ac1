use std::rc::Rc;

use dominator::{clone, html, with_node, Dom, EventOptions};
use futures_signals::signal::{Mutable, SignalExt};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement};

use crate::common::{events, icons, Route, Session};
use crate::query;

const DROPDOWN_SELECTOR: &str = "#search-dropdown";
const TOGGLE_SELECTOR: &str = ".search-toggle";

/// Search terms are sent trimmed and lowercased; blank input is ignored.
pub fn normalize_search_term(raw: &str) -> Option<String> {
    let term = raw.trim().to_lowercase();
    if term.is_empty() { None } else { Some(term) }
}

fn is_within(target: Option<web_sys::EventTarget>, selector: &str) -> bool {
    target
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.closest(selector).ok().flatten())
        .is_some()
}

pub struct Navbar {
    session: Rc<Session>,
    search_open: Mutable<bool>,
}

impl Navbar {
    pub fn new(session: Rc<Session>) -> Rc<Self> {
        Rc::new(Self {
            session,
            search_open: Mutable::new(false),
        })
    }

    fn logout(navbar: Rc<Self>) {
        spawn_local(async move {
            match query::user_logout().await {
                Ok(()) => {
                    info!("logout");
                    navbar.session.clear();
                    Route::Home.go();
                }
                Err(e) => error!("Errore durante il logout: {}", e),
            }
        });
    }

    fn render_links() -> Dom {
        html!("ul", {
            .class("nav-links")
            .children(Route::nav_links().into_iter().map(|(label, route)| {
                html!("li", {
                    .children(&mut [
                        html!("a", {
                            .attr("href", &route.url())
                            .text(label)
                            .with_node!(link => {
                                .event_with_options(&EventOptions::preventable(), move |e: events::Click| {
                                    e.prevent_default();
                                    let text = link.text_content().unwrap_or_default();
                                    match Route::from_link_text(&text) {
                                        Some(route) => route.go(),
                                        None => error!("Pagina non trovata: {}", text),
                                    }
                                })
                            })
                        })
                    ])
                })
            }))
        })
    }

    fn render_search(navbar: Rc<Self>) -> Dom {
        html!("div", {
            .class("search")
            .children(&mut [
                html!("span", {
                    .class("search-toggle")
                    .child(icons::search())
                    .event(clone!(navbar => move |_: events::Click| {
                        navbar.search_open.replace_with(|open| !*open);
                    }))
                }),
            ])
            .child_signal(navbar.search_open.signal().map(clone!(navbar => move |open| {
                open.then(|| Self::render_dropdown(navbar.clone()))
            })))
            .global_event(clone!(navbar => move |e: events::Click| {
                if !navbar.search_open.get() {
                    return;
                }
                let target = e.target();
                if !is_within(target.clone(), DROPDOWN_SELECTOR) && !is_within(target, TOGGLE_SELECTOR) {
                    navbar.search_open.set_neq(false);
                }
            }))
        })
    }

    fn render_dropdown(navbar: Rc<Self>) -> Dom {
        html!("div", {
            .attr("id", "search-dropdown")
            .class("active")
            .children(&mut [
                html!("input" => HtmlInputElement, {
                    .attr("id", "search-input")
                    .attr("type", "text")
                    .attr("placeholder", "Cerca un fumetto...")
                    .focused(true)
                    .with_node!(input => {
                        .event(clone!(navbar => move |e: events::KeyDown| {
                            if e.key() != "Enter" {
                                return;
                            }
                            if let Some(query) = normalize_search_term(&input.value()) {
                                navbar.search_open.set_neq(false);
                                Route::SearchResults { query: Some(query) }.go();
                            }
                        }))
                    })
                })
            ])
        })
    }

    fn render_auth_icon(navbar: Rc<Self>) -> Dom {
        html!("span", {
            .attr("id", "user-auth-icon")
            .class("clickable")
            .class_signal("logged-in", navbar.session.signal())
            .attr_signal("data-auth", navbar.session.signal().map(|authenticated| {
                if authenticated { "true" } else { "false" }
            }))
            .child_signal(navbar.session.signal().map(|authenticated| {
                Some(if authenticated { icons::logout() } else { icons::user() })
            }))
            .event(clone!(navbar => move |_: events::Click| {
                if navbar.session.is_authenticated() {
                    Self::logout(navbar.clone());
                } else {
                    Route::LogReg.go();
                }
            }))
        })
    }

    pub fn render(navbar: Rc<Self>) -> Dom {
        html!("nav", {
            .class("navbar")
            .children(&mut [
                html!("a", {
                    .class("navbar__logo")
                    .attr("href", "/")
                    .text("ComicSnap")
                    .event_with_options(&EventOptions::preventable(), |e: events::Click| {
                        e.prevent_default();
                        Route::Home.go();
                    })
                }),
                Self::render_links(),
                Self::render_search(navbar.clone()),
                Self::render_auth_icon(navbar),
            ])
        })
    }
}
