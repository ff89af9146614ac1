use std::rc::Rc;

use dominator::{clone, html, Dom};
use futures_signals::signal::SignalExt;

use crate::collection::Collection;
use crate::common::{snackbar, Navbar, Route, Session};
use crate::home::Home;
use crate::login::LogReg;
use crate::recommendations::Recommendations;
use crate::search_results::SearchResults;

pub struct App {
    session: Rc<Session>,
}

impl App {
    pub fn new() -> Rc<Self> {
        Rc::new(App {
            session: Session::new(),
        })
    }

    fn render_page(app: &Rc<Self>, route: Route) -> Option<Dom> {
        let session = app.session.clone();
        match route {
            Route::Home => Some(Home::render(Home::new(session))),
            Route::Collection => Some(Collection::render(Collection::new(session))),
            Route::SearchResults { query } => {
                Some(SearchResults::render(SearchResults::new(query, session)))
            }
            Route::LogReg => Some(LogReg::render(LogReg::new(session))),
            Route::Recommendations => {
                Some(Recommendations::render(Recommendations::new(session)))
            }
            Route::Quotes | Route::Reviews => None,
            Route::NotFound => Some(html!("div", {
                .class("page")
                .text("Pagina non trovata")
            })),
        }
    }

    pub fn render(app: Rc<Self>) -> Dom {
        html!("div", {
            .class("main")
            .future(Route::signal().for_each(clone!(app => move |route| {
                debug!("route {:?}", route);
                app.session.refresh();
                async {}
            })))
            .children(&mut [
                Navbar::render(Navbar::new(app.session.clone())),
            ])
            .child_signal(Route::signal().map(clone!(app => move |route| {
                Self::render_page(&app, route)
            })))
            .children(&mut [
                snackbar::render(),
            ])
        })
    }
}
