use std::rc::Rc;

use dominator::{clone, html, Dom};

use crate::common::{events, Route, Session};

/// Where "Scopri" leads: recommendations need a signed in user.
pub fn discover_route(authenticated: bool) -> Route {
    if authenticated {
        Route::Recommendations
    } else {
        Route::LogReg
    }
}

pub struct Home {
    session: Rc<Session>,
}

impl Home {
    pub fn new(session: Rc<Session>) -> Rc<Self> {
        Rc::new(Self { session })
    }

    pub fn render(home: Rc<Self>) -> Dom {
        html!("header", {
            .class("header__content")
            .children(&mut [
                html!("h1", {
                    .text("ComicSnap")
                }),
                html!("p", {
                    .text("Cataloga i tuoi fumetti e scopri nuove letture.")
                }),
                html!("button", {
                    .class("discover-btn")
                    .text("Scopri")
                    .event(clone!(home => move |_: events::Click| {
                        discover_route(home.session.is_authenticated()).go();
                    }))
                }),
            ])
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_discover_route() {
        assert_eq!(discover_route(false), Route::LogReg);
        assert_eq!(discover_route(true), Route::Recommendations);
    }
}
