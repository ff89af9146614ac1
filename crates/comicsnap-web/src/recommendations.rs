use std::rc::Rc;

use comicsnap_schema::Recommendation;
use dominator::{clone, html, Dom};
use futures_signals::signal::Mutable;
use futures_signals::signal_vec::{MutableVec, SignalVecExt};

use crate::{
    common::{render_message, spinner, Cover, ListStatus, Route, Session},
    query,
    utils::AsyncLoader,
};

pub const NO_RECOMMENDATIONS: &str = "Nessuna raccomandazione disponibile";
pub const LOAD_FAILED: &str = "Errore nel caricamento delle raccomandazioni";

pub struct Recommendations {
    session: Rc<Session>,
    status: Mutable<ListStatus>,
    covers: MutableVec<Rc<Cover>>,
    loader: AsyncLoader,
}

impl Recommendations {
    pub fn new(session: Rc<Session>) -> Rc<Self> {
        Rc::new(Self {
            session,
            status: Mutable::new(ListStatus::Idle),
            covers: MutableVec::new(),
            loader: AsyncLoader::new(),
        })
    }

    pub fn fetch_recommendations(view: Rc<Self>) {
        let Some(token) = view.session.token() else {
            Route::LogReg.go();
            return;
        };

        view.status.set(ListStatus::Loading);
        view.loader.load(clone!(view => async move {
            match query::fetch_recommendations(&token).await {
                Ok(recommendations) if recommendations.is_empty() => {
                    view.status.set(ListStatus::message(NO_RECOMMENDATIONS));
                }
                Ok(recommendations) => {
                    view.covers.lock_mut().replace_cloned(covers(&recommendations));
                    view.status.set(ListStatus::Ready);
                }
                Err(e) => {
                    error!("{}: {}", LOAD_FAILED, e);
                    view.status.set(ListStatus::message(LOAD_FAILED));
                }
            }
        }));
    }

    pub fn render(view: Rc<Self>) -> Dom {
        Self::fetch_recommendations(view.clone());

        html!("section", {
            .class("page")
            .class("raccomandazioni")
            .children(&mut [
                html!("h2", {
                    .text("Consigliati per te")
                }),
                spinner::render(view.status.signal_ref(ListStatus::is_loading)),
                html!("div", {
                    .class("raccolta__grid")
                    .child_signal(render_message(view.status.signal_cloned()))
                    .children_signal_vec(view.covers.signal_vec_cloned().map(|cover| cover.render()))
                }),
            ])
        })
    }
}

fn covers(recommendations: &[Recommendation]) -> Vec<Rc<Cover>> {
    recommendations
        .iter()
        .map(|recommendation| Rc::new(Cover::from_recommendation(recommendation)))
        .collect()
}
