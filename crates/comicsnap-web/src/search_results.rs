use std::rc::Rc;

use comicsnap_schema::{ApiError, ComicCard, ComicSummary, Rating, RatingScale};
use dominator::{clone, html, Dom};
use futures_signals::{
    signal::{Mutable, SignalExt},
    signal_vec::{MutableVec, SignalVecExt},
};
use wasm_bindgen_futures::spawn_local;

use crate::{
    common::{render_message, snackbar, spinner, Cover, ListStatus, RatingModal, Session},
    query,
    utils::AsyncLoader,
};

pub const NO_RESULTS: &str = "Nessun risultato trovato.";
pub const SEARCH_FAILED: &str = "Errore durante la ricerca. Riprova più tardi.";
pub const LOGIN_REQUIRED: &str = "Devi effettuare il login per aggiungere fumetti";
pub const CHECK_FAILED: &str = "Errore durante la verifica del fumetto";
pub const ADD_FAILED: &str = "Impossibile aggiungere il fumetto";
pub const ADDED: &str = "Fumetto aggiunto alla lista dei letti!";

pub struct SearchResult {
    summary: ComicSummary,
    card: ComicCard,
    cover: Cover,
}

impl SearchResult {
    pub fn new(summary: ComicSummary, index: usize) -> Self {
        let card = summary.card(index);
        let cover = Cover::from_card(&card);
        Self {
            summary,
            card,
            cover,
        }
    }
}

fn results_state(comics: Vec<ComicSummary>) -> (Vec<Rc<SearchResult>>, ListStatus) {
    if comics.is_empty() {
        return (vec![], ListStatus::message(NO_RESULTS));
    }

    let results = comics
        .into_iter()
        .enumerate()
        .map(|(index, summary)| Rc::new(SearchResult::new(summary, index)))
        .collect();
    (results, ListStatus::Ready)
}

/// Marking a comic as read needs a signed in user. Without a token the flow
/// stops before any request.
fn login_gate(token: Option<String>) -> Result<String, &'static str> {
    token.ok_or(LOGIN_REQUIRED)
}

#[derive(Debug, PartialEq, Eq)]
enum CheckOutcome {
    OpenPopup,
    Notify(String),
}

fn after_check(res: Result<(), ApiError>) -> CheckOutcome {
    match res {
        Ok(()) => CheckOutcome::OpenPopup,
        Err(ApiError::AlreadyExists) => CheckOutcome::Notify(ApiError::AlreadyExists.to_string()),
        Err(e) => {
            error!("Errore: {}", e);
            CheckOutcome::Notify(CHECK_FAILED.to_string())
        }
    }
}

/// Notification for a finished submission: the server's `error`, then
/// `Errore <status>`, then a generic fallback.
fn after_submit(res: Result<(), ApiError>) -> String {
    match res {
        Ok(()) => ADDED.to_string(),
        Err(e) => {
            error!("Errore: {}", e);
            match e {
                ApiError::Status(_) => e.to_string(),
                e => snackbar::error_message(&e, ADD_FAILED),
            }
        }
    }
}

/// Rating popup opened for one result. The token is the one read when the
/// user clicked the cover.
struct PendingRead {
    modal: Rc<RatingModal>,
    result: Rc<SearchResult>,
    token: String,
}

pub struct SearchResults {
    query: Option<String>,
    session: Rc<Session>,
    status: Mutable<ListStatus>,
    results: MutableVec<Rc<SearchResult>>,
    popup: Mutable<Option<Rc<PendingRead>>>,
    loader: AsyncLoader,
}

impl SearchResults {
    pub fn new(query: Option<String>, session: Rc<Session>) -> Rc<Self> {
        Rc::new(Self {
            query,
            session,
            status: Mutable::new(ListStatus::Idle),
            results: MutableVec::new(),
            popup: Mutable::new(None),
            loader: AsyncLoader::new(),
        })
    }

    pub fn fetch_results(view: Rc<Self>) {
        let Some(term) = view.query.clone() else {
            return;
        };

        view.status.set(ListStatus::Loading);
        view.loader.load(clone!(view => async move {
            let (results, status) = match query::search(&term).await {
                Ok(comics) => results_state(comics),
                Err(e) => {
                    error!("Errore: {}", e);
                    (vec![], ListStatus::message(SEARCH_FAILED))
                }
            };
            view.results.lock_mut().replace_cloned(results);
            view.status.set(status);
        }));
    }

    /// Starts the "mark as read" flow for a clicked cover.
    fn mark_as_read(view: Rc<Self>, result: Rc<SearchResult>) {
        let token = match login_gate(view.session.token()) {
            Ok(token) => token,
            Err(message) => {
                snackbar::show(message);
                return;
            }
        };

        spawn_local(async move {
            let res = query::check_read_comic(&token, &result.card.id).await;
            match after_check(res) {
                CheckOutcome::OpenPopup => {
                    let modal = RatingModal::new(RatingScale::Stars, result.card.alt.clone());
                    view.popup.set(Some(Rc::new(PendingRead {
                        modal,
                        result,
                        token,
                    })));
                }
                CheckOutcome::Notify(message) => snackbar::show(message),
            }
        });
    }

    fn submit_rating(view: Rc<Self>, pending: Rc<PendingRead>, rating: Rating) {
        let Rating::Stars(stars) = rating else {
            return;
        };

        let result = &pending.result;
        let body = result
            .summary
            .read_request(&result.card, result.cover.displayed_url(), stars);
        pending.modal.set_submitting(true);
        spawn_local(async move {
            let res = query::add_read_comic(&pending.token, &body).await;
            snackbar::show(after_submit(res));
            Self::close_popup(&view, &pending);
        });
    }

    /// Closes `pending` unless another popup replaced it meanwhile.
    fn close_popup(view: &Rc<Self>, pending: &Rc<PendingRead>) {
        let mut popup = view.popup.lock_mut();
        if popup.as_ref().is_some_and(|current| Rc::ptr_eq(current, pending)) {
            *popup = None;
        }
    }

    fn render_popup(view: Rc<Self>, pending: Rc<PendingRead>) -> Dom {
        RatingModal::render(
            pending.modal.clone(),
            clone!(view, pending => move |rating| {
                Self::submit_rating(view.clone(), pending.clone(), rating);
            }),
            clone!(view, pending => move || {
                Self::close_popup(&view, &pending);
            }),
        )
    }

    pub fn render_main(view: Rc<Self>) -> Dom {
        html!("div", {
            .attr("id", "risultati-ricerca")
            .class("raccolta__grid")
            .child_signal(render_message(view.status.signal_cloned()))
            .children_signal_vec(view.results.signal_vec_cloned().map(clone!(view => move |result| {
                result.cover.render_clickable(clone!(view, result => move || {
                    Self::mark_as_read(view.clone(), result.clone());
                }))
            })))
        })
    }

    pub fn render(view: Rc<Self>) -> Dom {
        Self::fetch_results(view.clone());

        html!("section", {
            .class("page")
            .class("search-results")
            .apply_if(view.query.is_some(), |dom| {
                dom.child(html!("h2", {
                    .text(&format!("Risultati per \"{}\"", view.query.as_deref().unwrap_or_default()))
                }))
            })
            .children(&mut [
                spinner::render(view.status.signal_ref(ListStatus::is_loading)),
                Self::render_main(view.clone()),
            ])
            .child_signal(view.popup.signal_cloned().map(clone!(view => move |popup| {
                popup.map(|pending| Self::render_popup(view.clone(), pending))
            })))
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_results_keep_position_for_generated_ids() {
        let comics: Vec<ComicSummary> = serde_json::from_value(json!([
            { "id": "4050-1", "name": "Hellboy" },
            { "name": "Sandman" }
        ]))
        .unwrap();

        let (results, status) = results_state(comics);

        assert_eq!(status, ListStatus::Ready);
        assert_eq!(results[0].cover.id.as_str(), "4050-1");
        assert_eq!(results[1].cover.id.as_str(), "generated_id_1");
        assert_eq!(results[1].cover.title, "Sandman");
    }

    #[test]
    fn test_empty_search_shows_only_message() {
        let (results, status) = results_state(vec![]);

        assert!(results.is_empty());
        assert_eq!(status, ListStatus::message(NO_RESULTS));
    }

    #[test]
    fn test_batman_result_card() {
        let comics: Vec<ComicSummary> = serde_json::from_value(json!([
            { "Nome del volume": "Batman", "Anno di pubblicazione": 1939, "Editore": "DC" }
        ]))
        .unwrap();

        let (results, _) = results_state(comics);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].cover.title, "Batman");
        assert_eq!(results[0].cover.year, "1939");
        assert_eq!(results[0].cover.publisher, "DC");
        assert_eq!(results[0].cover.displayed_url(), comicsnap_schema::comic::DEFAULT_COVER);
    }

    #[test]
    fn test_anonymous_click_stops_before_requests() {
        assert_eq!(login_gate(None), Err(LOGIN_REQUIRED));
        assert_eq!(login_gate(Some("abc".to_string())), Ok("abc".to_string()));
    }

    #[test]
    fn test_conflict_skips_popup() {
        assert_eq!(
            after_check(Err(ApiError::AlreadyExists)),
            CheckOutcome::Notify("Hai già aggiunto questo fumetto alla tua raccolta".to_string())
        );
        assert_eq!(
            after_check(Err(ApiError::Network("Failed to fetch".to_string()))),
            CheckOutcome::Notify(CHECK_FAILED.to_string())
        );
        assert_eq!(after_check(Ok(())), CheckOutcome::OpenPopup);
    }

    #[test]
    fn test_submit_notification() {
        assert_eq!(after_submit(Ok(())), ADDED);
        assert_eq!(after_submit(Err(ApiError::Status(500))), "Errore 500");
        assert_eq!(
            after_submit(Err(ApiError::from_response(400, r#"{"error": "Dati mancanti"}"#))),
            "Dati mancanti"
        );
        assert_eq!(
            after_submit(Err(ApiError::Network("Failed to fetch".to_string()))),
            ADD_FAILED
        );
    }
}
