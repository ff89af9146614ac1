use std::rc::Rc;

use comicsnap_schema::{ApiError, CollectionEntry, ComicId, FavoriteRequest, Rating, RatingScale};
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

pub const LOGIN_PROMPT: &str = "Effettua il login per visualizzare la tua raccolta";
pub const EMPTY_COLLECTION: &str = "Nessun fumetto aggiunto alla raccolta";
pub const LOAD_FAILED: &str = "Impossibile caricare i fumetti";
pub const FAVORITES_FAILED: &str = "Impossibile caricare i preferiti";
pub const FAVORITE_FAILED: &str = "Errore nell'aggiungere la preferenza";
pub const FAVORITE_ADDED: &str = "Preferenza aggiunta con successo!";
pub const LOGIN_REQUIRED: &str = "Devi effettuare il login per aggiungere preferiti";

fn failure_text(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Network(message) => format!("Errore: {}", message),
        _ => format!("Errore: {}", fallback),
    }
}

fn build_covers(entries: &[CollectionEntry], favorites: &[ComicId]) -> Vec<Rc<Cover>> {
    entries
        .iter()
        .map(|entry| Rc::new(Cover::from_entry(entry, entry.is_favorite(favorites))))
        .collect()
}

struct PendingFavorite {
    modal: Rc<RatingModal>,
    cover: Rc<Cover>,
}

/// The signed in user's read comics, with favorites marked by a star.
pub struct Collection {
    session: Rc<Session>,
    status: Mutable<ListStatus>,
    covers: MutableVec<Rc<Cover>>,
    popup: Mutable<Option<Rc<PendingFavorite>>>,
    loader: AsyncLoader,
}

impl Collection {
    pub fn new(session: Rc<Session>) -> Rc<Self> {
        Rc::new(Self {
            session,
            status: Mutable::new(ListStatus::Idle),
            covers: MutableVec::new(),
            popup: Mutable::new(None),
            loader: AsyncLoader::new(),
        })
    }

    pub fn fetch_collection(collection: Rc<Self>) {
        let Some(token) = collection.session.token() else {
            collection.status.set(ListStatus::message(LOGIN_PROMPT));
            return;
        };

        collection.status.set(ListStatus::Loading);
        collection.loader.load(clone!(collection => async move {
            let entries = match query::fetch_read_comics(&token).await {
                Ok(entries) => entries,
                Err(e) => {
                    error!("Errore durante il caricamento dei fumetti letti: {}", e);
                    collection.status.set(ListStatus::message(failure_text(&e, LOAD_FAILED)));
                    return;
                }
            };

            if entries.is_empty() {
                collection.covers.lock_mut().clear();
                collection.status.set(ListStatus::message(EMPTY_COLLECTION));
                return;
            }

            let favorites = match query::fetch_favorite_ids(&token).await {
                Ok(favorites) => favorites,
                Err(e) => {
                    error!("Errore durante il caricamento dei preferiti: {}", e);
                    collection.status.set(ListStatus::message(failure_text(&e, FAVORITES_FAILED)));
                    return;
                }
            };

            debug!("{} comics, {} favorites", entries.len(), favorites.len());
            collection.covers.lock_mut().replace_cloned(build_covers(&entries, &favorites));
            collection.status.set(ListStatus::Ready);
        }));
    }

    fn open_weighting(collection: Rc<Self>, cover: Rc<Cover>) {
        if cover.is_favorite.get() {
            return;
        }

        let modal = RatingModal::new(RatingScale::Weight, cover.alt.clone());
        collection.popup.set(Some(Rc::new(PendingFavorite { modal, cover })));
    }

    fn submit_weight(collection: Rc<Self>, pending: Rc<PendingFavorite>, rating: Rating) {
        let Rating::Weight(peso) = rating else {
            return;
        };
        let Some(token) = collection.session.token() else {
            snackbar::show(LOGIN_REQUIRED);
            return;
        };

        let body = FavoriteRequest {
            comic_id: pending.cover.id.clone(),
            peso,
        };
        pending.modal.set_submitting(true);
        spawn_local(async move {
            match query::add_favorite(&token, &body).await {
                Ok(()) => {
                    pending.cover.mark_favorite();
                    snackbar::show(FAVORITE_ADDED);
                    Self::close_popup(&collection, &pending);
                }
                Err(e) => {
                    snackbar::show_error(&e, FAVORITE_FAILED);
                    pending.modal.set_submitting(false);
                }
            }
        });
    }

    fn close_popup(collection: &Rc<Self>, pending: &Rc<PendingFavorite>) {
        let mut popup = collection.popup.lock_mut();
        if popup.as_ref().is_some_and(|current| Rc::ptr_eq(current, pending)) {
            *popup = None;
        }
    }

    fn render_popup(collection: Rc<Self>, pending: Rc<PendingFavorite>) -> Dom {
        RatingModal::render(
            pending.modal.clone(),
            clone!(collection, pending => move |rating| {
                Self::submit_weight(collection.clone(), pending.clone(), rating);
            }),
            clone!(collection, pending => move || {
                Self::close_popup(&collection, &pending);
            }),
        )
    }

    pub fn render_main(collection: Rc<Self>) -> Dom {
        html!("div", {
            .class("raccolta__grid")
            .child_signal(render_message(collection.status.signal_cloned()))
            .children_signal_vec(collection.covers.signal_vec_cloned().map(clone!(collection => move |cover| {
                if cover.is_favorite.get() {
                    cover.render()
                } else {
                    cover.render_clickable(clone!(collection, cover => move || {
                        Self::open_weighting(collection.clone(), cover.clone());
                    }))
                }
            })))
        })
    }

    pub fn render(collection: Rc<Self>) -> Dom {
        Self::fetch_collection(collection.clone());

        html!("section", {
            .class("page")
            .class("raccolta")
            .children(&mut [
                html!("h2", {
                    .text("La tua raccolta")
                }),
                spinner::render(collection.status.signal_ref(ListStatus::is_loading)),
                Self::render_main(collection.clone()),
            ])
            .child_signal(collection.popup.signal_cloned().map(clone!(collection => move |popup| {
                popup.map(|pending| Self::render_popup(collection.clone(), pending))
            })))
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_covers_mark_favorites() {
        let entries: Vec<CollectionEntry> = serde_json::from_value(json!([
            { "id": 1, "titolo": "Ken Parker" },
            { "id": "4050-9", "titolo": "Nathan Never" }
        ]))
        .unwrap();
        let favorites = vec![ComicId::new("4050-9")];

        let covers = build_covers(&entries, &favorites);

        assert_eq!(covers.len(), 2);
        assert!(!covers[0].is_favorite.get());
        assert!(covers[1].is_favorite.get());
    }

    #[test]
    fn test_failure_text() {
        assert_eq!(
            failure_text(&ApiError::Status(500), LOAD_FAILED),
            "Errore: Impossibile caricare i fumetti"
        );
        assert_eq!(
            failure_text(&ApiError::Network("Failed to fetch".to_string()), LOAD_FAILED),
            "Errore: Failed to fetch"
        );
    }
}
