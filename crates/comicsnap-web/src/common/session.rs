use std::rc::Rc;

use futures_signals::signal::{Mutable, Signal};

use crate::utils::local_storage;

pub const TOKEN_KEY: &str = "token";

/// Client side view of the login state.
///
/// The bearer token lives in local storage so it is shared with other tabs.
/// [`Session::token`] reads storage on every call; flows call it once when
/// they start and never cache the result. `authenticated` only drives the
/// header icon.
pub struct Session {
    authenticated: Mutable<bool>,
}

impl Session {
    pub fn new() -> Rc<Self> {
        let session = Rc::new(Self {
            authenticated: Mutable::new(false),
        });
        session.refresh();
        session
    }

    fn stored_token() -> Option<String> {
        match local_storage().get(TOKEN_KEY) {
            Ok(token) => usable_token(token),
            Err(e) => {
                error!("error read {}: {:?}", TOKEN_KEY, e);
                None
            }
        }
    }

    pub fn token(&self) -> Option<String> {
        let token = Self::stored_token();
        self.authenticated.set_neq(token.is_some());
        token
    }

    pub fn refresh(&self) {
        let _ = self.token();
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn store(&self, token: &str) {
        if let Err(e) = local_storage().set(TOKEN_KEY, token) {
            error!("error store {}: {:?}", TOKEN_KEY, e);
        }
        self.refresh();
    }

    pub fn clear(&self) {
        if let Err(e) = local_storage().delete(TOKEN_KEY) {
            error!("error delete {}: {:?}", TOKEN_KEY, e);
        }
        self.authenticated.set_neq(false);
    }

    pub fn signal(&self) -> impl Signal<Item = bool> + use<> {
        self.authenticated.signal()
    }
}

fn usable_token(token: Option<String>) -> Option<String> {
    token.filter(|token| !token.trim().is_empty())
}
