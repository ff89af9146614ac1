use std::rc::Rc;

use comicsnap_schema::{ApiError, Credentials};
use dominator::{clone, html, with_node, Dom, EventOptions};
use futures_signals::signal::{Mutable, SignalExt};
use web_sys::HtmlInputElement;

use crate::common::{events, snackbar, Route, Session};
use crate::query;
use crate::utils::AsyncLoader;

pub const CONNECTION_FAILED: &str = "Impossibile connettersi al server.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    fn form_id(&self) -> &'static str {
        match self {
            AuthMode::Login => "login-form",
            AuthMode::Register => "register-form",
        }
    }

    fn heading(&self) -> &'static str {
        match self {
            AuthMode::Login => "Accedi",
            AuthMode::Register => "Registrati",
        }
    }

    fn failure(&self) -> &'static str {
        match self {
            AuthMode::Login => "Errore durante il login",
            AuthMode::Register => "Errore durante la registrazione",
        }
    }

    /// The other form and the label of the control switching to it.
    fn switch(&self) -> (AuthMode, &'static str, &'static str) {
        match self {
            AuthMode::Login => (AuthMode::Register, "show-register", "Non hai un account? Registrati"),
            AuthMode::Register => (AuthMode::Login, "show-login", "Hai già un account? Accedi"),
        }
    }

    /// Text notified when a submission fails.
    pub fn failure_message(&self, err: &ApiError) -> String {
        if err.is_network() {
            CONNECTION_FAILED.to_string()
        } else {
            snackbar::error_message(err, self.failure())
        }
    }
}

#[derive(Default)]
struct FormFields {
    username: Mutable<String>,
    password: Mutable<String>,
}

impl FormFields {
    fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.get_cloned(),
            password: self.password.get_cloned(),
        }
    }
}

pub struct LogReg {
    session: Rc<Session>,
    mode: Mutable<AuthMode>,
    login: FormFields,
    register: FormFields,
    loader: AsyncLoader,
}

impl LogReg {
    pub fn new(session: Rc<Session>) -> Rc<Self> {
        Rc::new(Self {
            session,
            mode: Mutable::new(AuthMode::Login),
            login: FormFields::default(),
            register: FormFields::default(),
            loader: AsyncLoader::new(),
        })
    }

    fn fields(&self, mode: AuthMode) -> &FormFields {
        match mode {
            AuthMode::Login => &self.login,
            AuthMode::Register => &self.register,
        }
    }

    pub fn submit(logreg: Rc<Self>, mode: AuthMode) {
        let credentials = logreg.fields(mode).credentials();
        logreg.loader.load(clone!(logreg => async move {
            let res = match mode {
                AuthMode::Login => query::user_login(&credentials).await,
                AuthMode::Register => query::user_register(&credentials).await,
            };

            match res {
                Ok(token) => {
                    info!("{} ok for {}", mode.form_id(), credentials.username);
                    logreg.session.store(&token);
                    Route::Home.go();
                }
                Err(e) => {
                    error!("{}: {}", mode.failure(), e);
                    snackbar::show(mode.failure_message(&e));
                }
            }
        }));
    }

    fn render_input(field: &Mutable<String>, input_type: &str, placeholder: &str) -> Dom {
        html!("input" => HtmlInputElement, {
            .attr("type", input_type)
            .attr("placeholder", placeholder)
            .attr("required", "")
            .prop_signal("value", field.signal_cloned())
            .with_node!(input => {
                .event(clone!(field => move |_: events::Input| {
                    field.set(input.value());
                }))
            })
        })
    }

    fn render_form(logreg: Rc<Self>, mode: AuthMode) -> Dom {
        let fields = logreg.fields(mode);
        let (other, switch_id, switch_label) = mode.switch();

        html!("form", {
            .attr("id", mode.form_id())
            .class("auth-form")
            .visible_signal(logreg.mode.signal().map(move |current| current == mode))
            .event_with_options(&EventOptions::preventable(), clone!(logreg => move |e: events::Submit| {
                e.prevent_default();
                Self::submit(logreg.clone(), mode);
            }))
            .children(&mut [
                html!("h2", {
                    .text(mode.heading())
                }),
                Self::render_input(&fields.username, "text", "Username"),
                Self::render_input(&fields.password, "password", "Password"),
                html!("button", {
                    .attr("type", "submit")
                    .text(mode.heading())
                }),
                html!("a", {
                    .attr("id", switch_id)
                    .attr("href", "#")
                    .text(switch_label)
                    .event_with_options(&EventOptions::preventable(), clone!(logreg => move |e: events::Click| {
                        e.prevent_default();
                        logreg.mode.set_neq(other);
                    }))
                }),
            ])
        })
    }

    pub fn render(logreg: Rc<Self>) -> Dom {
        html!("section", {
            .class("page")
            .class("logreg")
            .children(&mut [
                Self::render_form(logreg.clone(), AuthMode::Login),
                Self::render_form(logreg, AuthMode::Register),
            ])
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_failure_message() {
        let network = ApiError::Network("Failed to fetch".to_string());
        assert_eq!(AuthMode::Login.failure_message(&network), CONNECTION_FAILED);

        let rejected = ApiError::from_response(401, r#"{"error": "Credenziali non valide"}"#);
        assert_eq!(AuthMode::Login.failure_message(&rejected), "Credenziali non valide");

        let bare = ApiError::Status(500);
        assert_eq!(
            AuthMode::Register.failure_message(&bare),
            "Errore durante la registrazione"
        );
    }

    #[test]
    fn test_switch_targets_other_form() {
        assert_eq!(AuthMode::Login.switch().0, AuthMode::Register);
        assert_eq!(AuthMode::Register.switch().1, "show-login");
    }
}
