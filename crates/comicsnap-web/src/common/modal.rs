use std::rc::Rc;

use comicsnap_schema::rating::{WEIGHT_RANGE, WEIGHT_STEP};
use comicsnap_schema::{Rating, RatingScale};
use dominator::{clone, html, with_node, Dom};
use futures_signals::map_ref;
use futures_signals::signal::{Mutable, Signal, SignalExt};
use web_sys::HtmlInputElement;

use crate::common::events;

/// Popup collecting a rating before a submission.
///
/// The caller owns the popup lifetime: it keeps the modal in a
/// `Mutable<Option<Rc<RatingModal>>>` and drops it to close. Submit stays
/// disabled until the scale accepts the current input and while a submission
/// is in flight.
pub struct RatingModal {
    scale: RatingScale,
    title: String,
    rating: Mutable<Option<Rating>>,
    submitting: Mutable<bool>,
}

impl RatingModal {
    pub fn new(scale: RatingScale, title: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            scale,
            title: title.into(),
            rating: Mutable::new(None),
            submitting: Mutable::new(false),
        })
    }

    pub fn select_star(&self, star: u8) {
        if let Some(rating) = self.scale.select_star(star) {
            self.rating.set(Some(rating));
        }
    }

    pub fn set_input(&self, input: &str) {
        self.rating.set(self.scale.parse_input(input));
    }

    pub fn rating(&self) -> Option<Rating> {
        self.rating.get()
    }

    pub fn can_submit(&self) -> bool {
        self.rating.get().is_some() && !self.submitting.get()
    }

    pub fn set_submitting(&self, submitting: bool) {
        self.submitting.set_neq(submitting);
    }

    fn submit_disabled_signal(&self) -> impl Signal<Item = bool> + use<> {
        map_ref! {
            let rating = self.rating.signal(),
            let submitting = self.submitting.signal() =>
            rating.is_none() || *submitting
        }
    }

    fn render_stars(modal: Rc<Self>) -> Dom {
        html!("div", {
            .class("stars")
            .children(modal.scale.stars().map(|star| html!("span", {
                .class("star")
                .attr("data-value", &star.to_string())
                .class_signal("active", modal.rating.signal_ref(move |rating| {
                    matches!(rating, Some(rating) if rating.lights_star(star))
                }))
                .text("★")
                .event(clone!(modal => move |_: events::Click| {
                    modal.select_star(star);
                }))
            })))
        })
    }

    fn render_weight_input(modal: Rc<Self>) -> Dom {
        html!("input" => HtmlInputElement, {
            .class("peso-input")
            .attr("type", "number")
            .attr("min", &WEIGHT_RANGE.start().to_string())
            .attr("max", &WEIGHT_RANGE.end().to_string())
            .attr("step", &WEIGHT_STEP.to_string())
            .attr("placeholder", "Inserisci un peso da 0 a 5")
            .with_node!(input => {
                .event(clone!(modal => move |_: events::Input| {
                    modal.set_input(&input.value());
                }))
            })
        })
    }

    pub fn render<S, C>(modal: Rc<Self>, on_submit: S, on_cancel: C) -> Dom
    where
        S: Fn(Rating) + 'static,
        C: Fn() + 'static,
    {
        let input = match modal.scale {
            RatingScale::Stars => Self::render_stars(modal.clone()),
            RatingScale::Weight => Self::render_weight_input(modal.clone()),
        };

        html!("div", {
            .class("rating-popup")
            .children(&mut [
                html!("div", {
                    .class("rating-content")
                    .children(&mut [
                        html!("h3", {
                            .text(&format!("Valuta \"{}\"", modal.title))
                        }),
                        input,
                        html!("div", {
                            .class("rating-buttons")
                            .children(&mut [
                                html!("button", {
                                    .class("cancel-btn")
                                    .text("Annulla")
                                    .event(move |_: events::Click| on_cancel())
                                }),
                                html!("button", {
                                    .class("submit-btn")
                                    .text("Conferma")
                                    .attr_signal("disabled", modal.submit_disabled_signal().map(|disabled| {
                                        if disabled { Some("") } else { None }
                                    }))
                                    .event(clone!(modal => move |_: events::Click| {
                                        if !modal.can_submit() {
                                            return;
                                        }
                                        if let Some(rating) = modal.rating() {
                                            on_submit(rating);
                                        }
                                    }))
                                }),
                            ])
                        }),
                    ])
                })
            ])
        })
    }
}
