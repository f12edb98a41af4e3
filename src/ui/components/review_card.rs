use dioxus::prelude::*;

use crate::domain::Review;
use crate::ui::components::sentiment_icon::SentimentIcon;

#[component]
pub fn ReviewCard(review: Review) -> Element {
    let reviewer = review.reviewer_line();
    let purchase_note = review.purchase_note();

    rsx! {
        div { class: "review_panel",
            SentimentIcon {
                sentiment: review.sentiment,
                alt: review.sentiment_alt().to_string(),
            }
            div { class: "review", "{review.review}" }
            div { class: "reviewer", "{reviewer}" }
            if let Some(note) = purchase_note {
                div { class: "purchase-note", "{note}" }
            }
        }
    }
}
