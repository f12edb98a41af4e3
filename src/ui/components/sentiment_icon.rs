use dioxus::prelude::*;

use crate::domain::Sentiment;
use crate::util::assets;

#[component]
pub fn SentimentIcon(sentiment: Sentiment, alt: String) -> Element {
    rsx! {
        img {
            class: "emotion_icon sentiment-{sentiment.label()}",
            src: assets::sentiment_icon(sentiment),
            alt: "{alt}",
        }
    }
}
