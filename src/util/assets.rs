use std::{borrow::Cow, sync::OnceLock};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rust_embed::RustEmbed;

use crate::domain::Sentiment;

/// Stylesheet and icons, compiled into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static MAIN_CSS: OnceLock<String> = OnceLock::new();
static FAVICON: OnceLock<String> = OnceLock::new();
static POSITIVE_ICON: OnceLock<String> = OnceLock::new();
static NEGATIVE_ICON: OnceLock<String> = OnceLock::new();
static NEUTRAL_ICON: OnceLock<String> = OnceLock::new();
static REVIEW_BUTTON: OnceLock<String> = OnceLock::new();

pub fn main_css() -> &'static str {
    MAIN_CSS.get_or_init(|| load_text("main.css")).as_str()
}

pub fn favicon_data_uri() -> &'static str {
    FAVICON.get_or_init(|| load_data_uri("favicon.svg")).as_str()
}

/// Icon shown next to a review of the given tone.
pub fn sentiment_icon(sentiment: Sentiment) -> &'static str {
    let (cell, file) = match sentiment {
        Sentiment::Positive => (&POSITIVE_ICON, "positive.svg"),
        Sentiment::Negative => (&NEGATIVE_ICON, "negative.svg"),
        Sentiment::Neutral => (&NEUTRAL_ICON, "neutral.svg"),
    };
    cell.get_or_init(|| load_data_uri(file)).as_str()
}

/// Icon for the "post a review" link.
pub fn review_button_icon() -> &'static str {
    REVIEW_BUTTON
        .get_or_init(|| load_data_uri("reviewbutton.svg"))
        .as_str()
}

fn load_text(path: &str) -> String {
    let asset = load_asset(path);
    String::from_utf8(asset.into_owned())
        .unwrap_or_else(|_| panic!("Embedded asset {path} is not valid UTF-8"))
}

fn load_data_uri(path: &str) -> String {
    let asset = load_asset(path);
    format!("data:{};base64,{}", guess_mime(path), STANDARD.encode(asset.as_ref()))
}

fn load_asset(path: &str) -> Cow<'static, [u8]> {
    EmbeddedAssets::get(path)
        .map(|file| file.data)
        .unwrap_or_else(|| panic!("Failed to locate embedded asset: {path}"))
}

fn guess_mime(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, ext)| ext) {
        Some("css") => "text/css",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_sentiment_has_its_own_icon() {
        let positive = sentiment_icon(Sentiment::Positive);
        let negative = sentiment_icon(Sentiment::Negative);
        let neutral = sentiment_icon(Sentiment::Neutral);

        for icon in [positive, negative, neutral, review_button_icon()] {
            assert!(icon.starts_with("data:image/svg+xml;base64,"));
        }
        assert_ne!(positive, negative);
        assert_ne!(positive, neutral);
        assert_ne!(negative, neutral);
    }

    #[test]
    fn unknown_labels_use_the_neutral_icon() {
        assert_eq!(
            sentiment_icon(Sentiment::from_label(Some("unknown"))),
            sentiment_icon(Sentiment::Neutral)
        );
        assert_eq!(
            sentiment_icon(Sentiment::from_label(None)),
            sentiment_icon(Sentiment::Neutral)
        );
    }

    #[test]
    fn stylesheet_is_embedded() {
        assert!(main_css().contains(".reviews_panel"));
    }
}
