use time::{macros::format_description, Date};

/// Identifier for dealers as it appears in routes and API paths.
pub type DealerId = String;

/// Dealer profile as returned by the dealership backend.
///
/// All fields are display values; the client enforces nothing beyond presence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dealer {
    pub id: DealerId,
    pub full_name: String,
    pub short_name: Option<String>,
    pub city: String,
    pub address: String,
    pub zip: String,
    pub state: String,
    /// Two-letter state code, when the backend supplies one.
    pub st: Option<String>,
}

impl Dealer {
    /// `"{city}, {address}, Zip - {zip}, {state}"`
    pub fn address_line(&self) -> String {
        format!(
            "{}, {}, Zip - {}, {}",
            self.city, self.address, self.zip, self.state
        )
    }

    /// Short name for compact listings, falling back to the full name.
    pub fn display_name(&self) -> &str {
        self.short_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.full_name)
    }
}

/// Coarse tone of a review as labelled by the backend's sentiment analyzer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    /// Exact, case-sensitive match; every other label is neutral.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("positive") => Sentiment::Positive,
            Some("negative") => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Review {
    /// Stable render key: the backend id, or a positional fallback.
    pub key: String,
    pub id: Option<String>,
    pub review: String,
    pub name: Option<String>,
    pub sentiment: Sentiment,
    /// Label exactly as received, kept for the icon's alt text.
    pub sentiment_label: Option<String>,
    pub car_make: Option<String>,
    pub car_model: Option<String>,
    pub car_year: Option<String>,
    pub purchase: Option<bool>,
    pub purchase_date: Option<Date>,
}

impl Review {
    pub fn reviewer_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Anonymous")
    }

    /// `"{name} • {make} {model} ({year})"` with absent vehicle parts left out.
    pub fn reviewer_line(&self) -> String {
        let mut vehicle = [self.car_make.as_deref(), self.car_model.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if let Some(year) = self.car_year.as_deref().filter(|y| !y.is_empty()) {
            if !vehicle.is_empty() {
                vehicle.push(' ');
            }
            vehicle.push_str(&format!("({year})"));
        }

        if vehicle.is_empty() {
            format!("{} •", self.reviewer_name())
        } else {
            format!("{} • {vehicle}", self.reviewer_name())
        }
    }

    pub fn sentiment_alt(&self) -> &str {
        self.sentiment_label
            .as_deref()
            .filter(|label| !label.trim().is_empty())
            .unwrap_or("Neutral")
    }

    /// "Purchased Jul 2020" for reviewers who bought from the dealer.
    pub fn purchase_note(&self) -> Option<String> {
        if self.purchase != Some(true) {
            return None;
        }
        let format = format_description!("[month repr:short] [year]");
        match self.purchase_date.and_then(|date| date.format(format).ok()) {
            Some(when) => Some(format!("Purchased {when}")),
            None => Some("Purchased here".to_string()),
        }
    }
}

/// Accepts `07/25/2020` (what the backend stores) and ISO `2020-07-25`.
pub fn parse_purchase_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    Date::parse(raw, format_description!("[month]/[day]/[year]"))
        .or_else(|_| Date::parse(raw, format_description!("[year]-[month]-[day]")))
        .ok()
}
