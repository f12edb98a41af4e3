//! Asynchronous client for the dealership backend's `djangoapp` endpoints.
//!
//! - Typed accessors for dealers, reviews and the session endpoints.
//! - A shared cookie store, so the session cookie set by login rides along.
//! - Every response body is logged at debug level before it is decoded.

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{parse_purchase_date, Dealer, Review, Sentiment};
use crate::util::{config::ClientConfig, version::user_agent};

const DEALER_REJECTED: &str = "Dealer not found or invalid response";
const REVIEWS_REJECTED: &str = "Failed to load reviews";
const DEALERS_REJECTED: &str = "Failed to load dealers";
const LOGIN_REJECTED: &str = "Login failed";

#[derive(Debug, Error)]
pub enum DealershipError {
    #[error("origin {0} cannot be used as a base URL")]
    InvalidOrigin(String),
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP error! Status: {0}")]
    Status(u16),
    #[error("invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),
    /// The backend answered but refused or had nothing to give.
    #[error("{0}")]
    Rejected(String),
}

impl DealershipError {
    /// Message shown to users. Rejections carry their own wording; transport
    /// failures are prefixed with what was being loaded.
    pub fn user_message(&self, what: &str) -> String {
        match self {
            DealershipError::Rejected(message) => message.clone(),
            other => format!("Failed to load {what}: {other}"),
        }
    }
}

#[derive(Clone)]
pub struct DealershipClient {
    http: Client,
    origin: Url,
}

impl DealershipClient {
    pub fn new(config: &ClientConfig) -> Result<Self, DealershipError> {
        let http = Client::builder()
            .user_agent(user_agent())
            .cookie_store(true)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            origin: config.origin.clone(),
        })
    }

    /// Same connection pool and cookies, different backend origin.
    pub fn with_origin(&self, origin: Url) -> Self {
        Self {
            http: self.http.clone(),
            origin,
        }
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// `GET /djangoapp/dealer/{id}`
    pub async fn get_dealer(&self, dealer_id: &str) -> Result<Dealer, DealershipError> {
        let url = self.endpoint(&["djangoapp", "dealer", dealer_id])?;
        let envelope: DealerEnvelope = self.fetch_json("dealer", self.http.get(url)).await?;

        if !is_ok_status(envelope.status.as_ref()) {
            return Err(DealershipError::Rejected(DEALER_REJECTED.into()));
        }
        envelope
            .dealer
            .and_then(|value| match serde_json::from_value::<DealerPayload>(value) {
                Ok(payload) => payload.into_first(),
                Err(err) => {
                    warn!("[djangoapp] dealer {dealer_id} has an unusable payload: {err}");
                    None
                }
            })
            .map(Dealer::from)
            .ok_or_else(|| DealershipError::Rejected(DEALER_REJECTED.into()))
    }

    /// `GET /djangoapp/reviews/dealer/{id}`; an absent list is an empty one.
    pub async fn get_dealer_reviews(&self, dealer_id: &str) -> Result<Vec<Review>, DealershipError> {
        let url = self.endpoint(&["djangoapp", "reviews", "dealer", dealer_id])?;
        let envelope: ReviewsEnvelope = self.fetch_json("reviews", self.http.get(url)).await?;

        if !is_ok_status(envelope.status.as_ref()) {
            return Err(DealershipError::Rejected(
                envelope
                    .message
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| REVIEWS_REJECTED.to_string()),
            ));
        }

        // Anything but a list counts as no reviews; odd entries render blank.
        let entries = match envelope.reviews {
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                warn!("[djangoapp] reviews for dealer {dealer_id} are not a list: {other}");
                Vec::new()
            }
            None => Vec::new(),
        };
        let reviews = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| ReviewDto::from_entry(dealer_id, index, entry).into_review(index))
            .collect::<Vec<_>>();
        debug!("[djangoapp] {} reviews for dealer {dealer_id}", reviews.len());
        Ok(reviews)
    }

    /// `GET /djangoapp/get_dealers` or `/djangoapp/get_dealers/{state}`.
    pub async fn get_dealers(&self, state: Option<&str>) -> Result<Vec<Dealer>, DealershipError> {
        let url = match state.filter(|s| !s.is_empty()) {
            Some(state) => self.endpoint(&["djangoapp", "get_dealers", state])?,
            None => self.endpoint(&["djangoapp", "get_dealers"])?,
        };
        let envelope: DealersEnvelope = self.fetch_json("dealers", self.http.get(url)).await?;

        if !is_ok_status(envelope.status.as_ref()) {
            return Err(DealershipError::Rejected(DEALERS_REJECTED.into()));
        }
        Ok(envelope
            .dealers
            .unwrap_or_default()
            .into_iter()
            .map(Dealer::from)
            .collect())
    }

    /// `POST /djangoapp/login`; returns the user name the backend confirmed.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, DealershipError> {
        let url = self.endpoint(&["djangoapp", "login"])?;
        let body = LoginRequest {
            user_name: username,
            password,
        };
        let (status, text) = self.send("login", self.http.post(url).json(&body)).await?;

        // Bad credentials come back as 4xx with an `error` field worth showing.
        if !status.is_success() && !status.is_client_error() {
            return Err(DealershipError::Status(status.as_u16()));
        }
        let reply: LoginReply = serde_json::from_str(&text)?;
        match reply {
            LoginReply {
                user_name: Some(name),
                status: Some(state),
                ..
            } if status.is_success() && state == "Authenticated" => {
                info!("[djangoapp] Signed in as {name}");
                Ok(name)
            }
            LoginReply { error, .. } => Err(DealershipError::Rejected(
                error.unwrap_or_else(|| LOGIN_REJECTED.to_string()),
            )),
        }
    }

    /// `GET /djangoapp/logout`
    pub async fn logout(&self) -> Result<(), DealershipError> {
        let url = self.endpoint(&["djangoapp", "logout"])?;
        let _: serde_json::Value = self.fetch_json("logout", self.http.get(url)).await?;
        info!("[djangoapp] Signed out");
        Ok(())
    }

    /// Where reviews for `dealer_id` are written (served by the web frontend).
    pub fn post_review_url(&self, dealer_id: &str) -> Result<Url, DealershipError> {
        self.endpoint(&["postreview", dealer_id])
    }

    async fn fetch_json<T>(&self, label: &str, builder: RequestBuilder) -> Result<T, DealershipError>
    where
        T: DeserializeOwned,
    {
        let (status, text) = self.send(label, builder).await?;
        if !status.is_success() {
            warn!("[djangoapp] {label} request failed with status {status}");
            return Err(DealershipError::Status(status.as_u16()));
        }
        serde_json::from_str(&text).map_err(|err| {
            warn!("[djangoapp] {label} payload did not decode: {err}");
            DealershipError::from(err)
        })
    }

    async fn send(
        &self,
        label: &str,
        builder: RequestBuilder,
    ) -> Result<(StatusCode, String), DealershipError> {
        let response = builder.send().await.map_err(|err| {
            warn!("[djangoapp] {label} request did not complete: {err}");
            err
        })?;
        let status = response.status();
        let text = response.text().await?;
        debug!("[djangoapp] {label} response ({status}): {text}");
        Ok((status, text))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, DealershipError> {
        let mut url = self.origin.clone();
        url.path_segments_mut()
            .map_err(|_| DealershipError::InvalidOrigin(self.origin.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "userName")]
    user_name: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginReply {
    #[serde(default, rename = "userName")]
    user_name: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DealerEnvelope {
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    dealer: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ReviewsEnvelope {
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    reviews: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct DealersEnvelope {
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    dealers: Option<Vec<DealerDto>>,
}

/// The embedded status must be the number 200; `"200"` or anything else is a refusal.
fn is_ok_status(status: Option<&Value>) -> bool {
    status.and_then(Value::as_i64) == Some(200)
}

/// Some backends wrap the dealer in a one-element list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DealerPayload {
    Many(Vec<DealerDto>),
    One(DealerDto),
}

impl DealerPayload {
    fn into_first(self) -> Option<DealerDto> {
        match self {
            DealerPayload::Many(list) => list.into_iter().next(),
            DealerPayload::One(dealer) => Some(dealer),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DealerDto {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    zip: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    st: Option<String>,
}

impl From<DealerDto> for Dealer {
    fn from(dto: DealerDto) -> Self {
        Self {
            id: dto.id.unwrap_or_default(),
            full_name: dto.full_name.unwrap_or_default(),
            short_name: dto.short_name,
            city: dto.city.unwrap_or_default(),
            address: dto.address.unwrap_or_default(),
            zip: dto.zip.unwrap_or_default(),
            state: dto.state.unwrap_or_default(),
            st: dto.st,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ReviewDto {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(default)]
    review: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    sentiment: Option<String>,
    #[serde(default)]
    car_make: Option<String>,
    #[serde(default)]
    car_model: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    car_year: Option<String>,
    #[serde(default)]
    purchase: Option<bool>,
    #[serde(default)]
    purchase_date: Option<String>,
}

impl ReviewDto {
    fn from_entry(dealer_id: &str, index: usize, entry: Value) -> Self {
        serde_json::from_value(entry).unwrap_or_else(|err| {
            warn!("[djangoapp] review #{index} for dealer {dealer_id} did not decode: {err}");
            Self::default()
        })
    }

    fn into_review(self, index: usize) -> Review {
        let key = self
            .id
            .clone()
            .unwrap_or_else(|| format!("review-{index}"));
        Review {
            key,
            id: self.id,
            review: self.review.unwrap_or_default(),
            name: self.name,
            sentiment: Sentiment::from_label(self.sentiment.as_deref()),
            sentiment_label: self.sentiment,
            car_make: self.car_make,
            car_model: self.car_model,
            car_year: self.car_year,
            purchase: self.purchase,
            purchase_date: self.purchase_date.as_deref().and_then(parse_purchase_date),
        }
    }
}

/// Accepts strings, integers, floats and null; the backend is not consistent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct StringOrNumber;

    impl<'de> serde::de::Visitor<'de> for StringOrNumber {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string, number or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}
