//! View state for a single dealer page.
//!
//! - Two fetches (dealer, reviews) land independently and in any order.
//! - Rendering is derived from the state via [`DealerPageState::view`].
//! - Each activation gets a new generation; replies from older ones are dropped.

use super::entities::{Dealer, DealerId, Review};

/// Handed out by [`DealerPageState::begin`] and carried by each fetch so its
/// reply can be matched against the activation that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DealerPageState {
    dealer_id: Option<DealerId>,
    generation: u64,
    dealer: Option<Dealer>,
    reviews: Vec<Review>,
    loading_dealer: bool,
    loading_reviews: bool,
    error: Option<String>,
    post_review_href: Option<String>,
}

impl Default for DealerPageState {
    fn default() -> Self {
        Self {
            dealer_id: None,
            generation: 0,
            dealer: None,
            reviews: Vec::new(),
            loading_dealer: true,
            loading_reviews: true,
            error: None,
            post_review_href: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PageView {
    Loading,
    Error(String),
    Missing,
    Loaded {
        dealer: Dealer,
        post_review_href: Option<String>,
        reviews: ReviewsView,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum ReviewsView {
    Loading,
    Empty,
    List(Vec<Review>),
}

impl DealerPageState {
    /// Resets the page for `dealer_id` and starts a new generation.
    ///
    /// `post_review_href` is decided once here; session changes after this
    /// point do not show or hide the link.
    pub fn begin(
        &mut self,
        dealer_id: impl Into<DealerId>,
        post_review_href: Option<String>,
    ) -> FetchTicket {
        let generation = self.generation.wrapping_add(1);
        *self = Self {
            dealer_id: Some(dealer_id.into()),
            generation,
            post_review_href,
            ..Self::default()
        };
        FetchTicket { generation }
    }

    pub fn dealer_id(&self) -> Option<&str> {
        self.dealer_id.as_deref()
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Returns `false` when the reply belongs to an older activation.
    pub fn apply_dealer(&mut self, ticket: FetchTicket, outcome: Result<Dealer, String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        match outcome {
            Ok(dealer) => self.dealer = Some(dealer),
            Err(message) => self.record_error(message),
        }
        self.loading_dealer = false;
        true
    }

    /// Returns `false` when the reply belongs to an older activation.
    pub fn apply_reviews(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<Review>, String>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        match outcome {
            Ok(reviews) => self.reviews = reviews,
            Err(message) => self.record_error(message),
        }
        self.loading_reviews = false;
        true
    }

    // Dealer and reviews share one slot; the first failure stays visible.
    fn record_error(&mut self, message: String) {
        if self.error.is_none() {
            self.error = Some(message);
        }
    }

    /// Like [`Self::view`], but stays `Loading` until the state has been reset
    /// for `dealer_id`, so a previous dealer is never shown under a new route.
    pub fn view_for(&self, dealer_id: &str) -> PageView {
        if self.dealer_id() != Some(dealer_id) {
            return PageView::Loading;
        }
        self.view()
    }

    pub fn view(&self) -> PageView {
        if self.loading_dealer {
            return PageView::Loading;
        }
        if let Some(message) = &self.error {
            return PageView::Error(message.clone());
        }
        let Some(dealer) = &self.dealer else {
            return PageView::Missing;
        };

        let reviews = if self.loading_reviews {
            ReviewsView::Loading
        } else if self.reviews.is_empty() {
            ReviewsView::Empty
        } else {
            ReviewsView::List(self.reviews.clone())
        };

        PageView::Loaded {
            dealer: dealer.clone(),
            post_review_href: self.post_review_href.clone(),
            reviews,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Sentiment;

    fn acme() -> Dealer {
        Dealer {
            id: "1".into(),
            full_name: "Acme Motors".into(),
            city: "Springfield".into(),
            address: "1 Main St".into(),
            zip: "00001".into(),
            state: "IL".into(),
            ..Dealer::default()
        }
    }

    fn review(key: &str, sentiment: Sentiment) -> Review {
        Review {
            key: key.into(),
            id: Some(key.into()),
            review: "Fine".into(),
            name: Some("Pat".into()),
            sentiment,
            sentiment_label: Some(sentiment.label().into()),
            car_make: None,
            car_model: None,
            car_year: None,
            purchase: None,
            purchase_date: None,
        }
    }

    #[test]
    fn starts_loading() {
        let mut state = DealerPageState::default();
        assert_eq!(state.view(), PageView::Loading);
        state.begin("1", None);
        assert_eq!(state.view(), PageView::Loading);
        assert_eq!(state.dealer_id(), Some("1"));
    }

    #[test]
    fn reviews_can_arrive_before_dealer() {
        let mut state = DealerPageState::default();
        let ticket = state.begin("1", None);

        assert!(state.apply_reviews(ticket, Ok(vec![review("7", Sentiment::Positive)])));
        assert_eq!(state.view(), PageView::Loading);

        assert!(state.apply_dealer(ticket, Ok(acme())));
        match state.view() {
            PageView::Loaded { dealer, reviews, .. } => {
                assert_eq!(dealer.full_name, "Acme Motors");
                assert_eq!(reviews, ReviewsView::List(vec![review("7", Sentiment::Positive)]));
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn dealer_first_shows_reviews_loading() {
        let mut state = DealerPageState::default();
        let ticket = state.begin("1", None);
        state.apply_dealer(ticket, Ok(acme()));
        match state.view() {
            PageView::Loaded { reviews, .. } => assert_eq!(reviews, ReviewsView::Loading),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn empty_reviews_are_not_an_error() {
        let mut state = DealerPageState::default();
        let ticket = state.begin("1", None);
        state.apply_dealer(ticket, Ok(acme()));
        state.apply_reviews(ticket, Ok(Vec::new()));
        match state.view() {
            PageView::Loaded { reviews, .. } => assert_eq!(reviews, ReviewsView::Empty),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn dealer_failure_hides_dealer_fields() {
        let mut state = DealerPageState::default();
        let ticket = state.begin("1", None);
        state.apply_dealer(
            ticket,
            Err("Failed to load dealer: HTTP error! Status: 500".into()),
        );
        state.apply_reviews(ticket, Ok(Vec::new()));
        assert_eq!(
            state.view(),
            PageView::Error("Failed to load dealer: HTTP error! Status: 500".into())
        );
    }

    #[test]
    fn reviews_failure_masks_loaded_dealer() {
        let mut state = DealerPageState::default();
        let ticket = state.begin("1", None);
        state.apply_dealer(ticket, Ok(acme()));
        state.apply_reviews(ticket, Err("Failed to load reviews".into()));
        assert_eq!(state.view(), PageView::Error("Failed to load reviews".into()));
    }

    #[test]
    fn first_error_wins() {
        let mut state = DealerPageState::default();
        let ticket = state.begin("1", None);
        state.apply_reviews(ticket, Err("reviews broke".into()));
        state.apply_dealer(ticket, Err("dealer broke".into()));
        assert_eq!(state.view(), PageView::Error("reviews broke".into()));
    }

    #[test]
    fn missing_dealer_without_error() {
        let mut state = DealerPageState::default();
        state.begin("1", None);
        // Only reachable if the dealer fetch completes with neither payload nor error.
        state.loading_dealer = false;
        assert_eq!(state.view(), PageView::Missing);
    }

    #[test]
    fn stale_replies_are_dropped() {
        let mut state = DealerPageState::default();
        let old = state.begin("1", None);
        let current = state.begin("2", None);

        assert!(!state.apply_dealer(old, Ok(acme())));
        assert!(!state.apply_reviews(old, Err("late failure".into())));
        assert_eq!(state.view(), PageView::Loading);

        let mut second = acme();
        second.id = "2".into();
        second.full_name = "Second Dealer".into();
        assert!(state.apply_dealer(current, Ok(second)));
        match state.view() {
            PageView::Loaded { dealer, .. } => assert_eq!(dealer.full_name, "Second Dealer"),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn previous_dealer_is_not_shown_for_a_new_id() {
        let mut state = DealerPageState::default();
        let ticket = state.begin("1", None);
        state.apply_dealer(ticket, Ok(acme()));
        state.apply_reviews(ticket, Ok(Vec::new()));
        assert!(matches!(state.view_for("1"), PageView::Loaded { .. }));

        // The route already says "2" but the state has not been reset yet.
        assert_eq!(state.view_for("2"), PageView::Loading);
        assert_eq!(DealerPageState::default().view_for("1"), PageView::Loading);
    }

    #[test]
    fn post_review_link_fixed_at_activation() {
        let mut state = DealerPageState::default();
        let ticket = state.begin("1", Some("http://localhost:8000/postreview/1".into()));
        state.apply_dealer(ticket, Ok(acme()));
        match state.view() {
            PageView::Loaded { post_review_href, .. } => assert_eq!(
                post_review_href.as_deref(),
                Some("http://localhost:8000/postreview/1")
            ),
            other => panic!("unexpected view {other:?}"),
        }

        let ticket = state.begin("1", None);
        state.apply_dealer(ticket, Ok(acme()));
        match state.view() {
            PageView::Loaded { post_review_href, .. } => assert_eq!(post_review_href, None),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn same_inputs_render_the_same() {
        let run = |state: &mut DealerPageState| {
            let ticket = state.begin("1", None);
            state.apply_dealer(ticket, Ok(acme()));
            state.apply_reviews(ticket, Ok(vec![review("3", Sentiment::Negative)]));
            state.view()
        };

        let mut state = DealerPageState::default();
        let first = run(&mut state);
        let second = run(&mut state);
        assert_eq!(first, second);
    }
}
