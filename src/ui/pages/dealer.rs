//! Dealer profile with its reviews.

use dioxus::prelude::*;
use tracing::{debug, error, warn};

use crate::{
    domain::{DealerPageState, FetchTicket, PageView, ReviewsView, SessionStore},
    infra::djangoapp::DealershipClient,
    ui::components::review_card::ReviewCard,
    util::assets,
};

const CLIENT_UNAVAILABLE: &str = "HTTP client unavailable; check the backend settings.";

#[component]
pub fn DealerPage(dealer_id: String) -> Element {
    let client = use_context::<Signal<Option<DealershipClient>>>();
    let session = use_context::<Signal<SessionStore>>();
    let mut page = use_signal(DealerPageState::default);
    let showing = dealer_id.clone();

    // Runs on mount and whenever the route hands us a different dealer.
    use_effect(use_reactive!(|(dealer_id,)| {
        let client = client.peek().clone();
        let href = client
            .as_ref()
            .and_then(|client| post_review_href(&session.peek(), client, &dealer_id));
        let ticket = page.with_mut(|st| st.begin(dealer_id.clone(), href));

        let Some(client) = client else {
            page.with_mut(|st| {
                st.apply_dealer(ticket, Err(CLIENT_UNAVAILABLE.to_string()));
                st.apply_reviews(ticket, Err(CLIENT_UNAVAILABLE.to_string()));
            });
            return;
        };
        spawn(load_dealer(page, client.clone(), dealer_id.clone(), ticket));
        spawn(load_reviews(page, client, dealer_id, ticket));
    }));

    let view = page.read().view_for(&showing);
    match view {
        PageView::Loading => rsx! {
            div { class: "status-panel", "Loading dealer information..." }
        },
        PageView::Error(message) => rsx! {
            div { class: "status-panel error",
                h2 { "Error" }
                p { "{message}" }
                p { "Check the log for details or try refreshing." }
            }
        },
        PageView::Missing => rsx! {
            div { class: "status-panel", "No dealer found" }
        },
        PageView::Loaded {
            dealer,
            post_review_href,
            reviews,
        } => rsx! {
            div { class: "dealer-page",
                div { class: "dealer-heading",
                    h1 { class: "dealer-name", "{dealer.full_name}" }
                    if let Some(href) = post_review_href {
                        a { href: "{href}", title: "Post a Review",
                            img {
                                class: "post-review-icon",
                                src: assets::review_button_icon(),
                                alt: "Post Review",
                            }
                        }
                    }
                }
                h4 { class: "dealer-address", "{dealer.address_line()}" }
                div { class: "reviews_panel",
                    match reviews {
                        ReviewsView::Loading => rsx! { div { "Loading Reviews..." } },
                        ReviewsView::Empty => rsx! {
                            div { class: "reviews-empty", "No reviews yet. Be the first to review!" }
                        },
                        ReviewsView::List(list) => rsx! {
                            for review in list {
                                ReviewCard { key: "{review.key}", review: review.clone() }
                            }
                        },
                    }
                }
            }
        },
    }
}

/// Link target for writing a review, shown only to signed-in users.
fn post_review_href(
    session: &SessionStore,
    client: &DealershipClient,
    dealer_id: &str,
) -> Option<String> {
    if !session.is_signed_in() {
        return None;
    }
    match client.post_review_url(dealer_id) {
        Ok(url) => Some(url.to_string()),
        Err(err) => {
            warn!("[dealer] No post-review link for {dealer_id}: {err}");
            None
        }
    }
}

async fn load_dealer(
    mut page: Signal<DealerPageState>,
    client: DealershipClient,
    dealer_id: String,
    ticket: FetchTicket,
) {
    let outcome = client.get_dealer(&dealer_id).await.map_err(|err| {
        error!("[dealer] Error fetching dealer {dealer_id}: {err}");
        err.user_message("dealer")
    });
    if !page.with_mut(|st| st.apply_dealer(ticket, outcome)) {
        debug!("[dealer] Dropped stale dealer response for {dealer_id}");
    }
}

async fn load_reviews(
    mut page: Signal<DealerPageState>,
    client: DealershipClient,
    dealer_id: String,
    ticket: FetchTicket,
) {
    let outcome = client.get_dealer_reviews(&dealer_id).await.map_err(|err| {
        error!("[dealer] Error fetching reviews for {dealer_id}: {err}");
        err.user_message("reviews")
    });
    if !page.with_mut(|st| st.apply_reviews(ticket, outcome)) {
        debug!(
            "[dealer] Dropped stale reviews response for {dealer_id} (showing {:?})",
            page.peek().dealer_id()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::USERNAME_KEY;
    use crate::util::config::ClientConfig;

    fn client() -> DealershipClient {
        DealershipClient::new(&ClientConfig::default()).unwrap()
    }

    #[test]
    fn no_link_without_session_marker() {
        let session = SessionStore::default();
        assert_eq!(post_review_href(&session, &client(), "15"), None);
    }

    #[test]
    fn link_targets_post_review_route() {
        let mut session = SessionStore::default();
        session.set_item(USERNAME_KEY, "jdoe");
        assert_eq!(
            post_review_href(&session, &client(), "15").as_deref(),
            Some("http://localhost:8000/postreview/15")
        );
    }
}
