use dioxus::prelude::*;
use tracing::error;

use crate::{
    app::Route,
    domain::Dealer,
    infra::djangoapp::DealershipClient,
};

const ALL_STATES: &str = "All";

#[component]
pub fn DealersPage(state_filter: Option<String>) -> Element {
    let client = use_context::<Signal<Option<DealershipClient>>>();
    let nav = use_navigator();
    let current = state_filter.clone();

    let dealers = use_resource(use_reactive!(|(state_filter,)| {
        let client = client();
        async move {
            let Some(client) = client else {
                return Err("HTTP client unavailable; check the backend settings.".to_string());
            };
            client
                .get_dealers(state_filter.as_deref())
                .await
                .map_err(|err| {
                    error!("[dealers] Error fetching dealers: {err}");
                    err.user_message("dealers")
                })
        }
    }));

    let snapshot = dealers.read().clone();
    let options = match &snapshot {
        Some(Ok(list)) => state_options(list, current.as_deref()),
        _ => state_options(&[], current.as_deref()),
    };
    let selected = current.unwrap_or_else(|| ALL_STATES.to_string());

    let body = match snapshot {
        None => rsx! { div { class: "status-panel", "Loading dealers..." } },
        Some(Err(message)) => rsx! {
            div { class: "status-panel error",
                h2 { "Error" }
                p { "{message}" }
            }
        },
        Some(Ok(list)) if list.is_empty() => rsx! {
            div { class: "status-panel", "No dealers found" }
        },
        Some(Ok(list)) => rsx! {
            table { class: "dealer-table",
                thead {
                    tr {
                        th { "Dealer" }
                        th { "City" }
                        th { "Address" }
                        th { "Zip" }
                        th { "State" }
                    }
                }
                tbody {
                    for dealer in list {
                        DealerRow { key: "{dealer.id}", dealer: dealer.clone() }
                    }
                }
            }
        },
    };

    rsx! {
        div { class: "dealers-page",
            div { class: "toolbar",
                h1 { "Dealerships" }
                select {
                    value: "{selected}",
                    onchange: move |evt: FormEvent| {
                        let value = evt.value();
                        if value == ALL_STATES {
                            nav.push(Route::Dealers {});
                        } else {
                            nav.push(Route::DealersByState { state: value });
                        }
                    },
                    for name in options {
                        option { value: "{name}", selected: name == selected, "{name}" }
                    }
                }
            }
            {body}
        }
    }
}

#[component]
fn DealerRow(dealer: Dealer) -> Element {
    let state = dealer.st.clone().unwrap_or_else(|| dealer.state.clone());
    rsx! {
        tr {
            td {
                if dealer.id.is_empty() {
                    "{dealer.display_name()}"
                } else {
                    Link {
                        to: Route::DealerDetail { id: dealer.id.clone() },
                        "{dealer.full_name}"
                    }
                }
            }
            td { "{dealer.city}" }
            td { "{dealer.address}" }
            td { "{dealer.zip}" }
            td { "{state}" }
        }
    }
}

/// "All" first, then every state present in the listing, sorted.
fn state_options(dealers: &[Dealer], current: Option<&str>) -> Vec<String> {
    let mut states = dealers
        .iter()
        .map(|dealer| dealer.state.trim().to_string())
        .chain(current.map(str::to_string))
        .filter(|state| !state.is_empty() && state != ALL_STATES)
        .collect::<Vec<_>>();
    states.sort();
    states.dedup();

    let mut options = Vec::with_capacity(states.len() + 1);
    options.push(ALL_STATES.to_string());
    options.extend(states);
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dealer(state: &str) -> Dealer {
        Dealer {
            state: state.into(),
            ..Dealer::default()
        }
    }

    #[test]
    fn options_are_sorted_and_unique() {
        let list = [dealer("Texas"), dealer("Kansas"), dealer("Texas"), dealer("")];
        assert_eq!(state_options(&list, None), vec!["All", "Kansas", "Texas"]);
    }

    #[test]
    fn current_filter_is_always_offered() {
        assert_eq!(state_options(&[], Some("Ohio")), vec!["All", "Ohio"]);
        assert_eq!(state_options(&[], Some("All")), vec!["All"]);
    }
}
