use dioxus::{prelude::*, signals::Signal};
use tracing::{error, info, warn};

use crate::{
    domain::{AppState, SessionStore},
    infra::djangoapp::DealershipClient,
    ui::{
        components::toast::{ToastMessage, ToastTray},
        pages::{DealerPage, DealersPage, LoginPage, SettingsPage},
        shell::Shell,
    },
    util::{
        assets,
        config::{origin_label, ClientConfig},
        persistence::{load_persisted_state, save_persisted_state},
    },
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Dealers {},
    #[route("/dealers/:state")]
    DealersByState { state: String },
    #[route("/dealer/:id")]
    DealerDetail { id: String },
    #[route("/login")]
    Login {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(|| {
        load_persisted_state()
            .map(AppState::from_persisted)
            .unwrap_or_default()
    });
    use_context_provider(|| state);

    let session = use_signal(SessionStore::default);
    use_context_provider(|| session);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    let client = use_signal(|| build_client(&state.peek()));
    use_context_provider(|| client);

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        ToastTray {}
    }
}

fn build_client(state: &AppState) -> Option<DealershipClient> {
    let config = ClientConfig::resolve(state.saved_origin.as_deref()).unwrap_or_else(|err| {
        error!("[config] {err}; falling back to the default origin");
        ClientConfig::default()
    });
    match DealershipClient::new(&config) {
        Ok(client) => {
            info!("[config] Using backend {}", origin_label(client.origin()));
            Some(client)
        }
        Err(err) => {
            error!("[config] Failed to initialise HTTP client: {err}");
            None
        }
    }
}

pub fn persist_user_state(state: &Signal<AppState>) {
    let snapshot = state.with(|st| st.to_persisted());
    if let Err(err) = save_persisted_state(&snapshot) {
        warn!("[persist] Failed to persist user state: {err}");
    }
}

/// Points the shared client at the origin now in effect. The existing
/// client is re-targeted so its cookie jar survives.
pub fn apply_origin(mut client: Signal<Option<DealershipClient>>, state: &Signal<AppState>) {
    let saved = state.with(|st| st.saved_origin.clone());
    let config = match ClientConfig::resolve(saved.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            error!("[config] {err}; keeping the current origin");
            return;
        }
    };
    let current = client.peek().clone();
    let next = match current {
        Some(existing) => Some(existing.with_origin(config.origin)),
        None => build_client(&state.peek()),
    };
    if let Some(active) = next.as_ref() {
        info!("[config] Backend origin is now {}", origin_label(active.origin()));
    }
    client.set(next);
}

#[component]
pub fn Dealers() -> Element {
    rsx! { Shell { DealersPage { state_filter: None } } }
}

#[component]
pub fn DealersByState(state: String) -> Element {
    rsx! { Shell { DealersPage { state_filter: Some(state) } } }
}

#[component]
pub fn DealerDetail(id: String) -> Element {
    rsx! { Shell { DealerPage { dealer_id: id } } }
}

#[component]
pub fn Login() -> Element {
    rsx! { Shell { LoginPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
