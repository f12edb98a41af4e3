use dioxus::prelude::*;

use crate::{
    app::{apply_origin, persist_user_state},
    domain::{AppState, SessionStore},
    infra::djangoapp::DealershipClient,
    ui::components::toast::{push_toast, ToastKind, ToastMessage},
    util::{
        assets,
        config::{origin_label, parse_origin, ClientConfig, DEFAULT_ORIGIN, ORIGIN_ENV},
        version::{version_label, APP_NAME},
    },
};

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let client = use_context::<Signal<Option<DealershipClient>>>();
    let session = use_context::<Signal<SessionStore>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let active_origin = client
        .read()
        .as_ref()
        .map(|client| origin_label(client.origin()))
        .unwrap_or_else(|| "unavailable".to_string());
    let initial = state
        .peek()
        .saved_origin
        .clone()
        .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
    let mut origin_input = use_signal(move || initial);
    let overridden = ClientConfig::origin_overridden();
    let signed_in_as = session.read().username().map(str::to_string);

    let on_apply = move |_| {
        let mut state = state;
        let raw = origin_input();
        match parse_origin(&raw) {
            Ok(url) => {
                let label = origin_label(&url);
                state.with_mut(|st| st.saved_origin = Some(label.clone()));
                persist_user_state(&state);
                apply_origin(client, &state);
                origin_input.set(label.clone());
                if ClientConfig::origin_overridden() {
                    push_toast(
                        toasts,
                        ToastKind::Warning,
                        format!("Saved {label}, but {ORIGIN_ENV} still decides the backend."),
                    );
                } else {
                    push_toast(toasts, ToastKind::Success, format!("Backend origin set to {label}."));
                }
            }
            Err(err) => push_toast(toasts, ToastKind::Error, err.to_string()),
        }
    };

    let on_reset = move |_| {
        let mut state = state;
        state.with_mut(|st| st.saved_origin = None);
        persist_user_state(&state);
        apply_origin(client, &state);
        origin_input.set(DEFAULT_ORIGIN.to_string());
        push_toast(toasts, ToastKind::Info, "Restored the default backend origin.");
    };

    let on_clear_session = move |_| {
        let mut session = session;
        session.with_mut(|store| store.clear());
        push_toast(toasts, ToastKind::Info, "Cleared the local session.");
    };

    rsx! {
        div { class: "settings-page",
            section { class: "card",
                h2 { "Backend" }
                div { class: "field",
                    label { r#for: "origin", "Origin" }
                    input {
                        id: "origin",
                        value: origin_input(),
                        oninput: move |evt| origin_input.set(evt.value()),
                    }
                }
                p { class: "hint", "Currently talking to {active_origin}." }
                if overridden {
                    p { class: "hint", "{ORIGIN_ENV} is set and takes precedence over the saved origin." }
                }
                div { class: "button-row",
                    button { class: "btn", onclick: on_apply, "Apply" }
                    button { class: "btn secondary", onclick: on_reset, "Reset Default" }
                }
            }

            section { class: "card",
                h2 { "Session" }
                match signed_in_as {
                    Some(name) => rsx! { p { "Signed in as {name}." } },
                    None => rsx! { p { class: "hint", "Not signed in." } },
                }
                button { class: "btn secondary", onclick: on_clear_session, "Clear Session" }
            }

            section { class: "card",
                h2 { "About" }
                div { class: "reviews-legend",
                    img { class: "emotion_icon", src: assets::review_button_icon(), alt: "Post Review" }
                    p { "{APP_NAME} {version_label()}" }
                }
            }
        }
    }
}
