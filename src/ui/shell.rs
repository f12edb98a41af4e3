use dioxus::prelude::*;
use tracing::{info, warn};

use crate::app::Route;
use crate::domain::{SessionStore, USERNAME_KEY};
use crate::infra::djangoapp::DealershipClient;
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::util::version::{version_label, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    let current_route = use_route::<Route>();
    let session = use_context::<Signal<SessionStore>>();
    let username = session.read().username().map(str::to_string);

    let on_dealers = matches!(
        current_route,
        Route::Dealers {} | Route::DealersByState { .. } | Route::DealerDetail { .. }
    );
    let on_settings = matches!(current_route, Route::Settings {});

    rsx! {
        div { class: "app-shell",
            header { class: "app-header",
                Link { class: "brand", to: Route::Dealers {}, "{APP_NAME}" }
                nav {
                    NavLink { active: on_dealers, to: Route::Dealers {}, label: "Dealers" }
                    NavLink { active: on_settings, to: Route::Settings {}, label: "Settings" }
                }
                match username {
                    Some(name) => rsx! { SessionBadge { username: name } },
                    None => rsx! {
                        Link { class: "btn subtle", to: Route::Login {}, "Login" }
                    },
                }
            }
            main { class: "app-main",
                {children}
            }
            footer { class: "app-footer", "{APP_NAME} {version_label()}" }
        }
    }
}

#[component]
fn NavLink(active: bool, to: Route, label: &'static str) -> Element {
    let class = if active { "nav-link active" } else { "nav-link" };
    rsx! {
        Link { class: "{class}", to, "{label}" }
    }
}

#[component]
fn SessionBadge(username: String) -> Element {
    let client = use_context::<Signal<Option<DealershipClient>>>();
    let session = use_context::<Signal<SessionStore>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let on_logout = move |_| {
        let client = client();
        spawn(async move {
            let mut session = session;
            if let Some(client) = client {
                if let Err(err) = client.logout().await {
                    warn!("[session] Logout request failed: {err}");
                }
            }
            // The local marker goes regardless of what the backend said.
            session.with_mut(|store| {
                store.remove_item(USERNAME_KEY);
            });
            info!("[session] Signed out");
            push_toast(toasts, ToastKind::Info, "Signed out.");
        });
    };

    rsx! {
        div { class: "session-badge",
            span { "Signed in as {username}" }
            button { class: "btn subtle", onclick: on_logout, "Logout" }
        }
    }
}
