use dioxus::prelude::*;
use tracing::warn;

use crate::{
    app::Route,
    domain::{SessionStore, USERNAME_KEY},
    infra::djangoapp::DealershipClient,
    ui::components::toast::{push_toast, ToastKind, ToastMessage},
};

#[component]
pub fn LoginPage() -> Element {
    let client = use_context::<Signal<Option<DealershipClient>>>();
    let session = use_context::<Signal<SessionStore>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();

    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut form_error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let (name, secret) = match validate(&username(), &password()) {
            Ok(pair) => pair,
            Err(message) => {
                form_error.set(Some(message.to_string()));
                return;
            }
        };
        let Some(client) = client() else {
            form_error.set(Some("HTTP client unavailable; check the backend settings.".into()));
            return;
        };

        form_error.set(None);
        submitting.set(true);
        spawn(async move {
            let mut session = session;
            match client.login(&name, &secret).await {
                Ok(confirmed) => {
                    session.with_mut(|store| store.set_item(USERNAME_KEY, confirmed.clone()));
                    push_toast(toasts, ToastKind::Success, format!("Signed in as {confirmed}."));
                    password.set(String::new());
                    nav.push(Route::Dealers {});
                }
                Err(err) => {
                    warn!("[session] Login failed for {name}: {err}");
                    form_error.set(Some(err.to_string()));
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "card login-card",
            h2 { "Sign in" }
            form { onsubmit: on_submit,
                div { class: "field",
                    label { r#for: "username", "Username" }
                    input {
                        id: "username",
                        value: username(),
                        autocomplete: "username",
                        oninput: move |evt| username.set(evt.value()),
                    }
                }
                div { class: "field",
                    label { r#for: "password", "Password" }
                    input {
                        id: "password",
                        r#type: "password",
                        value: password(),
                        autocomplete: "current-password",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                if let Some(message) = form_error() {
                    p { class: "form-error", "{message}" }
                }
                div { class: "button-row",
                    button { class: "btn", r#type: "submit", disabled: submitting(), "Login" }
                    Link { class: "btn secondary", to: Route::Dealers {}, "Cancel" }
                }
            }
        }
    }
}

/// Trims the user name; the password is sent as typed.
fn validate(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() {
        return Err("Enter a username.");
    }
    if password.is_empty() {
        return Err("Enter a password.");
    }
    Ok((username.to_string(), password.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_both_fields() {
        assert_eq!(validate("  ", "pw"), Err("Enter a username."));
        assert_eq!(validate("jdoe", ""), Err("Enter a password."));
        assert_eq!(
            validate(" jdoe ", " pw "),
            Ok(("jdoe".to_string(), " pw ".to_string()))
        );
    }
}
