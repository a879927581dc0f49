//! Login page: username + password sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::sync::Arc;

use leptos::prelude::*;
use netops_session::ClientError;

use crate::app::WebConsole;

/// Message shown under the form for a failed sign-in.
pub fn login_error_message(err: &ClientError) -> String {
    match err {
        ClientError::Rejected { message, .. } if !message.is_empty() => message.clone(),
        ClientError::Rejected { .. } => "Sign-in was refused.".to_owned(),
        ClientError::Transport(_) => "Cannot reach the server. Try again shortly.".to_owned(),
        other => format!("Sign-in failed: {other}"),
    }
}

/// Login page. On success the console stores the session and continues to
/// the preserved destination.
#[component]
pub fn LoginPage() -> impl IntoView {
    let console = expect_context::<Arc<WebConsole>>();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let credentials = netops_session::Credentials::new(username.get().trim(), password.get());
        if let Err(e) = credentials.validate() {
            info.set(login_error_message(&e));
            return;
        }
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "csr")]
        {
            let console = Arc::clone(&console);
            leptos::task::spawn_local(async move {
                if let Err(e) = console.login(&credentials).await {
                    info.set(login_error_message(&e));
                    busy.set(false);
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&console, credentials);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"NetOps Console"</h1>
                <p class="login-card__subtitle">"Sign in to continue"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
