//! Placeholder for a protected console section.
//!
//! The real device, inspection, topology and report screens live outside
//! this crate. This page shows the section title, who is signed in, and the
//! result of the section's list endpoint, which exercises the authenticated
//! pipeline (including expiry handling) from a protected view.

#[cfg(test)]
#[path = "section_test.rs"]
mod section_test;

use std::sync::Arc;

use leptos::prelude::*;
use netops_session::ConsoleView;

use crate::app::WebConsole;
use crate::state::auth::AuthState;

/// One-line summary of a list endpoint's JSON.
pub fn summarize(value: &serde_json::Value) -> String {
    let items = value.get("data").unwrap_or(value);
    match items {
        serde_json::Value::Array(list) => format!("{} records", list.len()),
        serde_json::Value::Null => "No data".to_owned(),
        _ => "Loaded".to_owned(),
    }
}

#[component]
pub fn SectionPage(section: ConsoleView) -> impl IntoView {
    let console = expect_context::<Arc<WebConsole>>();
    let auth = AuthState::from_session(&console.session());

    let summary = RwSignal::new("Loading...".to_owned());
    #[cfg(feature = "csr")]
    {
        let console = Arc::clone(&console);
        leptos::task::spawn_local(async move {
            let request = netops_session::ApiRequest::get(section.path());
            let text = match console.request_json::<serde_json::Value>(request).await {
                Ok(value) => summarize(&value),
                Err(e) => format!("Could not load: {e}"),
            };
            summary.set(text);
        });
    }

    let on_sign_out = move |_| {
        if let Err(e) = console.sign_out() {
            summary.set(format!("Sign-out incomplete: {e}"));
        }
    };

    view! {
        <div class="section-page">
            <header class="section-page__header">
                <h1>{section.title()}</h1>
                <span class="section-page__user">{auth.label()}</span>
                <button class="btn" on:click=on_sign_out>"Sign out"</button>
            </header>
            <p class="section-page__summary">{move || summary.get()}</p>
        </div>
    }
}
