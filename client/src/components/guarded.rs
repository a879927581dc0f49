//! Route wrapper that keeps protected views behind the session guard.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;
use netops_session::ConsoleView;

use crate::app::WebConsole;
use crate::pages::section::SectionPage;
use crate::util::guard::{decide, denial_href};

/// Renders `section` only when the guard allows it; otherwise redirects to
/// login with the requested path as the return destination. The decision is
/// recomputed on every location change before anything is rendered.
#[component]
pub fn Guarded(section: ConsoleView) -> impl IntoView {
    let console = expect_context::<Arc<WebConsole>>();
    let location = use_location();

    let denial = Memo::new(move |_| {
        let decision = decide(console.guard(), console.store(), &location.pathname.get(), &location.search.get());
        denial_href(&decision)
    });

    move || match denial.get() {
        Some(href) => view! { <Redirect path=href/> }.into_any(),
        None => view! { <SectionPage section=section/> }.into_any(),
    }
}
