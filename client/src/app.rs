//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::StaticSegment;
use leptos_router::components::{Redirect, Route, Router, Routes};
use netops_session::{ConsoleView, RouteTable, SessionConfig, SessionConsole};

use crate::components::guarded::Guarded;
use crate::components::toast::Toast;
use crate::net::transport::GlooTransport;
use crate::pages::login::LoginPage;
use crate::state::toast::{ToastNotifier, ToastState};
use crate::util::location::LocationNavigator;
use crate::util::storage::LocalStorageStore;

/// Session console as used by the browser build.
pub type WebConsole = SessionConsole<GlooTransport, LocalStorageStore, LocationNavigator, ToastNotifier>;

/// Build the console shared by every page.
pub fn build_console(config: SessionConfig, toast: RwSignal<ToastState>) -> WebConsole {
    let routes = RouteTable::<ConsoleView>::standard(&config);
    SessionConsole::new(
        config.clone(),
        GlooTransport::new(&config),
        LocalStorageStore,
        routes,
        LocationNavigator,
        ToastNotifier::new(toast),
    )
}

/// Root application component.
///
/// Provides the session console and toast state, then declares one guarded
/// route per console view.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let toast = RwSignal::new(ToastState::default());
    let console = Arc::new(build_console(SessionConfig::default(), toast));
    let login_path = console.config().login_path.clone();

    provide_context(toast);
    provide_context(Arc::clone(&console));

    view! {
        <Stylesheet id="leptos" href="/pkg/netops-console.css"/>
        <Title text="NetOps Console"/>

        <Router>
            <Toast/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=move || view! { <Redirect path=login_path.clone()/> }/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("device") view=|| view! { <Guarded section=ConsoleView::Device/> }/>
                <Route path=StaticSegment("inspect") view=|| view! { <Guarded section=ConsoleView::Inspect/> }/>
                <Route path=StaticSegment("topology") view=|| view! { <Guarded section=ConsoleView::Topology/> }/>
                <Route path=StaticSegment("report") view=|| view! { <Guarded section=ConsoleView::Report/> }/>
                <Route path=StaticSegment("monitor") view=|| view! { <Guarded section=ConsoleView::Monitor/> }/>
                <Route path=StaticSegment("alert") view=|| view! { <Guarded section=ConsoleView::Alert/> }/>
                <Route path=StaticSegment("report-export") view=|| view! { <Guarded section=ConsoleView::ReportExport/> }/>
            </Routes>
        </Router>
    }
}

