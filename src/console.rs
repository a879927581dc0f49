//! Session console: the coordinator that ties the pipeline, the guard, the
//! navigator and the notifier together.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views issue API calls and navigations through a `SessionConsole`. The
//! authenticated client reports expiry as an effect; this type is where that
//! effect becomes a login redirect and a notice, so the pipeline itself has
//! no UI dependency.
//!
//! DESIGN
//! ======
//! Both redirect sources preserve the intended destination:
//! - guard denial returns the user to the route they asked for;
//! - API expiry returns them to the view they were on.
//! After sign-in the preserved destination is resumed, falling back to the
//! home view.

#[cfg(test)]
#[path = "console_test.rs"]
mod console_test;

use serde::de::DeserializeOwned;

use crate::config::SessionConfig;
use crate::error::{ClientError, StoreError};
use crate::net::{
    ApiEnvelope, ApiRequest, ApiResponse, AuthClient, Credentials, LOGIN_ENDPOINT, LoginPayload, SessionExpired,
    Transport,
};
use crate::notice::{Notice, Notifier};
use crate::routing::{ConsoleView, GuardDecision, Navigator, PendingNavigation, Redirect, RouteGuard, RouteTable, route_path};
use crate::session::{Session, SessionStore};

/// Outer coordinator for API calls and navigations.
pub struct SessionConsole<T, S, N, F, V = ConsoleView> {
    client: AuthClient<T, S>,
    guard: RouteGuard<V>,
    navigator: N,
    notifier: F,
    config: SessionConfig,
    home: String,
}

impl<T, S, N, F, V> SessionConsole<T, S, N, F, V>
where
    T: Transport,
    S: SessionStore,
    N: Navigator,
    F: Notifier,
{
    #[must_use]
    pub fn new(config: SessionConfig, transport: T, store: S, routes: RouteTable<V>, navigator: N, notifier: F) -> Self {
        Self {
            client: AuthClient::new(transport, store),
            guard: RouteGuard::new(routes, config.clone()),
            navigator,
            notifier,
            config,
            home: ConsoleView::Device.path().to_owned(),
        }
    }

    /// View shown after sign-in when no return destination was preserved.
    #[must_use]
    pub fn with_home(mut self, home: &str) -> Self {
        self.home = home.to_owned();
        self
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn client(&self) -> &AuthClient<T, S> {
        &self.client
    }

    #[must_use]
    pub fn guard(&self) -> &RouteGuard<V> {
        &self.guard
    }

    #[must_use]
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    #[must_use]
    pub fn notifier(&self) -> &F {
        &self.notifier
    }

    #[must_use]
    pub fn store(&self) -> &S {
        self.client.store()
    }

    #[must_use]
    pub fn session(&self) -> Session {
        self.store().get()
    }

    // =========================================================================
    // API CALLS
    // =========================================================================

    /// Send through the authenticated pipeline. On `401` the user is sent to
    /// login and notified, then the original failure is returned.
    ///
    /// # Errors
    ///
    /// Returns transport failures and non-2xx responses unchanged.
    pub async fn request(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let dispatch = self.client.execute(request).await;
        if let Some(expired) = &dispatch.expired {
            self.handle_expiry(expired);
        }
        dispatch.into_result()
    }

    /// `request`, then decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns transport failures, non-2xx responses and decode failures.
    pub async fn request_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ClientError> {
        let response = self.request(request).await?;
        Ok(response.json()?)
    }

    /// Apply a `SessionExpired` effect: one login redirect, one notice.
    pub fn handle_expiry(&self, expired: &SessionExpired) {
        let redirect = self.expiry_redirect();
        tracing::info!(path = %expired.path, to = %redirect.href(), "session expired; redirecting to login");
        self.navigator.navigate(&redirect);
        self.notifier.notify(Notice::session_expired());
    }

    /// Login redirect returning to the current view. When the current view
    /// is already the login page its own return destination is kept.
    fn expiry_redirect(&self) -> Redirect {
        let current = self.navigator.current_path();
        let return_to = match current.as_deref() {
            Some(href) if route_path(href) == route_path(&self.config.login_path) => {
                Redirect::parse(href).return_to(&self.config).map(str::to_owned)
            }
            other => other.map(str::to_owned),
        };
        Redirect::to_login(&self.config, return_to.as_deref())
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    /// Run the guard for `target` and navigate to wherever it decides.
    pub fn navigate(&self, target: &str) -> GuardDecision {
        let pending = PendingNavigation::new(target, self.navigator.current_path());
        let decision = self.guard.check(&pending, self.store());
        self.navigator.navigate(&decision.destination());
        decision
    }

    // =========================================================================
    // SIGN-IN / SIGN-OUT
    // =========================================================================

    /// Store a session written by the login view and resume the preserved
    /// destination (or the home view). Only the login route's own return
    /// parameter is honored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store refuses the session; nothing is
    /// navigated in that case.
    pub fn sign_in(&self, session: Session) -> Result<GuardDecision, StoreError> {
        self.store().set(session)?;
        let destination = self
            .navigator
            .current_path()
            .map(|href| Redirect::parse(&href))
            .filter(|current| current.is_route(&self.config.login_path))
            .and_then(|login| login.return_to(&self.config).map(str::to_owned))
            .unwrap_or_else(|| self.home.clone());
        Ok(self.navigate(&destination))
    }

    /// Post credentials to the login endpoint through the same pipeline and
    /// sign in with the returned token.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Rejected` for blank credentials or a refused
    /// login, plus any transport, status, decode or store failure.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, ClientError> {
        credentials.validate()?;
        let request = ApiRequest::post(LOGIN_ENDPOINT).json(credentials)?;
        let envelope: ApiEnvelope<LoginPayload> = self.request_json(request).await?;
        let session = envelope.into_data()?.into_session();
        self.sign_in(session.clone())?;
        tracing::info!(username = session.username().unwrap_or("-"), "signed in");
        Ok(session)
    }

    /// Drop the session and show the login view without a return
    /// destination.
    ///
    /// # Errors
    ///
    /// Returns an error if durable storage could not be erased. The user is
    /// redirected either way.
    pub fn sign_out(&self) -> Result<(), StoreError> {
        let cleared = self.store().clear();
        self.navigator.navigate(&Redirect::to_login(&self.config, None));
        cleared
    }
}
