//! # wbx-testkit
//!
//! A fake Wikibase action API served by `tiny_http` on `127.0.0.1:0`.
//!
//! It understands the handful of actions wbx uses (`query&meta=tokens`,
//! `login`, `wbgetentities`, `wbeditentity`), records every request for
//! later assertions, and can be told to misbehave in the ways real services
//! do: missing tokens, failed logins, unknown entities, refused saves, HTTP
//! error statuses.
//!
//! ```no_run
//! use wbx_testkit::FakeWikibase;
//!
//! let wb = FakeWikibase::builder()
//!     .entity("Q1", serde_json::json!({"labels": {}, "descriptions": {}, "aliases": {}}))
//!     .start();
//! println!("{}", wb.api_url());
//! ```

mod request;
mod state;

pub use request::RecordedRequest;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use serde_json::Value;

use state::State;

/// Login token handed out by the fake.
pub const LOGIN_TOKEN: &str = "fake-login-token+\\";
/// Edit token handed out to logged-in sessions.
pub const CSRF_TOKEN: &str = "fake-csrf-token+\\";
/// Session cookie set by a successful login.
pub const SESSION_COOKIE: &str = "wbsession=fake-session";

/// Configures a [`FakeWikibase`] before it starts serving.
#[derive(Debug, Default)]
pub struct FakeWikibaseBuilder {
    state: State,
}

impl FakeWikibaseBuilder {
    /// Serve `entity` for `wbgetentities` requests naming `id`.
    #[must_use]
    pub fn entity(mut self, id: &str, entity: Value) -> Self {
        self.state.entities.insert(id.to_string(), entity);
        self
    }

    /// Answer login-token requests without a `logintoken`.
    #[must_use]
    pub const fn without_login_token(mut self) -> Self {
        self.state.omit_login_token = true;
        self
    }

    /// Answer `action=login` with this result instead of `Success`.
    #[must_use]
    pub fn login_result(mut self, result: &str) -> Self {
        self.state.login_result = Some(result.to_string());
        self
    }

    /// Accept the login but never set a session cookie.
    #[must_use]
    pub const fn without_session_cookie(mut self) -> Self {
        self.state.omit_session_cookie = true;
        self
    }

    /// Reject the `n`-th (0-based) `wbeditentity` call with `failed-save`.
    #[must_use]
    pub fn fail_create_at(mut self, n: usize) -> Self {
        self.state.failing_creates.insert(n);
        self
    }

    /// Answer unknown identifiers with a `no-such-entity` error instead of a
    /// `missing` entry.
    #[must_use]
    pub const fn error_on_unknown_entity(mut self) -> Self {
        self.state.error_on_unknown = true;
        self
    }

    /// Respond to every request for `action` with a bare HTTP `status`.
    #[must_use]
    pub fn status_for(mut self, action: &str, status: u16) -> Self {
        self.state.statuses.insert(action.to_string(), status);
        self
    }

    /// First numeric suffix assigned to created entities (default 100).
    #[must_use]
    pub const fn first_new_id(mut self, n: u64) -> Self {
        self.state.next_id = n;
        self
    }

    /// Bind to a random local port and start serving on a background thread.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind.
    #[must_use]
    pub fn start(self) -> FakeWikibase {
        let server = Arc::new(tiny_http::Server::http("127.0.0.1:0").expect("fake wikibase should bind"));
        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .expect("fake wikibase listens on an IP socket");

        let state = Arc::new(Mutex::new(self.state));
        let worker = {
            let server = Arc::clone(&server);
            let state = Arc::clone(&state);
            std::thread::spawn(move || {
                for request in server.incoming_requests() {
                    state::serve(request, &state);
                }
            })
        };

        FakeWikibase {
            api_url: format!("http://127.0.0.1:{port}/w/api.php"),
            state,
            server,
            worker: Some(worker),
        }
    }
}

/// A running fake Wikibase. Stops serving when dropped.
pub struct FakeWikibase {
    api_url: String,
    state: Arc<Mutex<State>>,
    server: Arc<tiny_http::Server>,
    worker: Option<JoinHandle<()>>,
}

impl FakeWikibase {
    #[must_use]
    pub fn builder() -> FakeWikibaseBuilder {
        FakeWikibaseBuilder::default()
    }

    /// Action API URL (`http://127.0.0.1:<port>/w/api.php`).
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Every request received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Requests whose `action` parameter equals `action`.
    #[must_use]
    pub fn requests_for(&self, action: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.action() == Some(action))
            .collect()
    }

    /// Decoded `data` payloads of every `wbeditentity` call.
    #[must_use]
    pub fn created_payloads(&self) -> Vec<Value> {
        self.requests_for("wbeditentity")
            .iter()
            .filter_map(RecordedRequest::data_json)
            .collect()
    }

    /// Identifiers assigned so far, keyed by creation order.
    #[must_use]
    pub fn created_ids(&self) -> BTreeMap<usize, String> {
        self.lock().created.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for FakeWikibase {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
