//! In-process platform double and shared world for the client suites.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. `PlatformWorld` stops the server even
//! if a test panics, and gives every test its own session directory so suites
//! never share sign-in state.

use std::collections::HashMap;
use std::future::Future;
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::{StatusCode, header};
use actix_web::web::Bytes;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use client::domain::session::{AuthToken, Session, UserProfile};
use client::outbound::http::HttpPlatformGateway;
use client::outbound::session_file::FileSessionStore;
use rstest::fixture;
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;
use url::Url;

/// Gateway wired the way the suites use it: file store, no console watch.
pub(crate) type TestGateway = HttpPlatformGateway<FileSessionStore>;

/// One reply the fake platform serves for a method and path pair.
#[derive(Clone)]
struct CannedResponse {
    status: StatusCode,
    body: Value,
}

/// One request the fake platform accepted, as the client sent it.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) bearer: Option<String>,
    pub(crate) body: Option<Value>,
}

/// Scriptable stand-in for the platform API.
///
/// Tests arrange replies with [`FakePlatform::respond`] and assert on the
/// requests the client actually made via [`FakePlatform::hits`]. Unknown
/// routes get a 404 envelope so a misrouted request fails loudly.
#[derive(Default)]
pub(crate) struct FakePlatform {
    responses: Mutex<HashMap<(String, String), CannedResponse>>,
    hits: Mutex<Vec<RecordedRequest>>,
}

impl FakePlatform {
    pub(crate) fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).expect("canned status");
        self.responses
            .lock()
            .expect("responses lock")
            .insert((method.to_owned(), path.to_owned()), CannedResponse {
                status,
                body,
            });
    }

    pub(crate) fn hits(&self) -> Vec<RecordedRequest> {
        self.hits.lock().expect("hits lock").clone()
    }

    pub(crate) fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.hits()
            .into_iter()
            .filter(|hit| hit.path == path)
            .collect()
    }

    fn reply_for(&self, method: &str, path: &str) -> Option<CannedResponse> {
        self.responses
            .lock()
            .expect("responses lock")
            .get(&(method.to_owned(), path.to_owned()))
            .cloned()
    }
}

async fn record_request(
    platform: web::Data<Arc<FakePlatform>>,
    request: HttpRequest,
    payload: Bytes,
) -> HttpResponse {
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_owned);
    let body = if payload.is_empty() {
        None
    } else {
        Some(serde_json::from_slice(&payload).expect("request body is JSON"))
    };
    let method = request.method().to_string();
    let path = request.path().to_owned();

    platform
        .hits
        .lock()
        .expect("hits lock")
        .push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            bearer,
            body,
        });

    match platform.reply_for(&method, &path) {
        Some(reply) => HttpResponse::build(reply.status).json(reply.body),
        None => HttpResponse::NotFound().json(json!({
            "success": false,
            "message": format!("no canned response for {method} {path}"),
        })),
    }
}

async fn spawn_platform(platform: Arc<FakePlatform>) -> (String, ServerHandle) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake platform");
    let addr = listener.local_addr().expect("fake platform address");
    let data = web::Data::new(platform);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .default_service(web::to(record_request))
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .expect("listen on fake platform socket")
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    (format!("http://{addr}"), handle)
}

/// Everything one test needs: the fake platform, its address, and a scratch
/// directory for the session file.
pub(crate) struct PlatformWorld {
    runtime: Runtime,
    local: LocalSet,
    server: ServerHandle,
    base_url: String,
    pub(crate) platform: Arc<FakePlatform>,
    home: TempDir,
}

impl PlatformWorld {
    pub(crate) fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        let local = LocalSet::new();
        let platform = Arc::new(FakePlatform::default());
        let (base_url, server) = local.block_on(&runtime, spawn_platform(Arc::clone(&platform)));
        let home = tempfile::tempdir().expect("scratch directory");

        Self {
            runtime,
            local,
            server,
            base_url,
            platform,
            home,
        }
    }

    /// Drive a client future on the runtime that owns the fake platform.
    pub(crate) fn block_on<R, F>(&self, operation: F) -> R
    where
        F: Future<Output = R>,
    {
        self.local.block_on(&self.runtime, operation)
    }

    /// Base URL the client should target, including the `/api` prefix the
    /// real platform mounts its routes under.
    pub(crate) fn api_base(&self) -> Url {
        Url::parse(&format!("{}/api", self.base_url)).expect("platform base url")
    }

    pub(crate) fn session_path(&self) -> PathBuf {
        self.home.path().join("session.json")
    }

    pub(crate) fn store(&self) -> Arc<FileSessionStore> {
        Arc::new(FileSessionStore::open(&self.session_path()).expect("session store"))
    }

    pub(crate) fn gateway(&self, store: &Arc<FileSessionStore>) -> Arc<TestGateway> {
        Arc::new(
            HttpPlatformGateway::new(self.api_base(), Duration::from_secs(5), Arc::clone(store))
                .expect("http gateway"),
        )
    }
}

impl Drop for PlatformWorld {
    fn drop(&mut self) {
        // `LocalSet` must be driven on the thread that owns it.
        let server = self.server.clone();
        self.local.block_on(&self.runtime, async move {
            server.stop(true).await;
        });
    }
}

/// Fresh world per test.
#[fixture]
pub(crate) fn world() -> PlatformWorld {
    PlatformWorld::start()
}

/// Signed-in session as a previous run would have persisted it.
pub(crate) fn sample_session(token: &str, full_name: &str) -> Session {
    let token = AuthToken::new(token).expect("sample token");
    Session::new(token, UserProfile::named(full_name))
}

/// Successful auth envelope as the platform serves it.
pub(crate) fn auth_ok(token: &str, full_name: &str) -> Value {
    json!({
        "success": true,
        "token": token,
        "user": { "full_name": full_name },
    })
}
