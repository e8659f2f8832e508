use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use time::{Duration, OffsetDateTime};
use tower::ServiceExt;
use tower_sessions::session::{Id, Record};
use tower_sessions::{MemoryStore, Session, SessionStore};

use crate::app::{routes, with_layers};
use crate::config::AppConfig;
use crate::database::{DatabaseError, StaffingStore, UserDirectory};
use crate::session::{CALLER_ID_KEY, FIRST_NAME_KEY, LAST_NAME_KEY};
use crate::state::AppState;

/// In-memory user directory keyed by cid
#[derive(Default)]
pub struct MemoryUserDirectory {
    accounts: Mutex<HashSet<i64>>,
    fail: AtomicBool,
}

impl MemoryUserDirectory {
    pub fn with_accounts(cids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            accounts: Mutex::new(cids.into_iter().collect()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn fail_lookups(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn account_exists(&self, cid: i64) -> Result<bool, DatabaseError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DatabaseError::Unavailable("directory offline".to_string()));
        }
        Ok(self.accounts.lock().unwrap().contains(&cid))
    }
}

/// In-memory staffing table with failure injection and a log of delete calls
#[derive(Default)]
pub struct MemoryStaffingStore {
    rows: Mutex<BTreeSet<i64>>,
    delete_calls: Mutex<Vec<i64>>,
    fail: AtomicBool,
}

impl MemoryStaffingStore {
    pub fn with_rows(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            rows: Mutex::new(ids.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<i64> {
        self.rows.lock().unwrap().iter().copied().collect()
    }

    pub fn delete_calls(&self) -> Vec<i64> {
        self.delete_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StaffingStore for MemoryStaffingStore {
    async fn delete(&self, id: i64) -> Result<u64, DatabaseError> {
        self.delete_calls.lock().unwrap().push(id);
        if self.fail.load(Ordering::SeqCst) {
            return Err(DatabaseError::Unavailable("connection dropped".to_string()));
        }
        Ok(u64::from(self.rows.lock().unwrap().remove(&id)))
    }
}

/// Router over in-memory stores. Sessions are written straight into the
/// session store, as the login flow does, and read back through a test-only
/// `/test/session` route behind the real session layer.
pub struct TestApp {
    pub router: Router,
    pub users: Arc<MemoryUserDirectory>,
    pub staffing: Arc<MemoryStaffingStore>,
    pub sessions: MemoryStore,
    cookie_name: String,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub cookie: Option<String>,
    pub body: Value,
}

impl TestApp {
    pub fn new(config: AppConfig, users: MemoryUserDirectory, staffing: MemoryStaffingStore) -> Self {
        let users = Arc::new(users);
        let staffing = Arc::new(staffing);
        let cookie_name = config.session.cookie_name.clone();
        let sessions = MemoryStore::default();
        let state = AppState::new(config, users.clone(), staffing.clone());

        let routes = routes(state.clone()).route("/test/session", get(read_session));

        Self {
            router: with_layers(routes, state, sessions.clone()),
            users,
            staffing,
            sessions,
            cookie_name,
        }
    }

    /// Write `values` into a new session record in the store and return the
    /// cookie that names it.
    pub async fn seed_session(&self, values: Value) -> String {
        let Value::Object(map) = values else {
            panic!("session values must be an object");
        };
        let mut record = Record {
            id: Id::default(),
            data: map.into_iter().collect(),
            expiry_date: OffsetDateTime::now_utc() + Duration::hours(1),
        };
        self.sessions.create(&mut record).await.unwrap();

        format!("{}={}", self.cookie_name, record.id)
    }

    /// Identity fields currently held by the session behind `cookie`
    pub async fn session_values(&self, cookie: &str) -> Value {
        self.send("GET", "/test/session", Some(cookie), None).await.body
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: Option<(&str, String)>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some((content_type, body)) => builder
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, cookie, body }
    }
}

async fn read_session(session: Session) -> Json<Value> {
    let mut out = serde_json::Map::new();
    for key in [CALLER_ID_KEY, FIRST_NAME_KEY, LAST_NAME_KEY] {
        let value: Option<Value> = session.get(key).await.unwrap();
        out.insert(key.to_string(), value.unwrap_or(Value::Null));
    }
    Json(json!(out))
}

/// Development config with permissive session cookies for tests
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.session.cookie_secure = false;
    config
}
