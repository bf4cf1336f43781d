//! In-process stand-in for the application under seed, the identity API and
//! the geocoder, all served from one axum router on an ephemeral port.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use user_seeder::SeedConfig;

/// What the identity endpoint sends back on a 200.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IdentityReply {
    /// As many identities as asked for.
    Complete,
    /// One identity fewer than asked for.
    Short,
    /// A body that is not JSON at all.
    NotJson,
}

#[derive(Clone)]
pub struct Behavior {
    pub signup_status: u16,
    pub signin_status: u16,
    pub signin_returns_token: bool,
    /// Answer signin with `"token": ""`.
    pub signin_empty_token: bool,
    /// Emails answered with 401 regardless of `signin_status`.
    pub reject_signin_for: Vec<String>,
    pub profile_status: u16,
    pub identity_status: u16,
    pub identity_reply: IdentityReply,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            signup_status: 201,
            signin_status: 200,
            signin_returns_token: true,
            signin_empty_token: false,
            reject_signin_for: Vec::new(),
            profile_status: 200,
            identity_status: 200,
            identity_reply: IdentityReply::Complete,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProfileCall {
    pub authorization: Option<String>,
    pub fields: Vec<(String, String)>,
}

impl ProfileCall {
    pub fn values(&self, key: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct Recorded {
    pub signups: Vec<Value>,
    pub signins: Vec<Value>,
    pub signup_times: Vec<Instant>,
    pub signin_times: Vec<Instant>,
    pub profiles: Vec<ProfileCall>,
    pub identity_requests: Vec<HashMap<String, String>>,
    pub geocode_queries: Vec<String>,
}

struct AppState {
    behavior: Behavior,
    recorded: Arc<Mutex<Recorded>>,
}

type Shared = Arc<AppState>;

pub struct StubServer {
    pub addr: SocketAddr,
    pub recorded: Arc<Mutex<Recorded>>,
}

impl StubServer {
    pub async fn start(behavior: Behavior) -> Self {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let state = Arc::new(AppState {
            behavior,
            recorded: recorded.clone(),
        });

        let app = Router::new()
            .route("/auth/signup", post(signup))
            .route("/auth/signin", post(signin))
            .route("/users/profile", put(profile))
            .route("/identities", get(identities))
            .route("/geo/search", get(geocode))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, recorded }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Config pointed at this stub, template users, no settle delay.
    pub fn config(&self, user_count: usize) -> SeedConfig {
        SeedConfig {
            api_base_url: self.url(),
            user_count,
            use_identity_api: false,
            identity_api_url: format!("{}/identities", self.url()),
            signup_settle_delay: Duration::ZERO,
            rng_seed: Some(42),
            ..Default::default()
        }
    }

    pub fn recorded(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap()
    }
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap()
}

async fn signup(State(state): State<Shared>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    {
        let mut recorded = state.recorded.lock().unwrap();
        recorded.signups.push(body);
        recorded.signup_times.push(Instant::now());
    }
    let code = state.behavior.signup_status;
    let message = if code == 409 {
        "Email or username already in use"
    } else {
        "User created successfully"
    };
    (status(code), Json(json!({ "message": message })))
}

async fn signin(State(state): State<Shared>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    {
        let mut recorded = state.recorded.lock().unwrap();
        recorded.signins.push(body);
        recorded.signin_times.push(Instant::now());
    }

    let behavior = &state.behavior;
    if behavior.reject_signin_for.contains(&email) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Incorrect password" })),
        );
    }
    if behavior.signin_status != 200 {
        return (
            status(behavior.signin_status),
            Json(json!({ "message": "Incorrect password" })),
        );
    }
    if !behavior.signin_returns_token {
        return (StatusCode::OK, Json(json!({ "user": { "email": email } })));
    }
    let token = if behavior.signin_empty_token {
        String::new()
    } else {
        format!("token-{}", email)
    };
    (
        StatusCode::OK,
        Json(json!({ "token": token, "user": { "email": email } })),
    )
}

async fn profile(State(state): State<Shared>, headers: HeaderMap, body: String) -> StatusCode {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let fields = url::form_urlencoded::parse(body.as_bytes())
        .into_owned()
        .collect();
    state.recorded.lock().unwrap().profiles.push(ProfileCall {
        authorization,
        fields,
    });
    status(state.behavior.profile_status)
}

async fn identities(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let count: usize = params
        .get("results")
        .and_then(|v| v.parse().ok())
        .unwrap_or(1);
    state.recorded.lock().unwrap().identity_requests.push(params);

    if state.behavior.identity_status != 200 {
        return (
            status(state.behavior.identity_status),
            Json(json!({ "error": "service unavailable" })),
        )
            .into_response();
    }

    let count = match state.behavior.identity_reply {
        IdentityReply::Complete => count,
        IdentityReply::Short => count.saturating_sub(1),
        IdentityReply::NotJson => {
            return (StatusCode::OK, "not json").into_response();
        }
    };

    let results: Vec<Value> = (0..count)
        .map(|i| {
            let gender = if i % 2 == 0 { "female" } else { "male" };
            json!({
                "gender": gender,
                "name": { "title": "M", "first": format!("First{}", i), "last": format!("Last{}", i) },
                "location": {
                    "city": "Lyon",
                    "country": "France",
                    "coordinates": { "latitude": "45.7640", "longitude": "4.8357" }
                },
                "email": format!("identity{}@example.com", i),
                "login": { "username": format!("identity{}", i), "password": format!("pw{}", i) },
                "dob": { "date": "1990-05-12T00:00:00.000Z", "age": 34 },
                "picture": { "large": format!("https://randomuser.me/api/portraits/men/{}.jpg", i) },
                "nat": "FR"
            })
        })
        .collect();
    (StatusCode::OK, Json(json!({ "results": results, "info": {} }))).into_response()
}

async fn geocode(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let q = params.get("q").cloned().unwrap_or_default();
    state.recorded.lock().unwrap().geocode_queries.push(q);
    Json(json!({ "hits": [{ "id": "1", "_geo": { "lat": 10.5, "lng": 20.25 } }] }))
}
