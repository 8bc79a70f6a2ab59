// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Response;
use fitz_api::config::Config;
use fitz_api::db::{FirestoreDb, UserStore};
use fitz_api::error::AppError;
use fitz_api::models::{PlanRecord, PlaylistInfo, UserProfile};
use fitz_api::routes::create_router;
use fitz_api::services::{
    CatalogError, IdentityError, IdentityProvider, IdentityRecord, NutritionAnalyzer,
    NutritionError, PlanOrchestrator, PlaylistProvider, PlaylistSearch, TextGenerator,
};
use fitz_api::AppState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project", std::path::Path::new("unused.json"))
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Generate a unique uid for test isolation.
#[allow(dead_code)]
pub fn unique_uid() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("test-uid-{}", nanos)
}

// ─── Fakes ───────────────────────────────────────────────────

/// Identity service holding accounts in memory.
#[derive(Default)]
pub struct FakeIdentity {
    accounts: Mutex<HashMap<String, String>>,
    next_id: AtomicUsize,
}

#[allow(dead_code)]
impl FakeIdentity {
    pub fn with_account(email: &str, uid: &str) -> Self {
        let identity = Self::default();
        identity
            .accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), uid.to_string());
        identity
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn create_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityRecord, IdentityError> {
        if password.len() < 6 {
            return Err(IdentityError::Rejected(
                "WEAK_PASSWORD : Password should be at least 6 characters".to_string(),
            ));
        }
        if !email.contains('@') {
            return Err(IdentityError::Rejected("INVALID_EMAIL".to_string()));
        }

        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(IdentityError::EmailExists);
        }
        let uid = format!("uid-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        accounts.insert(email.to_string(), uid.clone());
        Ok(IdentityRecord {
            uid,
            email: Some(email.to_string()),
        })
    }

    async fn get_user_by_email(&self, email: &str) -> Result<IdentityRecord, IdentityError> {
        self.accounts
            .lock()
            .unwrap()
            .get(email)
            .map(|uid| IdentityRecord {
                uid: uid.clone(),
                email: Some(email.to_string()),
            })
            .ok_or(IdentityError::UserNotFound)
    }
}

/// Profile and plan storage in memory.
#[derive(Default)]
pub struct MemoryStore {
    pub profiles: Mutex<HashMap<String, UserProfile>>,
    pub plans: Mutex<HashMap<String, Vec<PlanRecord>>>,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn plan_count(&self, uid: &str) -> usize {
        self.plans
            .lock()
            .unwrap()
            .get(uid)
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn total_plans(&self) -> usize {
        self.plans.lock().unwrap().values().map(Vec::len).sum()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_profile(&self, uid: &str, profile: &UserProfile) -> Result<(), AppError> {
        self.profiles
            .lock()
            .unwrap()
            .insert(uid.to_string(), profile.clone());
        Ok(())
    }

    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        Ok(self.profiles.lock().unwrap().get(uid).cloned())
    }

    async fn add_plan(&self, uid: &str, plan: &PlanRecord) -> Result<(), AppError> {
        self.plans
            .lock()
            .unwrap()
            .entry(uid.to_string())
            .or_default()
            .push(plan.clone());
        Ok(())
    }

    async fn list_plans(&self, uid: &str, limit: u32) -> Result<Vec<PlanRecord>, AppError> {
        let mut plans = self
            .plans
            .lock()
            .unwrap()
            .get(uid)
            .cloned()
            .unwrap_or_default();
        plans.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
        plans.truncate(limit as usize);
        Ok(plans)
    }
}

/// Text generator that echoes the first line of the prompt.
#[derive(Default)]
pub struct FakeGenerator {
    pub calls: AtomicUsize,
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let first_line = prompt.lines().next().unwrap_or_default();
        Ok(format!("## Plan\n\n{}", first_line))
    }
}

/// Text generator that always fails.
#[allow(dead_code)]
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
        anyhow::bail!("quota exceeded")
    }
}

/// Playlist catalog returning a fixed number of playlists, or failing.
pub struct FakeCatalog {
    playlists: usize,
    fail: bool,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl FakeCatalog {
    pub fn returning(playlists: usize) -> Self {
        Self {
            playlists,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            playlists: 0,
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PlaylistSearch for FakeCatalog {
    async fn search_playlists(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<PlaylistInfo>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CatalogError::Api {
                status: 401,
                body: "invalid client".to_string(),
            });
        }
        Ok((0..self.playlists.min(limit as usize))
            .map(|i| PlaylistInfo {
                name: format!("{} #{}", query, i + 1),
                description: "Workout mix".to_string(),
                spotify_url: format!("https://open.spotify.com/playlist/{}", i),
                image_url: None,
                owner: Some("spotify".to_string()),
                tracks_count: 40,
            })
            .collect())
    }
}

/// Nutrition service returning a canned body, or failing.
pub struct FakeNutrition {
    body: Option<String>,
    pub last_ingredients: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl FakeNutrition {
    pub fn returning(body: &str) -> Self {
        Self {
            body: Some(body.to_string()),
            last_ingredients: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            body: None,
            last_ingredients: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl NutritionAnalyzer for FakeNutrition {
    async fn analyze(&self, ingredients: &[String]) -> Result<String, NutritionError> {
        *self.last_ingredients.lock().unwrap() = ingredients.to_vec();
        self.body.clone().ok_or_else(|| NutritionError::Status {
            status: 555,
            body: "low quality ingredients".to_string(),
        })
    }
}

// ─── App Builder ─────────────────────────────────────────────

/// Upstream wiring for a test app. Defaults: every integration configured
/// with a working fake.
pub struct TestDeps {
    pub identity: Arc<FakeIdentity>,
    pub store: Arc<dyn UserStore>,
    pub generator: Option<Arc<dyn TextGenerator>>,
    pub catalog: Option<Arc<FakeCatalog>>,
    pub nutrition: Option<Arc<dyn NutritionAnalyzer>>,
}

impl Default for TestDeps {
    fn default() -> Self {
        Self {
            identity: Arc::new(FakeIdentity::default()),
            store: Arc::new(MemoryStore::default()),
            generator: Some(Arc::new(FakeGenerator::default())),
            catalog: Some(Arc::new(FakeCatalog::returning(5))),
            nutrition: Some(Arc::new(FakeNutrition::returning(r#"{"calories":0}"#))),
        }
    }
}

#[allow(dead_code)]
pub fn build_app(deps: TestDeps) -> (axum::Router, Arc<AppState>) {
    let playlists = match deps.catalog {
        Some(catalog) => PlaylistProvider::Configured(catalog as Arc<dyn PlaylistSearch>),
        None => PlaylistProvider::Unconfigured,
    };

    let state = Arc::new(AppState {
        config: Config::test_default(),
        identity: deps.identity,
        store: deps.store.clone(),
        planner: PlanOrchestrator::new(deps.generator, playlists, deps.store),
        nutrition: deps.nutrition,
    });

    (create_router(state.clone()), state)
}

/// Create a test app with every upstream faked and configured.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    build_app(TestDeps::default())
}

/// POST a JSON body.
#[allow(dead_code)]
pub fn json_request(uri: &str, body: &str) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Collect a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
