// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitz API Server
//!
//! Generates workout plans, diet plans and workout playlists, and stores
//! them per user in Firestore.

use fitz_api::{
    config::Config,
    db::{FirestoreDb, UserStore},
    services::{
        EdamamClient, FirebaseAuthClient, GeminiClient, IdentityProvider, NutritionAnalyzer,
        PlanOrchestrator, PlaylistProvider, PlaylistSearch, SpotifyClient, TextGenerator,
    },
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    config.warn_missing_optional();
    tracing::info!(port = config.port, "Starting Fitz API");

    // Initialize Firestore database
    let db = FirestoreDb::new(
        &config.service_account.project_id,
        &config.firebase_credentials_path,
    )
    .await
    .expect("Failed to connect to Firestore");
    let store: Arc<dyn UserStore> = Arc::new(db);

    let identity = init_identity(&config)
        .await
        .expect("Failed to initialize Firebase Authentication");

    let generator: Option<Arc<dyn TextGenerator>> = config.gemini.as_ref().and_then(|gemini| {
        match GeminiClient::new(gemini.api_key.clone(), gemini.model.clone()) {
            Ok(client) => {
                tracing::info!(model = %gemini.model, "Gemini client initialized");
                Some(Arc::new(client) as Arc<dyn TextGenerator>)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize Gemini client");
                None
            }
        }
    });

    let playlists = match config.spotify.as_ref() {
        Some(spotify) => {
            match SpotifyClient::new(spotify.client_id.clone(), spotify.client_secret.clone()) {
                Ok(client) => {
                    tracing::info!("Spotify client initialized");
                    PlaylistProvider::Configured(Arc::new(client) as Arc<dyn PlaylistSearch>)
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to initialize Spotify client");
                    PlaylistProvider::Unconfigured
                }
            }
        }
        None => PlaylistProvider::Unconfigured,
    };

    let nutrition: Option<Arc<dyn NutritionAnalyzer>> = config.edamam.as_ref().and_then(|edamam| {
        match EdamamClient::new(edamam.app_id.clone(), edamam.app_key.clone()) {
            Ok(client) => Some(Arc::new(client) as Arc<dyn NutritionAnalyzer>),
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize Edamam client");
                None
            }
        }
    });

    let playlists_configured = playlists.is_configured();
    let planner = PlanOrchestrator::new(generator, playlists, store.clone());
    tracing::info!(
        plan_generation = planner.is_available(),
        playlists = playlists_configured,
        nutrition = nutrition.is_some(),
        "Integrations ready"
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        identity,
        store,
        planner,
        nutrition,
    });

    // Build router
    let app = fitz_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Firebase Authentication admin client, or the Auth emulator when
/// `FIREBASE_AUTH_EMULATOR_HOST` is set.
async fn init_identity(config: &Config) -> anyhow::Result<Arc<dyn IdentityProvider>> {
    let project_id = config.service_account.project_id.clone();

    if let Ok(host) = std::env::var("FIREBASE_AUTH_EMULATOR_HOST") {
        tracing::info!(host = %host, "Using Firebase Auth emulator");
        let base_url = format!("http://{}/identitytoolkit.googleapis.com", host);
        return Ok(Arc::new(FirebaseAuthClient::emulator(base_url, project_id)?));
    }

    let client =
        FirebaseAuthClient::from_credentials_file(project_id, &config.firebase_credentials_path)
            .await?;
    tracing::info!("Firebase Authentication client initialized");
    Ok(Arc::new(client))
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fitz_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
