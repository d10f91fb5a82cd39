use anyhow::Context;
use axum::extract::State;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use courtside_api::config::AppConfig;
use courtside_api::database;
use courtside_api::handlers;
use courtside_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    tracing::info!("Starting Courtside API in {:?} mode", config.environment);

    let pool = database::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    database::migrate(&pool)
        .await
        .context("failed to run migrations")?;

    let state = AppState::new(pool, config);
    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("COURTSIDE_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    println!("🏀 Courtside API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server")?;
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Accounts
        .merge(account_routes())
        // Profiles (bearer-guarded in the handlers)
        .merge(user_routes())
        // Player/team directory
        .merge(directory_routes())
        // Favorites (bearer-guarded in the handlers)
        .merge(favorite_routes())
        // Aggregates
        .merge(leaderboard_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn account_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::auth;

    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}

fn user_routes() -> Router<AppState> {
    use handlers::users;

    Router::new().route(
        "/users/:id",
        get(users::get_user)
            .put(users::update_user)
            .delete(users::delete_user),
    )
}

fn directory_routes() -> Router<AppState> {
    use handlers::{players, teams};

    Router::new()
        .route("/players/search", get(players::search_players))
        .route("/players/:id", get(players::get_player))
        .route("/teams/search", get(teams::search_teams))
        .route("/teams/:id", get(teams::get_team))
}

fn favorite_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::favorites;

    Router::new()
        .route(
            "/users/:id/favorites/players",
            post(favorites::add_favorite_player).delete(favorites::remove_favorite_player),
        )
        .route(
            "/users/:id/favorites/teams",
            post(favorites::add_favorite_team).delete(favorites::remove_favorite_team),
        )
}

fn leaderboard_routes() -> Router<AppState> {
    use handlers::leaderboard;

    Router::new()
        .route("/top-players", get(leaderboard::top_players))
        .route("/top-teams", get(leaderboard::top_teams))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Courtside API",
            "version": version,
            "description": "Sports fan-favorites backend API",
            "endpoints": {
                "register": "POST /register (public)",
                "login": "POST /login (public, HTTP Basic)",
                "users": "GET|PUT|DELETE /users/:id (bearer)",
                "players": "GET /players/:id, GET /players/search?name= (public)",
                "teams": "GET /teams/:id, GET /teams/search?name= (public)",
                "favorites": "POST|DELETE /users/:id/favorites/players|teams (bearer)",
                "leaderboards": "GET /top-players, GET /top-teams (public)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
