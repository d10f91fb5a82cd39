// Not every suite uses every helper
#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

/// Secret handed to the spawned server so tests can mint their own tokens.
pub const TEST_SECRET: &str = "courtside-test-secret";

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/courtside-api");
        cmd.env("COURTSIDE_API_PORT", port.to_string())
            .env("JWT_SECRET_KEY", TEST_SECRET)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server sees DATABASE_URL
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK
                    || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

/// These suites need a live Postgres; without DATABASE_URL each test
/// no-ops so the suite still passes on database-less machines.
pub fn database_available() -> bool {
    if std::env::var("DATABASE_URL").is_ok() {
        return true;
    }
    eprintln!("skipping: DATABASE_URL not set");
    false
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Direct store access for seeding directory data the API has no
/// write surface for (players, teams, rosters).
pub async fn pool() -> Result<PgPool> {
    let url = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await?;
    Ok(pool)
}

pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

pub async fn seed_player(pool: &PgPool, name: &str, picture: Option<&[u8]>) -> Result<Uuid> {
    let row: (Uuid,) =
        sqlx::query_as("INSERT INTO players (name, picture_data) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(picture)
            .fetch_one(pool)
            .await?;
    Ok(row.0)
}

pub async fn seed_team(pool: &PgPool, name: &str, picture: Option<&[u8]>) -> Result<Uuid> {
    let row: (Uuid,) =
        sqlx::query_as("INSERT INTO teams (name, picture_data) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(picture)
            .fetch_one(pool)
            .await?;
    Ok(row.0)
}

pub async fn seed_roster_member(pool: &PgPool, team_id: Uuid, player_id: Uuid) -> Result<()> {
    sqlx::query("INSERT INTO team_players (team_id, player_id) VALUES ($1, $2)")
        .bind(team_id)
        .bind(player_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Register through the API and return (user_id, token) from a login.
pub async fn register_and_login(
    server: &TestServer,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(Uuid, String)> {
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/register", server.base_url))
        .json(&serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "register failed: {}",
        res.status()
    );

    let res = client
        .post(format!("{}/login", server.base_url))
        .basic_auth(username, Some(password))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::OK,
        "login failed: {}",
        res.status()
    );

    let body = res.json::<serde_json::Value>().await?;
    let user_id: Uuid = body["data"]["user_id"]
        .as_str()
        .context("user_id missing from login response")?
        .parse()?;
    let token = body["data"]["token"]
        .as_str()
        .context("token missing from login response")?
        .to_string();

    Ok((user_id, token))
}
