//! Backend entry-point: wires HTTP endpoints, cookie sessions, and OpenAPI
//! docs over the in-memory adapters.
//!
//! Authentication happens in a separate service that shares the session
//! signing key; this process only decodes the cookie it leaves behind.

use std::env;
use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::{App, HttpResponse, HttpServer, web};
use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use utoipa::OpenApi;
use uuid::Uuid;

use backend::ApiDoc;
use backend::domain::{
    MatchCommandService, MatchQueryService, PaymentService, Role, Skill, User, UserId, UserStatus,
};
use backend::inbound::http::{HttpState, routes};
use backend::outbound::memory::{
    InMemoryMatchRepository, InMemoryPaymentRepository, InMemorySkillCatalogue,
    InMemoryUserDirectory,
};

/// `match-coordinator` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "match-coordinator",
    about = "Coordinate skill-exchange matches from request through payment settlement",
    version
)]
struct CliArgs {
    /// Socket address to bind.
    #[arg(long = "bind", value_name = "addr", default_value = "0.0.0.0:8080")]
    bind: String,
    /// Seed a demo admin, two members, and a skill at startup.
    #[arg(long = "seed-demo")]
    seed_demo: bool,
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::try_parse().map_err(std::io::Error::other)?;

    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    let key = match std::fs::read(&key_path) {
        Ok(bytes) => Key::derive_from(&bytes),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Key::generate()
            } else {
                return Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )));
            }
        }
    };

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let users = Arc::new(InMemoryUserDirectory::new());
    let skills = Arc::new(InMemorySkillCatalogue::new());
    let matches = Arc::new(InMemoryMatchRepository::new());
    let payments = Arc::new(InMemoryPaymentRepository::new());

    if args.seed_demo {
        seed_demo(&users, &skills);
    }

    let match_command = Arc::new(MatchCommandService::new(
        Arc::clone(&users),
        Arc::clone(&skills),
        Arc::clone(&matches),
    ));
    let match_query = Arc::new(MatchQueryService::new(
        Arc::clone(&matches),
        Arc::clone(&payments),
    ));
    let payment_service = Arc::new(PaymentService::new(
        Arc::clone(&matches),
        Arc::clone(&payments),
    ));
    let payment_command: Arc<dyn backend::domain::ports::PaymentCommand> =
        Arc::clone(&payment_service) as Arc<dyn backend::domain::ports::PaymentCommand>;
    let state = HttpState::new(match_command, match_query, payment_command, payment_service);

    info!(bind = %args.bind, "starting match coordinator");
    HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(session)
            .configure(routes::configure)
            .route(
                "/api-docs/openapi.json",
                web::get().to(|| async { HttpResponse::Ok().json(ApiDoc::openapi()) }),
            )
    })
    .bind(args.bind)?
    .run()
    .await
}

/// Populate the stores with accounts and a skill for local poking.
fn seed_demo(users: &InMemoryUserDirectory, skills: &InMemorySkillCatalogue) {
    let admin = User {
        id: UserId::random(),
        name: "Demo Admin".into(),
        email: "admin@example.com".into(),
        role: Role::Admin,
        status: UserStatus::Active,
    };
    let owner = User {
        id: UserId::random(),
        name: "Demo Owner".into(),
        email: "owner@example.com".into(),
        role: Role::User,
        status: UserStatus::Active,
    };
    let requester = User {
        id: UserId::random(),
        name: "Demo Requester".into(),
        email: "requester@example.com".into(),
        role: Role::User,
        status: UserStatus::Active,
    };
    let skill = Skill {
        id: Uuid::new_v4(),
        owner_id: owner.id.clone(),
        name: "Guitar".into(),
        level: "Intermediate".into(),
        description: "Guitar lessons".into(),
        created_at: Utc::now(),
    };

    info!(
        admin = %admin.id,
        owner = %owner.id,
        requester = %requester.id,
        skill = %skill.id,
        "seeded demo data"
    );

    users.seed(admin);
    users.seed(owner);
    users.seed(requester);
    skills.seed(skill);
}
