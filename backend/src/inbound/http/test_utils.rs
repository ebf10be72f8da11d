//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, test, web};
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    Error, MatchCommandService, MatchQueryService, PaymentService, Principal, Role, Skill, User,
    UserId, UserStatus,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{
    InMemoryMatchRepository, InMemoryPaymentRepository, InMemorySkillCatalogue,
    InMemoryUserDirectory,
};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// In-memory adapters wired to real services behind an [`HttpState`].
pub struct Harness {
    pub users: Arc<InMemoryUserDirectory>,
    pub skills: Arc<InMemorySkillCatalogue>,
    pub matches: Arc<InMemoryMatchRepository>,
    pub payments: Arc<InMemoryPaymentRepository>,
    pub state: HttpState,
}

impl Harness {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserDirectory::new());
        let skills = Arc::new(InMemorySkillCatalogue::new());
        let matches = Arc::new(InMemoryMatchRepository::new());
        let payments = Arc::new(InMemoryPaymentRepository::new());

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

        let payment_command: Arc<dyn crate::domain::ports::PaymentCommand> =
            Arc::clone(&payment_service) as Arc<dyn crate::domain::ports::PaymentCommand>;
        let state = HttpState::new(match_command, match_query, payment_command, payment_service);

        Self {
            users,
            skills,
            matches,
            payments,
            state,
        }
    }

    /// Seed a member account and return it.
    pub fn seed_user(&self, name: &str, role: Role) -> User {
        let user = User {
            id: UserId::random(),
            name: name.to_owned(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            role,
            status: UserStatus::Active,
        };
        self.users.seed(user.clone());
        user
    }

    /// Seed a skill owned by `owner` and return it.
    pub fn seed_skill(&self, owner: &User, name: &str) -> Skill {
        let skill = Skill {
            id: Uuid::new_v4(),
            owner_id: owner.id.clone(),
            name: name.to_owned(),
            level: "Intermediate".to_owned(),
            description: format!("{name} lessons"),
            created_at: Utc::now(),
        };
        self.skills.seed(skill.clone());
        skill
    }
}

/// Build the full `/api/v1` application over a harness, plus the session
/// bootstrap route used by [`login`].
pub fn test_app(
    harness: &Harness,
) -> actix_web::App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    actix_web::App::new()
        .app_data(web::Data::new(harness.state.clone()))
        .wrap(test_session_middleware())
        .route("/test/login/{user_id}/{role}", web::post().to(test_login))
        .configure(crate::inbound::http::routes::configure)
}

/// Session bootstrap endpoint registered only in tests.
///
/// Stands in for the external authentication collaborator by writing a
/// verified principal straight into the session cookie.
pub async fn test_login(
    session: SessionContext,
    path: web::Path<(String, Role)>,
) -> Result<HttpResponse, Error> {
    let (raw_id, role) = path.into_inner();
    let user_id =
        UserId::new(raw_id).map_err(|error| Error::invalid_request(error.to_string()))?;
    let principal = Principal::new(user_id, role);
    session.persist_principal(&principal)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Log `user` in through [`test_login`] and return the session cookies.
pub async fn login<S, B>(app: &S, user: &User) -> Vec<Cookie<'static>>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let role = match user.role {
        Role::User => "user",
        Role::Admin => "admin",
    };
    let uri = format!("/test/login/{}/{role}", user.id);
    let res = test::call_service(app, test::TestRequest::post().uri(&uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT, "test login failed");
    res.response()
        .cookies()
        .map(|cookie| cookie.into_owned())
        .collect()
}

/// Attach previously captured session cookies to a request builder.
pub fn with_cookies(
    mut request: test::TestRequest,
    cookies: &[Cookie<'static>],
) -> test::TestRequest {
    for cookie in cookies {
        request = request.cookie(cookie.clone());
    }
    request
}
