//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The authentication collaborator that verifies credentials lives outside
//! this crate; what it leaves behind is a cookie session carrying the
//! verified `(user_id, role)` pair. Handlers go through this wrapper to
//! recover the principal, so an absent or unreadable session surfaces as
//! `401 Unauthorized` before any role check runs.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Principal, Role, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ROLE_KEY: &str = "role";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the verified principal in the session cookie.
    pub fn persist_principal(&self, principal: &Principal) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, principal.user_id.to_string())
            .and_then(|()| self.0.insert(ROLE_KEY, principal.role))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current principal from the session, if present.
    pub fn principal(&self) -> Result<Option<Principal>, Error> {
        let raw_id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let role = self
            .0
            .get::<Role>(ROLE_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;

        match (raw_id, role) {
            (Some(raw), Some(role)) => match UserId::new(raw) {
                Ok(user_id) => Ok(Some(Principal::new(user_id, role))),
                Err(error) => {
                    tracing::warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            _ => Ok(None),
        }
    }

    /// Require a verified principal or return `401 Unauthorized`.
    pub fn require_principal(&self) -> Result<Principal, Error> {
        self.principal()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(Self::new) })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    use super::*;
    use crate::inbound::http::test_utils::test_session_middleware;

    #[actix_web::test]
    async fn round_trips_the_principal() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        let principal = Principal::new(
                            UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6")
                                .expect("fixture id"),
                            Role::Admin,
                        );
                        session.persist_principal(&principal)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let principal = session.require_principal()?;
                        Ok::<_, Error>(
                            HttpResponse::Ok()
                                .body(format!("{}:{:?}", principal.user_id, principal.role)),
                        )
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);

        let cookies: Vec<_> = set_res
            .response()
            .cookies()
            .map(|cookie| cookie.into_owned())
            .collect();
        let mut request = test::TestRequest::get().uri("/get");
        for cookie in cookies {
            request = request.cookie(cookie);
        }

        let get_res = test::call_service(&app, request.to_request()).await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = test::read_body(get_res).await;
        assert_eq!(body, "3fa85f64-5717-4562-b3fc-2c963f66afa6:Admin");
    }

    #[actix_web::test]
    async fn missing_session_is_unauthorized() {
        let app = test::init_service(App::new().wrap(test_session_middleware()).route(
            "/get",
            web::get().to(|session: SessionContext| async move {
                let _ = session.require_principal()?;
                Ok::<_, Error>(HttpResponse::Ok())
            }),
        ))
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/get").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
