//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the match and payment endpoints. Authentication is a session cookie left
//! behind by the external login collaborator, so the document carries a
//! cookie security scheme rather than a login path of its own.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::matches::{
    CreateMatchBody, MatchResponse, MatchWithPaymentsResponse, PaymentStatusBody,
};
use crate::inbound::http::payments::{
    EarningsEntryResponse, EarningsResponse, PaymentResponse, SubmitPaymentBody,
};
use crate::domain::{
    MatchStatus, PayerCategory, PaymentMethod, PaymentReviewStatus, PaymentStatus,
};
use crate::inbound::http::schemas::ErrorSchema;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by the authentication service.",
            ))),
        );
    }
}

/// OpenAPI document for the match and payment lifecycle API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Match and payment lifecycle API",
        description = "Coordinates skill-exchange matches from request through \
                       payment settlement."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::matches::create_match,
        crate::inbound::http::matches::received_matches,
        crate::inbound::http::matches::list_matches,
        crate::inbound::http::matches::accept_match,
        crate::inbound::http::matches::reject_match,
        crate::inbound::http::matches::set_match_payment_status,
        crate::inbound::http::payments::submit_payment,
        crate::inbound::http::payments::pending_payments,
        crate::inbound::http::payments::approved_earnings,
        crate::inbound::http::payments::payments_for_match,
        crate::inbound::http::payments::approve_payment,
        crate::inbound::http::payments::reject_payment,
    ),
    components(schemas(
        CreateMatchBody,
        PaymentStatusBody,
        MatchResponse,
        MatchWithPaymentsResponse,
        SubmitPaymentBody,
        PaymentResponse,
        EarningsEntryResponse,
        EarningsResponse,
        ErrorSchema,
        MatchStatus,
        PaymentStatus,
        PaymentMethod,
        PayerCategory,
        PaymentReviewStatus,
    )),
    tags(
        (name = "matches", description = "Match request and decision workflow"),
        (name = "payments", description = "Payment submission, review, and reporting")
    )
)]
pub struct ApiDoc;
