//! Route registration for the HTTP adapter.

use actix_web::web;

use crate::inbound::http::{matches, payments};

/// Mount every handler under the `/api/v1` scope.
///
/// Literal payment segments (`pending`, `earnings`) are registered ahead of
/// the `{match_id}` capture so they are never shadowed by it.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(matches::create_match)
            .service(matches::received_matches)
            .service(matches::list_matches)
            .service(matches::accept_match)
            .service(matches::reject_match)
            .service(matches::set_match_payment_status)
            .service(payments::submit_payment)
            .service(payments::pending_payments)
            .service(payments::approved_earnings)
            .service(payments::payments_for_match)
            .service(payments::approve_payment)
            .service(payments::reject_payment),
    );
}
