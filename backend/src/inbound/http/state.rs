//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{MatchCommand, MatchQuery, PaymentCommand, PaymentQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub match_command: Arc<dyn MatchCommand>,
    pub match_query: Arc<dyn MatchQuery>,
    pub payment_command: Arc<dyn PaymentCommand>,
    pub payment_query: Arc<dyn PaymentQuery>,
}

impl HttpState {
    /// Bundle the driving port implementations for the HTTP adapter.
    pub fn new(
        match_command: Arc<dyn MatchCommand>,
        match_query: Arc<dyn MatchQuery>,
        payment_command: Arc<dyn PaymentCommand>,
        payment_query: Arc<dyn PaymentQuery>,
    ) -> Self {
        Self {
            match_command,
            match_query,
            payment_command,
            payment_query,
        }
    }
}
