//! HTTP driving adapter.
//!
//! Thin actix-web handlers that recover the session principal, validate the
//! payload shape, and delegate to the domain services through the driving
//! ports bundled in [`HttpState`].

mod error;
pub mod matches;
pub mod payments;
pub mod routes;
pub mod schemas;
pub mod session;
pub mod state;
pub mod validation;

#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
pub use session::SessionContext;
pub use state::HttpState;
