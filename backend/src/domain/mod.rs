//! Domain primitives, aggregates, and services.
//!
//! Everything here is transport and storage agnostic: entities carry their
//! invariants, services implement the driving ports over the driven ports,
//! and adapters on either side translate to HTTP or a storage engine.

pub mod auth;
pub mod error;
pub mod match_service;
pub mod matches;
pub mod payment;
pub mod payment_service;
pub mod ports;
pub mod skill;
pub mod user;

pub use self::auth::{Principal, authorize, require_admin};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::match_service::{MatchCommandService, MatchQueryService};
pub use self::matches::{Match, MatchStatus, MatchValidationError, PaymentStatus};
pub use self::payment::{
    PayerCategory, Payment, PaymentDraft, PaymentMethod, PaymentReviewStatus,
    PaymentValidationError,
};
pub use self::payment_service::PaymentService;
pub use self::ports::{
    IdentityStoreError, MatchRepositoryError, PaymentRepositoryError, SkillStoreError,
};
pub use self::skill::Skill;
pub use self::user::{Role, User, UserId, UserStatus, UserValidationError};
