//! Domain ports.
//!
//! Driven ports (`UserDirectory`, `SkillCatalogue`, `MatchRepository`,
//! `PaymentRepository`) are implemented by outbound adapters; driving ports
//! (`MatchCommand`, `MatchQuery`, `PaymentCommand`, `PaymentQuery`) are
//! implemented by the domain services and consumed by inbound adapters.

pub mod identity;
pub mod match_flow;
pub mod match_repository;
pub mod payment_flow;
pub mod payment_repository;
pub mod skill_catalogue;

pub use self::identity::{IdentityStoreError, UserDirectory};
pub use self::match_flow::{CreateMatchRequest, MatchCommand, MatchQuery, MatchWithPayments};
pub use self::match_repository::{MatchRepository, MatchRepositoryError};
pub use self::payment_flow::{
    EarningsEntry, EarningsReport, PaymentCommand, PaymentQuery, ReviewDecision,
    SubmitPaymentRequest,
};
pub use self::payment_repository::{PaymentRepository, PaymentRepositoryError};
pub use self::skill_catalogue::{SkillCatalogue, SkillStoreError};

#[cfg(test)]
pub use self::identity::MockUserDirectory;
#[cfg(test)]
pub use self::match_flow::{MockMatchCommand, MockMatchQuery};
#[cfg(test)]
pub use self::match_repository::MockMatchRepository;
#[cfg(test)]
pub use self::payment_flow::{MockPaymentCommand, MockPaymentQuery};
#[cfg(test)]
pub use self::payment_repository::MockPaymentRepository;
#[cfg(test)]
pub use self::skill_catalogue::MockSkillCatalogue;
