//! Authenticated principal and the authorization gate.
//!
//! Credential verification happens outside this crate; by the time a
//! principal reaches the domain it is already a verified `(user_id, role)`
//! pair. The gate is a pure guard with no side effects: role membership
//! first, then an optional resource predicate.

use serde::{Deserialize, Serialize};

use crate::domain::{Error, Role, UserId};

/// Verified identity attached to an incoming action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
}

impl Principal {
    /// Construct a principal from its verified parts.
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }
}

/// Allow or deny an action for `principal`.
///
/// An empty `required_roles` slice means any authenticated principal
/// passes the role check. The optional `resource_check` runs only after
/// the role check succeeds and denies with `Forbidden` when it returns
/// `false`.
///
/// # Examples
/// ```
/// use backend::domain::{authorize, Principal, Role, UserId};
///
/// let admin = Principal::new(UserId::random(), Role::Admin);
/// assert!(authorize(&admin, &[Role::Admin], None::<fn(&Principal) -> bool>).is_ok());
/// ```
pub fn authorize<F>(
    principal: &Principal,
    required_roles: &[Role],
    resource_check: Option<F>,
) -> Result<(), Error>
where
    F: FnOnce(&Principal) -> bool,
{
    if !required_roles.is_empty() && !required_roles.contains(&principal.role) {
        return Err(Error::forbidden("insufficient permissions"));
    }

    if let Some(check) = resource_check {
        if !check(principal) {
            return Err(Error::forbidden("not authorized for this resource"));
        }
    }

    Ok(())
}

/// Shorthand for admin-only operations.
pub fn require_admin(principal: &Principal) -> Result<(), Error> {
    authorize(
        principal,
        &[Role::Admin],
        None::<fn(&Principal) -> bool>,
    )
}
