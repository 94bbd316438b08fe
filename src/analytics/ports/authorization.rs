//! Authorization port gating module actions.

use crate::analytics::domain::Permission;

/// Permission check supplied by the host application.
pub trait Authorizer: Send + Sync {
    /// Returns whether the current user holds `permission`.
    fn is_authorized(&self, permission: Permission) -> bool;
}
