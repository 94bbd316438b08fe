//! Fixed-permission authorization adapter.

use crate::analytics::{domain::Permission, ports::Authorizer};
use std::collections::HashSet;

/// Authorizer granting a fixed set of permissions.
#[derive(Debug, Clone, Default)]
pub struct StaticAuthorizer {
    granted: HashSet<Permission>,
}

impl StaticAuthorizer {
    /// Grants exactly `permissions`.
    #[must_use]
    pub fn new(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            granted: permissions.into_iter().collect(),
        }
    }

    /// Grants every permission.
    #[must_use]
    pub fn allow_all() -> Self {
        Self::new([
            Permission::View,
            Permission::Create,
            Permission::Edit,
            Permission::Remove,
        ])
    }

    /// Grants nothing.
    #[must_use]
    pub fn deny_all() -> Self {
        Self::default()
    }
}

impl Authorizer for StaticAuthorizer {
    fn is_authorized(&self, permission: Permission) -> bool {
        self.granted.contains(&permission)
    }
}
