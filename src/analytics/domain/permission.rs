//! Permissions guarding module actions.

use std::fmt;

/// Action permission checked through the authorization collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// List and view configurations, refresh analytics data.
    View,
    /// Create configurations.
    Create,
    /// Edit configurations.
    Edit,
    /// Remove configurations.
    Remove,
}

impl Permission {
    /// Returns the canonical permission name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
