//! Module-level settings for the analytics configuration service.

use std::time::Duration;

/// Default bound on a live driver validation.
pub const DEFAULT_VALIDATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Default translation key for a rejected submission.
pub const DEFAULT_VALIDATION_FAILURE_KEY: &str =
    "package.analytics::validation.api-details-failure";

/// Settings for the analytics configuration module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsModuleConfig {
    module_name: String,
    icon: String,
    validation_timeout: Duration,
    validation_failure_message_key: String,
    validation_failure_message: String,
}

impl Default for AnalyticsModuleConfig {
    fn default() -> Self {
        Self {
            module_name: "config".to_owned(),
            icon: "cog".to_owned(),
            validation_timeout: DEFAULT_VALIDATION_TIMEOUT,
            validation_failure_message_key: DEFAULT_VALIDATION_FAILURE_KEY.to_owned(),
            validation_failure_message:
                "The analytics details could not be verified. Check the options and try again."
                    .to_owned(),
        }
    }
}

impl AnalyticsModuleConfig {
    /// Sets the module name shown in the host navigation.
    #[must_use]
    pub fn with_module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = name.into();
        self
    }

    /// Sets the module icon.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Sets the bound on live driver validation.
    #[must_use]
    pub const fn with_validation_timeout(mut self, timeout: Duration) -> Self {
        self.validation_timeout = timeout;
        self
    }

    /// Sets the translation key and text surfaced when validation fails.
    #[must_use]
    pub fn with_validation_failure_message(
        mut self,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.validation_failure_message_key = key.into();
        self.validation_failure_message = message.into();
        self
    }

    /// Returns the module name.
    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Returns the module icon.
    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Returns the bound on live driver validation.
    #[must_use]
    pub const fn validation_timeout(&self) -> Duration {
        self.validation_timeout
    }

    /// Returns the translation key for a rejected submission.
    #[must_use]
    pub fn validation_failure_message_key(&self) -> &str {
        &self.validation_failure_message_key
    }

    /// Returns the text for a rejected submission.
    #[must_use]
    pub fn validation_failure_message(&self) -> &str {
        &self.validation_failure_message
    }
}
