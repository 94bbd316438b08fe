//! Widget registrar collecting widgets in memory.

use crate::analytics::{domain::AnalyticsWidget, ports::WidgetRegistrar};
use std::sync::{Mutex, PoisonError};

/// Registrar that keeps every registered widget for inspection.
#[derive(Debug, Default)]
pub struct CollectingWidgetRegistrar {
    widgets: Mutex<Vec<AnalyticsWidget>>,
}

impl CollectingWidgetRegistrar {
    /// Creates an empty registrar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the registered widgets.
    #[must_use]
    pub fn widgets(&self) -> Vec<AnalyticsWidget> {
        self.widgets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl WidgetRegistrar for CollectingWidgetRegistrar {
    fn register_widget(&self, widget: AnalyticsWidget) {
        self.widgets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(widget);
    }
}
