//! Presentation port accepting dashboard widgets.

use crate::analytics::domain::{AnalyticsDataSet, AnalyticsWidget};

/// Sink the presentation layer exposes for analytics widgets.
pub trait WidgetRegistrar: Send + Sync {
    /// Registers a single widget.
    fn register_widget(&self, widget: AnalyticsWidget);

    /// Registers every widget of a data set, returning how many were added.
    fn register_data_set(&self, data: AnalyticsDataSet) -> usize {
        let mut registered = 0;
        for widget in data {
            self.register_widget(widget);
            registered += 1;
        }
        registered
    }
}
