//! Analytics data produced by drivers for presentation.

use serde::{Deserialize, Serialize};

/// Presentation style of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    /// Values plotted over time.
    LineChart,
    /// Values plotted on a map.
    GeoChart,
    /// Plain rows.
    Table,
}

/// One labelled value in a widget series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Row label (date, country, ...).
    pub label: String,
    /// Metric value.
    pub value: i64,
}

impl DataPoint {
    /// Creates a data point.
    #[must_use]
    pub fn new(label: impl Into<String>, value: i64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A dashboard widget built from driver data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsWidget {
    name: String,
    label: String,
    kind: WidgetKind,
    points: Vec<DataPoint>,
}

impl AnalyticsWidget {
    /// Creates a widget.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        kind: WidgetKind,
        points: Vec<DataPoint>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            points,
        }
    }

    /// Returns the widget key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the presentation style.
    #[must_use]
    pub const fn kind(&self) -> WidgetKind {
        self.kind
    }

    /// Returns the plotted values.
    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }
}

/// Collection of widgets returned by a driver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsDataSet {
    widgets: Vec<AnalyticsWidget>,
}

impl AnalyticsDataSet {
    /// Creates a data set.
    #[must_use]
    pub const fn new(widgets: Vec<AnalyticsWidget>) -> Self {
        Self { widgets }
    }

    /// Creates a data set with no widgets.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            widgets: Vec::new(),
        }
    }

    /// Returns the widgets.
    #[must_use]
    pub fn widgets(&self) -> &[AnalyticsWidget] {
        &self.widgets
    }

    /// Returns whether the set has no widgets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

impl IntoIterator for AnalyticsDataSet {
    type Item = AnalyticsWidget;
    type IntoIter = std::vec::IntoIter<AnalyticsWidget>;

    fn into_iter(self) -> Self::IntoIter {
        self.widgets.into_iter()
    }
}
