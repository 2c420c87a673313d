//! Report display options.

use serde::{Deserialize, Serialize};

/// Display options for the report screens.
///
/// This record is synchronized as an opaque whole: the merge engine applies
/// last-writer-wins at record granularity, never per field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSettings {
    /// Default reporting period, e.g. `"month"` or `"week"`.
    #[serde(default)]
    pub default_period: String,
    /// Whether delivery takings are shown as a separate column.
    #[serde(default)]
    pub show_delivery: bool,
    /// Branch ids hidden from the overview dashboard.
    #[serde(default)]
    pub hidden_branch_ids: Vec<String>,
}
