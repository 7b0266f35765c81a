//! Export job parameters
//!
//! Typed rendition of the filters accepted by the export-jobs endpoint. The
//! remote service is the only validator; the client serializes what it is
//! given and passes unknown fields through untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::impl_wire_enum_conversions;

/// Activity types to include in an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    /// Only emails
    Email,
    /// Only meetings
    Meeting,
    /// Only calls
    Call,
    /// Every activity type
    All,
}

impl_wire_enum_conversions!(ActivityType {
    Email => "email",
    Meeting => "meeting",
    Call => "call",
    All => "all",
});

/// Output data structure of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Single JSON document
    #[serde(rename = "JSON")]
    Json,
    /// One JSON document per line
    #[serde(rename = "JSONLines")]
    JsonLines,
}

impl_wire_enum_conversions!(OutputFormat {
    Json => "JSON",
    JsonLines => "JSONLines",
});

/// Selection mode of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportType {
    /// All activities dated between `start_date` and `end_date`; builds a
    /// historical base
    Snapshot,
    /// All activities processed between `start_date` and `end_date`; meant
    /// for recurring jobs
    Delta,
}

impl_wire_enum_conversions!(ExportType {
    Snapshot => "snapshot",
    Delta => "delta",
});

/// Parameters for starting an activities export
///
/// Unset fields are omitted from the request body. Dates serialize as
/// `yyyy-MM-dd`; the start date begins at 00:00 UTC and the end date ends at
/// 23:59 UTC on the service side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportParams {
    /// First day of activities, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Last day of activities, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Activity types to include
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<ActivityType>,
    /// Structure of the exported data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
    /// Snapshot or delta selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_type: Option<ExportType>,
    /// Fields the client does not know about, sent as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExportParams {
    /// Empty parameters; the service applies its defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `start_date`
    #[must_use]
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Set `end_date`
    #[must_use]
    pub fn with_end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Set `activity_type`
    #[must_use]
    pub fn with_activity_type(mut self, activity_type: ActivityType) -> Self {
        self.activity_type = Some(activity_type);
        self
    }

    /// Set `output_format`
    #[must_use]
    pub fn with_output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = Some(output_format);
        self
    }

    /// Set `export_type`
    #[must_use]
    pub fn with_export_type(mut self, export_type: ExportType) -> Self {
        self.export_type = Some(export_type);
        self
    }

    /// Add a field the typed struct does not cover
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
