use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used for specs whose label is empty or whitespace-only.
pub const UNLABELED: &str = "Unlabeled";

/// A raw, user-entered numeric field. It may already be a number (TOML, code)
/// or arbitrary text (CSV, form input) that has yet to be parsed.
///
/// Any other value (booleans, arrays, tables, dates) deserializes to
/// `Unsupported`, which never parses to a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
    Unsupported,
}

impl<'de> Deserialize<'de> for RawField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawFieldVisitor)
    }
}

struct RawFieldVisitor;

impl<'de> Visitor<'de> for RawFieldVisitor {
    type Value = RawField;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a string")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<RawField, E> {
        Ok(RawField::Unsupported)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<RawField, E> {
        Ok(RawField::Number(value as f64))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<RawField, E> {
        Ok(RawField::Number(value as f64))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<RawField, E> {
        Ok(RawField::Number(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<RawField, E> {
        Ok(RawField::Text(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<RawField, E> {
        Ok(RawField::Text(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawField, E> {
        Ok(RawField::Unsupported)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RawField, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(RawField::Unsupported)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawField, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(RawField::Unsupported)
    }
}

impl From<f64> for RawField {
    fn from(value: f64) -> Self {
        RawField::Number(value)
    }
}

impl From<&str> for RawField {
    fn from(value: &str) -> Self {
        RawField::Text(value.to_string())
    }
}

impl From<String> for RawField {
    fn from(value: String) -> Self {
        RawField::Text(value)
    }
}

/// One user-defined cabinet style. Every numeric field is optional and
/// unvalidated; the core decides whether the spec contributes panels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CabinetSpec {
    pub label: String,
    pub cabinet_height: Option<RawField>,
    pub kick_height: Option<RawField>,
    pub box_height_override: Option<RawField>,
    pub box_width: Option<RawField>,
    pub box_depth: Option<RawField>,
    pub brace_height: Option<RawField>,
    pub quantity: Option<RawField>,
}

impl CabinetSpec {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn cabinet_height(mut self, value: impl Into<RawField>) -> Self {
        self.cabinet_height = Some(value.into());
        self
    }

    pub fn kick_height(mut self, value: impl Into<RawField>) -> Self {
        self.kick_height = Some(value.into());
        self
    }

    pub fn box_height_override(mut self, value: impl Into<RawField>) -> Self {
        self.box_height_override = Some(value.into());
        self
    }

    pub fn box_width(mut self, value: impl Into<RawField>) -> Self {
        self.box_width = Some(value.into());
        self
    }

    pub fn box_depth(mut self, value: impl Into<RawField>) -> Self {
        self.box_depth = Some(value.into());
        self
    }

    pub fn brace_height(mut self, value: impl Into<RawField>) -> Self {
        self.brace_height = Some(value.into());
        self
    }

    pub fn quantity(mut self, value: impl Into<RawField>) -> Self {
        self.quantity = Some(value.into());
        self
    }

    /// The trimmed label, or [`UNLABELED`] when nothing remains.
    pub fn display_label(&self) -> String {
        let trimmed = self.label.trim();
        if trimmed.is_empty() {
            UNLABELED.to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// Panel types in the order the expander emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelType {
    Wall,
    Floor,
    Back,
    Brace,
}

impl PanelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelType::Wall => "Wall",
            PanelType::Floor => "Floor",
            PanelType::Back => "Back",
            PanelType::Brace => "Brace",
        }
    }
}

impl fmt::Display for PanelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One flat-stock cutting requirement arising from a single cabinet spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub panel_type: PanelType,
    pub width: f64,
    pub height: f64,
    pub count: u64,
    pub origin_label: String,
}

/// All panels sharing one exact (panel_type, width, height) key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedPanelGroup {
    pub panel_type: PanelType,
    pub width: f64,
    pub height: f64,
    pub total_count: u64,
    /// Distinct contributing labels, sorted and joined with ", ".
    pub contributing_labels: String,
}

/// Per-spec intermediate trace, used for dry runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecTrace {
    pub label: String,
    pub box_height: Option<f64>,
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone)]
pub struct CutListResult {
    pub groups: Vec<AggregatedPanelGroup>,
    pub total_panel_count: u64,
    pub spec_count: usize,
    pub contributing_spec_count: usize,
    pub traces: Vec<SpecTrace>,
}

impl CutListResult {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// JSON report written alongside the CSV export.
#[derive(Debug, Clone, Serialize)]
pub struct CutListReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub spec_count: usize,
    pub contributing_spec_count: usize,
    pub total_panel_count: u64,
    pub groups: &'a [AggregatedPanelGroup],
}

impl<'a> CutListReport<'a> {
    pub fn from_result(result: &'a CutListResult) -> Self {
        Self {
            generated_at: Utc::now(),
            spec_count: result.spec_count,
            contributing_spec_count: result.contributing_spec_count,
            total_panel_count: result.total_panel_count,
            groups: &result.groups,
        }
    }
}

/// Output files the load step can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

/// How the CSV export treats the free-text cabinets column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum CsvDialect {
    /// RFC 4180 quoting of fields containing commas, quotes or newlines.
    #[default]
    Quoted,
    /// Plain comma-join with no escaping.
    Legacy,
}
