use crate::core::expander::expand_panels;
use crate::core::resolver::resolve_box_height;
use crate::domain::model::{
    AggregatedPanelGroup, CabinetSpec, CsvDialect, CutListResult, Panel, PanelType, SpecTrace,
};
use crate::utils::error::{CutListError, Result};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

pub const EXPORT_FILENAME: &str = "cabinet-panels.csv";
pub const REPORT_FILENAME: &str = "cabinet-panels.json";
pub const CSV_HEADER: [&str; 5] = ["PanelType", "Width", "Height", "Count", "Cabinets"];

/// Exact grouping key. Ordered by panel type name, then width, then height.
#[derive(Debug, Clone, Copy)]
struct GroupKey {
    panel_type: PanelType,
    width: f64,
    height: f64,
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.panel_type
            .as_str()
            .cmp(other.panel_type.as_str())
            .then_with(|| self.width.total_cmp(&other.width))
            .then_with(|| self.height.total_cmp(&other.height))
    }
}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupKey {}

#[derive(Debug, Default)]
struct GroupTotals {
    total_count: u64,
    labels: BTreeSet<String>,
}

#[derive(Debug, Default)]
struct PanelGroups {
    groups: BTreeMap<GroupKey, GroupTotals>,
}

impl PanelGroups {
    fn add(&mut self, panel: Panel) {
        let key = GroupKey {
            panel_type: panel.panel_type,
            width: panel.width,
            height: panel.height,
        };
        let totals = self.groups.entry(key).or_default();
        totals.total_count += panel.count;
        totals.labels.insert(panel.origin_label);
    }

    fn finish(self) -> Vec<AggregatedPanelGroup> {
        self.groups
            .into_iter()
            .map(|(key, totals)| AggregatedPanelGroup {
                panel_type: key.panel_type,
                width: key.width,
                height: key.height,
                total_count: totals.total_count,
                contributing_labels: totals.labels.into_iter().collect::<Vec<_>>().join(", "),
            })
            .collect()
    }
}

/// Merge the panels of every spec into one group per exact
/// (panel type, width, height), sorted by that key.
pub fn aggregate(specs: &[CabinetSpec]) -> Vec<AggregatedPanelGroup> {
    let mut groups = PanelGroups::default();
    for panel in specs.iter().flat_map(expand_panels) {
        groups.add(panel);
    }
    groups.finish()
}

/// Like [`aggregate`], additionally keeping the per-spec trace and counters.
pub fn summarize(specs: &[CabinetSpec]) -> CutListResult {
    let mut groups = PanelGroups::default();
    let mut traces = Vec::with_capacity(specs.len());
    let mut contributing_spec_count = 0;

    for spec in specs {
        let panels = expand_panels(spec);
        if !panels.is_empty() {
            contributing_spec_count += 1;
        }
        traces.push(SpecTrace {
            label: spec.display_label(),
            box_height: resolve_box_height(spec),
            panels: panels.clone(),
        });
        for panel in panels {
            groups.add(panel);
        }
    }

    let groups = groups.finish();
    CutListResult {
        total_panel_count: total_panel_count(&groups),
        groups,
        spec_count: specs.len(),
        contributing_spec_count,
        traces,
    }
}

pub fn total_panel_count(groups: &[AggregatedPanelGroup]) -> u64 {
    groups.iter().map(|g| g.total_count).sum()
}

/// Plain decimal rendering: `30`, `29.25`, never an exponent.
pub fn format_decimal(value: f64) -> String {
    value.to_string()
}

fn record_fields(group: &AggregatedPanelGroup) -> [String; 5] {
    [
        group.panel_type.as_str().to_string(),
        format_decimal(group.width),
        format_decimal(group.height),
        group.total_count.to_string(),
        group.contributing_labels.clone(),
    ]
}

/// Header line plus one naive comma-joined line per group.
///
/// The cabinets column is written verbatim, so labels containing commas or
/// newlines are not escaped.
pub fn to_delimited_text(groups: &[AggregatedPanelGroup]) -> String {
    let mut lines = vec![CSV_HEADER.join(",")];
    lines.extend(groups.iter().map(|g| record_fields(g).join(",")));
    lines.join("\n")
}

/// Same layout as [`to_delimited_text`] with RFC 4180 quoting applied.
pub fn to_quoted_csv(groups: &[AggregatedPanelGroup]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for group in groups {
        writer.write_record(record_fields(group))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CutListError::ProcessingError {
            message: format!("Failed to flush CSV writer: {}", e),
        })?;
    let text = String::from_utf8(bytes).map_err(|e| CutListError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })?;

    Ok(text.trim_end_matches('\n').to_string())
}

/// Render the export in the requested dialect. `None` when there is nothing
/// to export.
pub fn render_export(groups: &[AggregatedPanelGroup], dialect: CsvDialect) -> Result<Option<String>> {
    if groups.is_empty() {
        return Ok(None);
    }

    let text = match dialect {
        CsvDialect::Legacy => to_delimited_text(groups),
        CsvDialect::Quoted => to_quoted_csv(groups)?,
    };
    Ok(Some(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_cabinet() -> CabinetSpec {
        CabinetSpec::new("Base")
            .cabinet_height(34.5)
            .kick_height(4.5)
            .box_width(30.0)
            .box_depth(24.0)
            .brace_height(3.0)
            .quantity(4.0)
    }

    fn upper_cabinet() -> CabinetSpec {
        CabinetSpec::new("Upper")
            .cabinet_height(30.0)
            .kick_height(0.0)
            .box_width(30.0)
            .box_depth(12.0)
            .brace_height(3.0)
            .quantity(6.0)
    }

    fn find(
        groups: &[AggregatedPanelGroup],
        panel_type: PanelType,
        width: f64,
        height: f64,
    ) -> &AggregatedPanelGroup {
        groups
            .iter()
            .find(|g| g.panel_type == panel_type && g.width == width && g.height == height)
            .unwrap_or_else(|| panic!("missing {} {}x{}", panel_type, width, height))
    }

    #[test]
    fn test_aggregate_merges_matching_back_panels() {
        let groups = aggregate(&[base_cabinet(), upper_cabinet()]);

        let back = find(&groups, PanelType::Back, 29.25, 28.5);
        assert_eq!(back.total_count, 10);
        assert_eq!(back.contributing_labels, "Base, Upper");

        let brace = find(&groups, PanelType::Brace, 28.5, 3.0);
        assert_eq!(brace.total_count, 30);

        assert_eq!(find(&groups, PanelType::Wall, 24.0, 30.0).total_count, 8);
        assert_eq!(find(&groups, PanelType::Wall, 12.0, 30.0).total_count, 12);
        assert_eq!(find(&groups, PanelType::Floor, 29.25, 24.0).total_count, 4);
        assert_eq!(find(&groups, PanelType::Floor, 29.25, 12.0).total_count, 6);
        assert_eq!(groups.len(), 6);
    }

    #[test]
    fn test_aggregate_sorted_by_type_width_height() {
        let groups = aggregate(&[upper_cabinet(), base_cabinet()]);
        let keys: Vec<(&str, f64, f64)> = groups
            .iter()
            .map(|g| (g.panel_type.as_str(), g.width, g.height))
            .collect();

        assert_eq!(
            keys,
            vec![
                ("Back", 29.25, 28.5),
                ("Brace", 28.5, 3.0),
                ("Floor", 29.25, 12.0),
                ("Floor", 29.25, 24.0),
                ("Wall", 12.0, 30.0),
                ("Wall", 24.0, 30.0),
            ]
        );
    }

    #[test]
    fn test_aggregate_ignores_input_order() {
        let a = aggregate(&[base_cabinet(), upper_cabinet()]);
        let b = aggregate(&[upper_cabinet(), base_cabinet()]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let specs = vec![base_cabinet(), upper_cabinet(), CabinetSpec::new("Blank")];
        assert_eq!(aggregate(&specs), aggregate(&specs));
    }

    #[test]
    fn test_aggregate_deduplicates_labels() {
        let groups = aggregate(&[base_cabinet(), base_cabinet()]);
        let wall = find(&groups, PanelType::Wall, 24.0, 30.0);

        assert_eq!(wall.total_count, 16);
        assert_eq!(wall.contributing_labels, "Base");
    }

    #[test]
    fn test_aggregate_merges_walls_across_labels() {
        let mut island = base_cabinet().box_width(36.0);
        island.label = "Island".to_string();

        let groups = aggregate(&[base_cabinet(), island]);
        let wall = find(&groups, PanelType::Wall, 24.0, 30.0);

        assert_eq!(wall.total_count, 16);
        assert_eq!(wall.contributing_labels, "Base, Island");
        // Different widths stay in separate floor groups.
        assert_eq!(find(&groups, PanelType::Floor, 29.25, 24.0).total_count, 4);
        assert_eq!(find(&groups, PanelType::Floor, 35.25, 24.0).total_count, 4);
    }

    #[test]
    fn test_aggregate_empty_and_invalid_input() {
        assert!(aggregate(&[]).is_empty());
        assert!(aggregate(&[CabinetSpec::new("Nothing"), base_cabinet().quantity(0.0)]).is_empty());
    }

    #[test]
    fn test_total_panel_count() {
        let groups = aggregate(&[base_cabinet(), upper_cabinet()]);
        // Base: 8 + 4 + 4 + 12, Upper: 12 + 6 + 6 + 18.
        assert_eq!(total_panel_count(&groups), 70);
        assert_eq!(total_panel_count(&[]), 0);
    }

    #[test]
    fn test_summarize_counts_and_traces() {
        let specs = vec![base_cabinet(), CabinetSpec::new(""), upper_cabinet()];
        let result = summarize(&specs);

        assert_eq!(result.spec_count, 3);
        assert_eq!(result.contributing_spec_count, 2);
        assert_eq!(result.total_panel_count, 70);
        assert_eq!(result.groups, aggregate(&specs));

        assert_eq!(result.traces.len(), 3);
        assert_eq!(result.traces[0].box_height, Some(30.0));
        assert_eq!(result.traces[0].panels.len(), 4);
        assert_eq!(result.traces[1].label, "Unlabeled");
        assert_eq!(result.traces[1].box_height, None);
        assert!(result.traces[1].panels.is_empty());
    }

    #[test]
    fn test_to_delimited_text() {
        let groups = aggregate(&[base_cabinet(), upper_cabinet()]);
        let text = to_delimited_text(&groups);
        let lines: Vec<&str> = text.split('\n').collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "PanelType,Width,Height,Count,Cabinets");
        assert_eq!(lines[1], "Back,29.25,28.5,10,Base, Upper");
        assert_eq!(lines[2], "Brace,28.5,3,30,Base, Upper");
        assert_eq!(lines[6], "Wall,24,30,8,Base");
    }

    #[test]
    fn test_to_delimited_text_empty() {
        assert_eq!(to_delimited_text(&[]), "PanelType,Width,Height,Count,Cabinets");
    }

    #[test]
    fn test_to_quoted_csv_quotes_label_lists() {
        let groups = aggregate(&[base_cabinet(), upper_cabinet()]);
        let text = to_quoted_csv(&groups).unwrap();
        let lines: Vec<&str> = text.split('\n').collect();

        assert_eq!(lines[0], "PanelType,Width,Height,Count,Cabinets");
        assert_eq!(lines[1], "Back,29.25,28.5,10,\"Base, Upper\"");
        assert_eq!(lines[6], "Wall,24,30,8,Base");
    }

    #[test]
    fn test_dialects_agree_without_special_characters() {
        let groups = aggregate(&[base_cabinet()]);
        assert_eq!(to_quoted_csv(&groups).unwrap(), to_delimited_text(&groups));
    }

    #[test]
    fn test_render_export_empty_is_noop() {
        assert_eq!(render_export(&[], CsvDialect::Quoted).unwrap(), None);
        assert_eq!(render_export(&[], CsvDialect::Legacy).unwrap(), None);
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(30.0), "30");
        assert_eq!(format_decimal(29.25), "29.25");
        assert_eq!(format_decimal(0.125), "0.125");
        assert_eq!(format_decimal(1234567.5), "1234567.5");
    }
}
