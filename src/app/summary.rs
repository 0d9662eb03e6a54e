use crate::core::aggregator::format_decimal;
use crate::domain::model::CutListResult;
use std::fmt::Write;

/// Per-cabinet breakdown shown for dry runs.
pub fn format_traces(result: &CutListResult) -> String {
    let mut out = String::new();

    for trace in &result.traces {
        let height = trace
            .box_height
            .map(format_decimal)
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "{} (box height {})", trace.label, height);

        if trace.panels.is_empty() {
            let _ = writeln!(out, "  skipped: incomplete or invalid dimensions");
            continue;
        }
        for panel in &trace.panels {
            let _ = writeln!(
                out,
                "  {:<6} {} x {} x{}",
                panel.panel_type.as_str(),
                format_decimal(panel.width),
                format_decimal(panel.height),
                panel.count
            );
        }
    }

    out
}

/// Column-aligned table of the aggregated groups, with a total line.
pub fn format_groups(result: &CutListResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:>8} {:>8} {:>6}  Cabinets",
        "Type", "Width", "Height", "Count"
    );

    for group in &result.groups {
        let _ = writeln!(
            out,
            "{:<6} {:>8} {:>8} {:>6}  {}",
            group.panel_type.as_str(),
            format_decimal(group.width),
            format_decimal(group.height),
            group.total_count,
            group.contributing_labels
        );
    }

    let _ = writeln!(
        out,
        "Total panels: {} from {} of {} cabinet specs",
        result.total_panel_count, result.contributing_spec_count, result.spec_count
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregator::summarize;
    use crate::domain::model::CabinetSpec;

    fn sample() -> CutListResult {
        summarize(&[
            CabinetSpec::new("Base")
                .cabinet_height(34.5)
                .kick_height(4.5)
                .box_width(30.0)
                .box_depth(24.0)
                .brace_height(3.0)
                .quantity(4.0),
            CabinetSpec::new("Draft"),
        ])
    }

    #[test]
    fn test_format_traces() {
        let text = format_traces(&sample());

        assert!(text.contains("Base (box height 30)"));
        assert!(text.contains("  Back   29.25 x 28.5 x4"));
        assert!(text.contains("Draft (box height -)"));
        assert!(text.contains("skipped"));
    }

    #[test]
    fn test_format_groups() {
        let text = format_groups(&sample());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[1].starts_with("Back"));
        assert!(lines[1].ends_with("Base"));
        assert_eq!(lines[5], "Total panels: 28 from 1 of 2 cabinet specs");
    }
}
