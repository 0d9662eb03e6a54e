use crate::domain::model::{CabinetSpec, RawField};
use crate::utils::error::Result;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Label,
    CabinetHeight,
    KickHeight,
    BoxHeightOverride,
    BoxWidth,
    BoxDepth,
    BraceHeight,
    Quantity,
}

impl Column {
    /// Header match ignoring case, spaces, dashes and underscores, so
    /// `box_width`, `Box Width` and `boxWidth` are the same column.
    fn from_header(header: &str) -> Option<Self> {
        let key: String = header
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "label" => Some(Column::Label),
            "cabinetheight" => Some(Column::CabinetHeight),
            "kickheight" => Some(Column::KickHeight),
            "boxheightoverride" | "boxheight" => Some(Column::BoxHeightOverride),
            "boxwidth" => Some(Column::BoxWidth),
            "boxdepth" => Some(Column::BoxDepth),
            "braceheight" => Some(Column::BraceHeight),
            "quantity" | "qty" => Some(Column::Quantity),
            _ => None,
        }
    }
}

/// Read cabinet specs from CSV with a header row.
///
/// Unknown columns are ignored and missing columns are absent on every row.
/// Cell contents are kept as raw text; numeric parsing happens in the core.
/// A structurally broken file (ragged rows, bad UTF-8) is an error.
pub fn read_cabinet_specs(data: &[u8]) -> Result<Vec<CabinetSpec>> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let columns: Vec<Option<Column>> = reader
        .headers()?
        .iter()
        .map(Column::from_header)
        .collect();

    tracing::debug!(
        "CSV columns recognised: {}/{}",
        columns.iter().filter(|c| c.is_some()).count(),
        columns.len()
    );

    let mut specs = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut spec = CabinetSpec::default();

        for (column, value) in columns.iter().zip(record.iter()) {
            let Some(column) = column else { continue };
            if *column == Column::Label {
                spec.label = value.to_string();
                continue;
            }

            let raw = (!value.is_empty()).then(|| RawField::Text(value.to_string()));
            match column {
                Column::CabinetHeight => spec.cabinet_height = raw,
                Column::KickHeight => spec.kick_height = raw,
                Column::BoxHeightOverride => spec.box_height_override = raw,
                Column::BoxWidth => spec.box_width = raw,
                Column::BoxDepth => spec.box_depth = raw,
                Column::BraceHeight => spec.brace_height = raw,
                Column::Quantity => spec.quantity = raw,
                Column::Label => {}
            }
        }

        specs.push(spec);
    }

    Ok(specs)
}
