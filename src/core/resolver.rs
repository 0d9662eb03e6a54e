use crate::domain::model::{CabinetSpec, RawField};

/// Parse a raw field into a finite number.
///
/// Absent fields, blank text, text that is not a decimal number and
/// non-finite values (NaN, infinities) all yield `None`. Never fails.
pub fn parse_number(raw: Option<&RawField>) -> Option<f64> {
    let value = match raw? {
        RawField::Number(n) => *n,
        RawField::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        RawField::Unsupported => return None,
    };

    value.is_finite().then_some(value)
}

/// Effective box height of a cabinet.
///
/// `cabinet_height - kick_height` when both parse; otherwise the explicit
/// `box_height_override`. The result may be zero or negative; callers drop
/// the panels that end up non-positive.
pub fn resolve_box_height(spec: &CabinetSpec) -> Option<f64> {
    let cabinet = parse_number(spec.cabinet_height.as_ref());
    let kick = parse_number(spec.kick_height.as_ref());

    match (cabinet, kick) {
        (Some(cabinet), Some(kick)) => Some(cabinet - kick),
        _ => parse_number(spec.box_height_override.as_ref()),
    }
}
