use crate::core::resolver::{parse_number, resolve_box_height};
use crate::domain::model::{CabinetSpec, Panel, PanelType};

/// Material allowance subtracted from the box width for floor and back panels.
pub const SINGLE_WALL_ALLOWANCE: f64 = 0.75;
/// Allowance subtracted from the box width for braces and from the box height for backs.
pub const DOUBLE_WALL_ALLOWANCE: f64 = 1.5;

/// Quantities above this are treated as invalid input.
pub const MAX_QUANTITY: f64 = u32::MAX as f64;

/// Dimensions a spec must resolve before it contributes panels.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ResolvedCabinet {
    box_height: f64,
    box_width: f64,
    box_depth: f64,
    brace_height: f64,
    quantity: u64,
}

impl ResolvedCabinet {
    fn from_spec(spec: &CabinetSpec) -> Option<Self> {
        let box_height = resolve_box_height(spec)?;
        let box_width = parse_number(spec.box_width.as_ref())?;
        let box_depth = parse_number(spec.box_depth.as_ref())?;
        let brace_height = parse_number(spec.brace_height.as_ref())?;
        let quantity = parse_quantity(spec)?;

        Some(Self {
            box_height,
            box_width,
            box_depth,
            brace_height,
            quantity,
        })
    }
}

/// Quantity must be a positive whole number.
fn parse_quantity(spec: &CabinetSpec) -> Option<u64> {
    let quantity = parse_number(spec.quantity.as_ref())?;
    if quantity <= 0.0 || quantity.fract() != 0.0 || quantity > MAX_QUANTITY {
        return None;
    }
    Some(quantity as u64)
}

/// Expand one cabinet spec into the panels it needs, in the order
/// Wall, Floor, Back, Brace.
///
/// Returns an empty vector when any required dimension is missing or the
/// quantity is not positive. Panels whose width, height or count would not
/// be positive are left out individually.
pub fn expand_panels(spec: &CabinetSpec) -> Vec<Panel> {
    let Some(cabinet) = ResolvedCabinet::from_spec(spec) else {
        return Vec::new();
    };

    let label = spec.display_label();
    let q = cabinet.quantity;

    // Arithmetic order is fixed: identical inputs must give bit-identical keys.
    let candidates = [
        (PanelType::Wall, cabinet.box_depth, cabinet.box_height, 2 * q),
        (
            PanelType::Floor,
            cabinet.box_width - SINGLE_WALL_ALLOWANCE,
            cabinet.box_depth,
            q,
        ),
        (
            PanelType::Back,
            cabinet.box_width - SINGLE_WALL_ALLOWANCE,
            cabinet.box_height - DOUBLE_WALL_ALLOWANCE,
            q,
        ),
        (
            PanelType::Brace,
            cabinet.box_width - DOUBLE_WALL_ALLOWANCE,
            cabinet.brace_height,
            3 * q,
        ),
    ];

    candidates
        .into_iter()
        .filter(|(_, width, height, count)| *width > 0.0 && *height > 0.0 && *count > 0)
        .map(|(panel_type, width, height, count)| Panel {
            panel_type,
            width,
            height,
            count,
            origin_label: label.clone(),
        })
        .collect()
}
