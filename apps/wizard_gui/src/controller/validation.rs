//! Per-step validation gate. Pure predicates, no network access.

use shared::domain::{ToolMaterial, ToolType};

use crate::controller::state::GeometryInput;

pub const MSG_TOOL_TYPE: &str = "Select a tool type to continue.";
pub const MSG_MATERIAL_NAME: &str = "Enter the workpiece material.";
pub const MSG_TOOL_MATERIAL: &str = "Select a tool material to continue.";
pub const MSG_GEOMETRY: &str = "Diameter and tooth count must be positive numbers.";

pub fn check_tool_type(selected: Option<ToolType>) -> Result<(), String> {
    selected.map(|_| ()).ok_or_else(|| MSG_TOOL_TYPE.to_string())
}

/// Returns the trimmed material name; whitespace-only input is rejected.
pub fn check_material_name(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(MSG_MATERIAL_NAME.to_string());
    }
    Ok(trimmed.to_string())
}

pub fn check_tool_material(selected: Option<ToolMaterial>) -> Result<(), String> {
    selected.map(|_| ()).ok_or_else(|| MSG_TOOL_MATERIAL.to_string())
}

/// Diameter must parse to a finite number > 0; teeth to an integer > 0.
pub fn parse_geometry(input: &GeometryInput) -> Result<(f64, u32), String> {
    let diameter: f64 = input
        .diameter
        .trim()
        .parse()
        .map_err(|_| MSG_GEOMETRY.to_string())?;
    if !diameter.is_finite() || diameter <= 0.0 {
        return Err(MSG_GEOMETRY.to_string());
    }

    let teeth: u32 = input
        .teeth
        .trim()
        .parse()
        .map_err(|_| MSG_GEOMETRY.to_string())?;
    if teeth == 0 {
        return Err(MSG_GEOMETRY.to_string());
    }

    Ok((diameter, teeth))
}
