use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{ToolMaterial, ToolType, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckAccessRequest {
    pub user_id: UserId,
}

/// Returned both on 200 (allowed) and on 403 (denied with an explanation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckAccessResponse {
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Catalogue entries carry the full analysed property record on the wire;
/// only the name is consumed for autocomplete, the rest is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialSummary {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialsCatalogueResponse {
    pub materials: Vec<MaterialSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeMaterialRequest {
    pub user_id: UserId,
    pub material: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeMaterialResponse {
    /// Opaque analysed-property record; stored and forwarded verbatim.
    pub material: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalcRequest {
    pub user_id: UserId,
    pub tool_type: ToolType,
    pub tool_material: ToolMaterial,
    pub diameter: f64,
    pub teeth: u32,
    pub material_properties: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    pub vc: f64,
    pub n: f64,
    pub fz: f64,
    pub feed: f64,
    pub ap: f64,
    pub ae: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub coolant: String,
    #[serde(default)]
    pub temperature_risk: String,
    #[serde(default)]
    pub work_hardening: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcResponse {
    pub calculation: Calculation,
    pub recommendations: Recommendations,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn calc_request_uses_snake_case_wire_fields() {
        let request = CalcRequest {
            user_id: UserId(42),
            tool_type: ToolType::Endmill,
            tool_material: ToolMaterial::Carbide,
            diameter: 10.0,
            teeth: 4,
            material_properties: json!({"hardness_hb": "190"}),
        };

        let wire = serde_json::to_value(&request).expect("serialize");
        assert_eq!(wire["user_id"], json!(42));
        assert_eq!(wire["tool_type"], json!("endmill"));
        assert_eq!(wire["tool_material"], json!("carbide"));
        assert_eq!(wire["material_properties"]["hardness_hb"], json!("190"));
    }

    #[test]
    fn calc_response_parses_backend_payload() {
        let body = json!({
            "calculation": {"vc": 120.0, "n": 3820.0, "fz": 0.05, "feed": 764.0, "ap": 2.0, "ae": 5.0},
            "recommendations": {
                "risks": ["overheating"],
                "notes": ["reduce feed"],
                "coolant": "flood",
                "temperature_risk": "medium",
                "work_hardening": "low"
            }
        });

        let parsed: CalcResponse = serde_json::from_value(body).expect("parse");
        assert_eq!(parsed.calculation.vc, 120.0);
        assert_eq!(parsed.recommendations.risks, vec!["overheating".to_string()]);
    }

    #[test]
    fn recommendations_default_missing_fields() {
        let parsed: Recommendations = serde_json::from_value(json!({})).expect("parse");
        assert!(parsed.risks.is_empty());
        assert!(parsed.coolant.is_empty());
    }

    #[test]
    fn catalogue_entries_ignore_extra_property_fields() {
        let body = json!({
            "materials": [
                {"name": "Steel 1045", "hardness_hb": "190", "machinability_index": 0.6},
                {"name": "Aluminium 6061"}
            ]
        });

        let parsed: MaterialsCatalogueResponse = serde_json::from_value(body).expect("parse");
        assert_eq!(parsed.materials.len(), 2);
        assert_eq!(parsed.materials[0].name, "Steel 1045");
    }
}
