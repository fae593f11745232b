use reqwest::Client;
use serde_json::Value;
use shared::{
    domain::{ToolMaterial, ToolType, UserId},
    error::ServiceErrorBody,
    protocol::{
        AnalyzeMaterialRequest, AnalyzeMaterialResponse, CalcRequest, CalcResponse,
        CheckAccessRequest, CheckAccessResponse, MaterialSummary, MaterialsCatalogueResponse,
    },
};
use tracing::debug;

pub mod error;
pub mod identity;

pub use error::{ApiError, GENERIC_ANALYSIS_FAILURE, GENERIC_CHAIN_FAILURE, GENERIC_DENIAL};

/// HTTP client for the wizard backend. One instance per session; the
/// underlying `reqwest::Client` pools connections internally.
pub struct WizardApi {
    http: Client,
    base_url: String,
}

impl WizardApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Remote authorization gate. Any outcome other than a 2xx body with
    /// `allowed: true` resolves to `ApiError::Denied`; the caller treats a
    /// denial as terminal for the session.
    pub async fn check_access(&self, user_id: UserId) -> Result<(), ApiError> {
        let res = self
            .http
            .post(format!("{}/api/check_access", self.base_url))
            .json(&CheckAccessRequest { user_id })
            .send()
            .await?;
        let status = res.status();
        match res.json::<CheckAccessResponse>().await {
            Ok(body) if status.is_success() && body.allowed => Ok(()),
            Ok(body) => Err(ApiError::Denied(
                body.message.unwrap_or_else(|| GENERIC_DENIAL.to_string()),
            )),
            Err(_) => Err(ApiError::Denied(GENERIC_DENIAL.to_string())),
        }
    }

    /// Autocomplete catalogue. Callers treat every failure as "no catalogue";
    /// it must never block the wizard.
    pub async fn fetch_material_catalogue(&self) -> Result<Vec<MaterialSummary>, ApiError> {
        let body: MaterialsCatalogueResponse = self
            .http
            .get(format!("{}/api/materials", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.materials)
    }

    /// Translate a free-text material name into an analysed property record.
    pub async fn analyze_material(
        &self,
        user_id: UserId,
        material: &str,
    ) -> Result<Value, ApiError> {
        let res = self
            .http
            .post(format!("{}/api/materials/analyze", self.base_url))
            .json(&AnalyzeMaterialRequest {
                user_id,
                material: material.to_string(),
            })
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ApiError::Service(
                read_error_body(res, GENERIC_ANALYSIS_FAILURE).await,
            ));
        }
        let body: AnalyzeMaterialResponse = res.json().await?;
        Ok(body.material)
    }

    pub async fn calculate(&self, request: &CalcRequest) -> Result<CalcResponse, ApiError> {
        let res = self
            .http
            .post(format!("{}/api/calc", self.base_url))
            .json(request)
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ApiError::Service(
                read_error_body(res, GENERIC_CHAIN_FAILURE).await,
            ));
        }
        Ok(res.json().await?)
    }
}

async fn read_error_body(res: reqwest::Response, fallback: &str) -> String {
    match res.json::<ServiceErrorBody>().await {
        Ok(body) => body.error.unwrap_or_else(|| fallback.to_string()),
        Err(_) => fallback.to_string(),
    }
}

/// Validated step-1..4 selections, ready for the network chain.
#[derive(Debug, Clone)]
pub struct CuttingSelection {
    pub tool_type: ToolType,
    pub tool_material: ToolMaterial,
    pub diameter: f64,
    pub teeth: u32,
    pub material: String,
}

#[derive(Debug)]
pub struct ChainOutcome {
    pub material_properties: Value,
    pub result: CalcResponse,
}

/// First failure of the chain, resolved to a user-facing message. When the
/// analyze stage had already succeeded its property record is retained so
/// the session keeps it across a failed calculation.
#[derive(Debug)]
pub struct ChainError {
    pub message: String,
    pub material_properties: Option<Value>,
}

/// Sequenced analyze-then-calculate pipeline with early exit. The analyze
/// response is fully resolved before the calc request is issued; no failure
/// escapes as anything but a `ChainError`.
pub async fn run_cutting_chain(
    api: &WizardApi,
    user_id: UserId,
    selection: &CuttingSelection,
) -> Result<ChainOutcome, ChainError> {
    let properties = api
        .analyze_material(user_id, &selection.material)
        .await
        .map_err(|err| ChainError {
            message: err.user_message(),
            material_properties: None,
        })?;
    debug!(material = %selection.material, "material analysis resolved");

    let request = CalcRequest {
        user_id,
        tool_type: selection.tool_type,
        tool_material: selection.tool_material,
        diameter: selection.diameter,
        teeth: selection.teeth,
        material_properties: properties.clone(),
    };
    match api.calculate(&request).await {
        Ok(result) => Ok(ChainOutcome {
            material_properties: properties,
            result,
        }),
        Err(err) => Err(ChainError {
            message: err.user_message(),
            material_properties: Some(properties),
        }),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
