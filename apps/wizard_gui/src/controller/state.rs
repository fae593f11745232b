//! Wizard state machine: step transitions, selection state, and the reducer
//! for backend events. Owns all mutable session state; the presentation
//! layer renders from [`WizardSnapshot`] only.

use client_core::CuttingSelection;
use serde_json::Value;
use shared::{
    domain::{ToolMaterial, ToolType, UserId},
    protocol::CalcResponse,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    ToolType,
    Workpiece,
    ToolMaterial,
    Geometry,
    Results,
}

impl WizardStep {
    pub fn index(self) -> u8 {
        match self {
            WizardStep::ToolType => 1,
            WizardStep::Workpiece => 2,
            WizardStep::ToolMaterial => 3,
            WizardStep::Geometry => 4,
            WizardStep::Results => 5,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::ToolType => "Tool type",
            WizardStep::Workpiece => "Workpiece material",
            WizardStep::ToolMaterial => "Tool material",
            WizardStep::Geometry => "Tool geometry",
            WizardStep::Results => "Cutting modes",
        }
    }

    fn back(self) -> Option<WizardStep> {
        match self {
            WizardStep::ToolType => None,
            WizardStep::Workpiece => Some(WizardStep::ToolType),
            WizardStep::ToolMaterial => Some(WizardStep::Workpiece),
            WizardStep::Geometry => Some(WizardStep::ToolMaterial),
            WizardStep::Results => Some(WizardStep::Geometry),
        }
    }
}

/// Accumulated choices and fetched domain data for the session.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    pub user_id: Option<UserId>,
    pub tool_type: Option<ToolType>,
    pub material_name: String,
    pub tool_material: Option<ToolMaterial>,
    pub diameter: Option<f64>,
    pub teeth: Option<u32>,
    pub material_properties: Option<Value>,
}

/// Raw text bound to the step-4 inputs; parsed by the validation gate.
#[derive(Debug, Clone, Default)]
pub struct GeometryInput {
    pub diameter: String,
    pub teeth: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessState {
    ResolvingIdentity,
    PromptIdentity,
    CheckingAccess,
    Granted,
    /// Terminal for the session; only a restart recovers.
    Denied(String),
    /// Identity could not be resolved; terminal for the session.
    Unavailable(String),
}

/// Read-only view the presentation layer renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardSnapshot {
    pub step: WizardStep,
    pub error: Option<String>,
    pub status: Option<String>,
    pub back_enabled: bool,
    pub forward_enabled: bool,
    pub forward_label: &'static str,
    pub reset_enabled: bool,
    pub chain_pending: bool,
}

pub struct WizardController {
    step: WizardStep,
    pub selection: SelectionState,
    pub geometry: GeometryInput,
    access: AccessState,
    error: Option<String>,
    status: Option<String>,
    chain_pending: bool,
    catalogue: Vec<String>,
    results: Option<CalcResponse>,
}

impl WizardController {
    pub fn new() -> Self {
        Self {
            step: WizardStep::ToolType,
            selection: SelectionState::default(),
            geometry: GeometryInput::default(),
            access: AccessState::ResolvingIdentity,
            error: None,
            status: None,
            chain_pending: false,
            catalogue: Vec::new(),
            results: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn access(&self) -> &AccessState {
        &self.access
    }

    pub fn results(&self) -> Option<&CalcResponse> {
        self.results.as_ref()
    }

    /// Catalogue names matching the typed material, for autocomplete.
    pub fn catalogue_suggestions(&self, limit: usize) -> Vec<&str> {
        let needle = self.selection.material_name.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.catalogue
            .iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .map(String::as_str)
            .take(limit)
            .collect()
    }

    fn wizard_unlocked(&self) -> bool {
        self.access == AccessState::Granted
    }

    /// Attempt the forward transition from the current step. Clears the
    /// previous error before re-validating; on the geometry step a valid
    /// input yields the network-chain command instead of an immediate
    /// transition, and the step advances only when the chain completes.
    pub fn advance(&mut self) -> Option<BackendCommand> {
        if !self.wizard_unlocked() || self.chain_pending {
            return None;
        }
        self.error = None;
        self.status = None;

        match self.step {
            WizardStep::ToolType => {
                match validation::check_tool_type(self.selection.tool_type) {
                    Ok(()) => self.step = WizardStep::Workpiece,
                    Err(message) => self.error = Some(message),
                }
                None
            }
            WizardStep::Workpiece => {
                match validation::check_material_name(&self.selection.material_name) {
                    Ok(trimmed) => {
                        self.selection.material_name = trimmed;
                        self.step = WizardStep::ToolMaterial;
                    }
                    Err(message) => self.error = Some(message),
                }
                None
            }
            WizardStep::ToolMaterial => {
                match validation::check_tool_material(self.selection.tool_material) {
                    Ok(()) => self.step = WizardStep::Geometry,
                    Err(message) => self.error = Some(message),
                }
                None
            }
            WizardStep::Geometry => match validation::parse_geometry(&self.geometry) {
                Ok((diameter, teeth)) => {
                    self.selection.diameter = Some(diameter);
                    self.selection.teeth = Some(teeth);
                    let (user_id, tool_type, tool_material) = match (
                        self.selection.user_id,
                        self.selection.tool_type,
                        self.selection.tool_material,
                    ) {
                        (Some(user_id), Some(tool_type), Some(tool_material)) => {
                            (user_id, tool_type, tool_material)
                        }
                        _ => {
                            self.error = Some(validation::MSG_GEOMETRY.to_string());
                            return None;
                        }
                    };
                    self.chain_pending = true;
                    Some(BackendCommand::RunCuttingChain {
                        user_id,
                        selection: CuttingSelection {
                            tool_type,
                            tool_material,
                            diameter,
                            teeth,
                            material: self.selection.material_name.clone(),
                        },
                    })
                }
                Err(message) => {
                    self.error = Some(message);
                    None
                }
            },
            // Terminal step, no forward transition.
            WizardStep::Results => None,
        }
    }

    pub fn retreat(&mut self) {
        if !self.wizard_unlocked() {
            return;
        }
        if let Some(step) = self.step.back() {
            self.step = step;
            self.error = None;
        }
    }

    /// Back to step 1 with every selection cleared. The resolved identity is
    /// kept: it is set once per session and immutable after the access gate.
    pub fn reset(&mut self) {
        if !self.wizard_unlocked() {
            return;
        }
        let user_id = self.selection.user_id;
        self.selection = SelectionState {
            user_id,
            ..SelectionState::default()
        };
        self.geometry = GeometryInput::default();
        self.results = None;
        self.error = None;
        self.status = None;
        self.step = WizardStep::ToolType;
    }

    /// Reducer for backend-worker events.
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::IdentityResolved(user_id) => {
                if self.selection.user_id.is_none() {
                    self.selection.user_id = Some(user_id);
                }
                self.access = AccessState::CheckingAccess;
            }
            UiEvent::IdentityPromptRequired => {
                self.access = AccessState::PromptIdentity;
            }
            UiEvent::IdentityUnavailable(message) => {
                self.error = Some(message.clone());
                self.access = AccessState::Unavailable(message);
            }
            UiEvent::AccessGranted => {
                self.access = AccessState::Granted;
                self.step = WizardStep::ToolType;
            }
            UiEvent::AccessDenied(message) => {
                self.error = Some(message.clone());
                self.access = AccessState::Denied(message);
            }
            UiEvent::CatalogueLoaded(names) => {
                self.catalogue = names;
            }
            UiEvent::MaterialAnalyzed(properties) => {
                self.selection.material_properties = Some(properties);
            }
            UiEvent::ChainCompleted(response) => {
                self.chain_pending = false;
                self.results = Some(response);
                self.step = WizardStep::Results;
            }
            UiEvent::ChainFailed(message) => {
                self.chain_pending = false;
                self.error = Some(message);
            }
            UiEvent::Info(message) => {
                self.status = Some(message);
            }
        }
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        let unlocked = self.wizard_unlocked();
        WizardSnapshot {
            step: self.step,
            error: self.error.clone(),
            status: self.status.clone(),
            back_enabled: unlocked && self.step.back().is_some(),
            forward_enabled: unlocked && self.step != WizardStep::Results && !self.chain_pending,
            forward_label: match self.step {
                WizardStep::Geometry => "Calculate",
                WizardStep::Results => "Done",
                _ => "Next",
            },
            reset_enabled: unlocked,
            chain_pending: self.chain_pending,
        }
    }
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::protocol::{Calculation, Recommendations};

    fn granted_controller() -> WizardController {
        let mut controller = WizardController::new();
        controller.apply(UiEvent::IdentityResolved(UserId(7)));
        controller.apply(UiEvent::AccessGranted);
        controller
    }

    fn sample_response() -> CalcResponse {
        CalcResponse {
            calculation: Calculation {
                vc: 120.0,
                n: 3820.0,
                fz: 0.05,
                feed: 764.0,
                ap: 2.0,
                ae: 5.0,
            },
            recommendations: Recommendations {
                risks: vec!["overheating".to_string()],
                notes: vec!["reduce feed".to_string()],
                coolant: "flood".to_string(),
                temperature_risk: "medium".to_string(),
                work_hardening: "low".to_string(),
            },
        }
    }

    fn walk_to_geometry(controller: &mut WizardController) {
        controller.selection.tool_type = Some(ToolType::Endmill);
        assert!(controller.advance().is_none());
        controller.selection.material_name = " Steel 1045 ".to_string();
        assert!(controller.advance().is_none());
        controller.selection.tool_material = Some(ToolMaterial::Carbide);
        assert!(controller.advance().is_none());
        assert_eq!(controller.step(), WizardStep::Geometry);
    }

    #[test]
    fn advance_is_blocked_without_required_selection_per_step() {
        let mut controller = granted_controller();

        assert!(controller.advance().is_none());
        assert_eq!(controller.step(), WizardStep::ToolType);
        assert_eq!(
            controller.snapshot().error.as_deref(),
            Some(validation::MSG_TOOL_TYPE)
        );

        controller.selection.tool_type = Some(ToolType::Drill);
        controller.advance();
        controller.selection.material_name = "   ".to_string();
        assert!(controller.advance().is_none());
        assert_eq!(controller.step(), WizardStep::Workpiece);
        assert_eq!(
            controller.snapshot().error.as_deref(),
            Some(validation::MSG_MATERIAL_NAME)
        );

        controller.selection.material_name = "Steel".to_string();
        controller.advance();
        assert!(controller.advance().is_none());
        assert_eq!(controller.step(), WizardStep::ToolMaterial);
        assert_eq!(
            controller.snapshot().error.as_deref(),
            Some(validation::MSG_TOOL_MATERIAL)
        );
    }

    #[test]
    fn geometry_step_issues_no_command_on_invalid_input() {
        let mut controller = granted_controller();
        walk_to_geometry(&mut controller);

        for (diameter, teeth) in [("0", "4"), ("-5", "4"), ("abc", "4"), ("10", "0"), ("10", "3.5")]
        {
            controller.geometry.diameter = diameter.to_string();
            controller.geometry.teeth = teeth.to_string();
            assert!(controller.advance().is_none(), "{diameter}/{teeth}");
            assert_eq!(controller.step(), WizardStep::Geometry);
            assert!(controller.snapshot().error.is_some());
        }
    }

    #[test]
    fn geometry_step_emits_chain_command_with_trimmed_material() {
        let mut controller = granted_controller();
        walk_to_geometry(&mut controller);
        controller.geometry.diameter = "10".to_string();
        controller.geometry.teeth = "4".to_string();

        let command = controller.advance().expect("chain command");
        match command {
            BackendCommand::RunCuttingChain { user_id, selection } => {
                assert_eq!(user_id, UserId(7));
                assert_eq!(selection.material, "Steel 1045");
                assert_eq!(selection.tool_type, ToolType::Endmill);
                assert_eq!(selection.diameter, 10.0);
                assert_eq!(selection.teeth, 4);
            }
            _ => panic!("unexpected command"),
        }

        // Step does not advance until the chain completes, and the forward
        // action is disabled while it is pending.
        assert_eq!(controller.step(), WizardStep::Geometry);
        let snapshot = controller.snapshot();
        assert!(snapshot.chain_pending);
        assert!(!snapshot.forward_enabled);
        assert!(controller.advance().is_none());
    }

    #[test]
    fn completed_chain_enters_terminal_results_step() {
        let mut controller = granted_controller();
        walk_to_geometry(&mut controller);
        controller.geometry.diameter = "10".to_string();
        controller.geometry.teeth = "4".to_string();
        controller.advance().expect("chain command");

        controller.apply(UiEvent::MaterialAnalyzed(json!({"hardness": "190 HB"})));
        controller.apply(UiEvent::ChainCompleted(sample_response()));

        assert_eq!(controller.step(), WizardStep::Results);
        let snapshot = controller.snapshot();
        assert!(!snapshot.forward_enabled);
        assert_eq!(snapshot.forward_label, "Done");
        assert!(snapshot.back_enabled);

        assert!(controller.advance().is_none());
        assert_eq!(controller.step(), WizardStep::Results);

        // Back out of the terminal step re-enables the forward action.
        controller.retreat();
        assert_eq!(controller.step(), WizardStep::Geometry);
        assert!(controller.snapshot().forward_enabled);
    }

    #[test]
    fn failed_chain_stays_on_geometry_and_keeps_analyzed_properties() {
        let mut controller = granted_controller();
        walk_to_geometry(&mut controller);
        controller.geometry.diameter = "10".to_string();
        controller.geometry.teeth = "4".to_string();
        controller.advance().expect("chain command");

        controller.apply(UiEvent::MaterialAnalyzed(json!({"hardness": "190 HB"})));
        controller.apply(UiEvent::ChainFailed("invalid diameter".to_string()));

        assert_eq!(controller.step(), WizardStep::Geometry);
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.error.as_deref(), Some("invalid diameter"));
        assert!(snapshot.forward_enabled, "retry must be possible");
        assert_eq!(
            controller.selection.material_properties,
            Some(json!({"hardness": "190 HB"}))
        );
    }

    #[test]
    fn reset_returns_to_step_one_and_clears_selections() {
        let mut controller = granted_controller();
        walk_to_geometry(&mut controller);
        controller.geometry.diameter = "10".to_string();
        controller.geometry.teeth = "4".to_string();
        controller.advance().expect("chain command");
        controller.apply(UiEvent::MaterialAnalyzed(json!({"hardness": "190 HB"})));
        controller.apply(UiEvent::ChainCompleted(sample_response()));

        controller.reset();

        assert_eq!(controller.step(), WizardStep::ToolType);
        assert!(controller.selection.tool_type.is_none());
        assert!(controller.selection.material_name.is_empty());
        assert!(controller.selection.tool_material.is_none());
        assert!(controller.selection.diameter.is_none());
        assert!(controller.selection.teeth.is_none());
        assert!(controller.selection.material_properties.is_none());
        assert!(controller.results().is_none());
        // Session identity survives a reset.
        assert_eq!(controller.selection.user_id, Some(UserId(7)));
    }

    #[test]
    fn denied_access_disables_every_action_permanently() {
        let mut controller = WizardController::new();
        controller.apply(UiEvent::IdentityResolved(UserId(7)));
        controller.apply(UiEvent::AccessDenied("User 7 is not authorised".to_string()));

        let snapshot = controller.snapshot();
        assert!(!snapshot.forward_enabled);
        assert!(!snapshot.back_enabled);
        assert!(!snapshot.reset_enabled);
        assert_eq!(snapshot.error.as_deref(), Some("User 7 is not authorised"));

        controller.selection.tool_type = Some(ToolType::Drill);
        assert!(controller.advance().is_none());
        assert_eq!(controller.step(), WizardStep::ToolType);
        controller.retreat();
        controller.reset();
        assert_eq!(controller.step(), WizardStep::ToolType);
        assert!(matches!(controller.access(), AccessState::Denied(_)));
    }

    #[test]
    fn unresolved_identity_locks_the_wizard() {
        let mut controller = WizardController::new();
        controller.apply(UiEvent::IdentityUnavailable(
            "Could not determine your user ID.".to_string(),
        ));

        let snapshot = controller.snapshot();
        assert!(!snapshot.forward_enabled);
        assert!(!snapshot.reset_enabled);
        assert!(controller.advance().is_none());
    }

    #[test]
    fn identity_is_set_once_and_immutable_afterwards() {
        let mut controller = granted_controller();
        controller.apply(UiEvent::IdentityResolved(UserId(999)));
        assert_eq!(controller.selection.user_id, Some(UserId(7)));
    }

    #[test]
    fn forward_attempt_clears_previous_error() {
        let mut controller = granted_controller();
        assert!(controller.advance().is_none());
        assert!(controller.snapshot().error.is_some());

        controller.selection.tool_type = Some(ToolType::Mill);
        controller.advance();
        assert!(controller.snapshot().error.is_none());
        assert_eq!(controller.step(), WizardStep::Workpiece);
    }

    #[test]
    fn info_event_sets_status_until_next_forward_attempt() {
        let mut controller = granted_controller();
        controller.apply(UiEvent::Info("Access confirmed.".to_string()));
        assert_eq!(
            controller.snapshot().status.as_deref(),
            Some("Access confirmed.")
        );

        controller.selection.tool_type = Some(ToolType::Drill);
        controller.advance();
        assert!(controller.snapshot().status.is_none());
    }

    #[test]
    fn catalogue_suggestions_filter_case_insensitively() {
        let mut controller = granted_controller();
        controller.apply(UiEvent::CatalogueLoaded(vec![
            "Steel 1045".to_string(),
            "Stainless 304".to_string(),
            "Aluminium 6061".to_string(),
        ]));

        controller.selection.material_name = "steel".to_string();
        assert_eq!(controller.catalogue_suggestions(6), vec!["Steel 1045"]);

        controller.selection.material_name = "  ".to_string();
        assert!(controller.catalogue_suggestions(6).is_empty());
    }
}
