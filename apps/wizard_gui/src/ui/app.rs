//! egui surface for the wizard. Renders from controller snapshots and feeds
//! user actions back through the controller and the backend command queue.

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use shared::domain::{ToolMaterial, ToolType};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::state::{AccessState, WizardController, WizardStep};
use crate::ui::results::build_results_view;

const SUGGESTION_LIMIT: usize = 6;

pub struct WizardApp {
    controller: WizardController,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    identity_input: String,
    bridge_status: String,
    identity_requested: bool,
}

impl WizardApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            controller: WizardController::new(),
            cmd_tx,
            ui_rx,
            identity_input: String::new(),
            bridge_status: String::new(),
            identity_requested: false,
        }
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.bridge_status);
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.controller.apply(event);
        }
    }

    fn show_messages(&self, ui: &mut egui::Ui) {
        let snapshot = self.controller.snapshot();
        if let Some(error) = &snapshot.error {
            ui.colored_label(egui::Color32::LIGHT_RED, error);
        } else if let Some(status) = &snapshot.status {
            ui.colored_label(egui::Color32::LIGHT_GREEN, status);
        }
        if !self.bridge_status.is_empty() {
            ui.colored_label(egui::Color32::YELLOW, &self.bridge_status);
        }
    }

    fn show_identity_prompt(&mut self, ui: &mut egui::Ui) {
        ui.heading("Who is cutting today?");
        ui.label("No messaging-client identity was found. Enter a demo user ID:");
        ui.text_edit_singleline(&mut self.identity_input);
        if ui.button("Continue").clicked() {
            let input = self.identity_input.clone();
            self.dispatch(BackendCommand::SubmitIdentity { input });
        }
    }

    fn show_step(&mut self, ui: &mut egui::Ui) {
        let step = self.controller.step();
        ui.heading(format!("Step {} of 5: {}", step.index(), step.title()));
        ui.separator();

        match step {
            WizardStep::ToolType => {
                for tool_type in ToolType::ALL {
                    ui.radio_value(
                        &mut self.controller.selection.tool_type,
                        Some(tool_type),
                        tool_type.label(),
                    );
                }
            }
            WizardStep::Workpiece => {
                ui.label("Workpiece material (free text):");
                ui.text_edit_singleline(&mut self.controller.selection.material_name);
                let suggestions: Vec<String> = self
                    .controller
                    .catalogue_suggestions(SUGGESTION_LIMIT)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                for suggestion in suggestions {
                    if ui.small_button(&suggestion).clicked() {
                        self.controller.selection.material_name = suggestion;
                    }
                }
            }
            WizardStep::ToolMaterial => {
                for tool_material in ToolMaterial::ALL {
                    ui.radio_value(
                        &mut self.controller.selection.tool_material,
                        Some(tool_material),
                        tool_material.label(),
                    );
                }
            }
            WizardStep::Geometry => {
                egui::Grid::new("geometry_inputs").show(ui, |ui| {
                    ui.label("Tool diameter, mm:");
                    ui.text_edit_singleline(&mut self.controller.geometry.diameter);
                    ui.end_row();
                    ui.label("Number of teeth:");
                    ui.text_edit_singleline(&mut self.controller.geometry.teeth);
                    ui.end_row();
                });
                if self.controller.snapshot().chain_pending {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Analyzing material and calculating cutting modes...");
                    });
                }
            }
            WizardStep::Results => self.show_results(ui),
        }
    }

    fn show_results(&self, ui: &mut egui::Ui) {
        let Some(response) = self.controller.results() else {
            ui.label("No calculation available.");
            return;
        };
        let view = build_results_view(response);

        egui::Grid::new("calc_parameters").striped(true).show(ui, |ui| {
            for (label, value) in &view.parameters {
                ui.label(*label);
                ui.label(value);
                ui.end_row();
            }
        });

        ui.separator();
        ui.label("Risks:");
        for risk in &view.risks {
            ui.label(format!("  - {risk}"));
        }
        ui.label("Recommendations:");
        for note in &view.notes {
            ui.label(format!("  - {note}"));
        }
        ui.separator();
        egui::Grid::new("advisories").show(ui, |ui| {
            ui.label("Coolant:");
            ui.label(&view.coolant);
            ui.end_row();
            ui.label("Temperature risk:");
            ui.label(&view.temperature_risk);
            ui.end_row();
            ui.label("Work hardening:");
            ui.label(&view.work_hardening);
            ui.end_row();
        });
    }

    fn show_nav(&mut self, ui: &mut egui::Ui) {
        let snapshot = self.controller.snapshot();
        ui.horizontal(|ui| {
            if ui
                .add_enabled(snapshot.back_enabled, egui::Button::new("Back"))
                .clicked()
            {
                self.controller.retreat();
            }
            if ui
                .add_enabled(
                    snapshot.forward_enabled,
                    egui::Button::new(snapshot.forward_label),
                )
                .clicked()
            {
                if let Some(cmd) = self.controller.advance() {
                    self.dispatch(cmd);
                }
            }
            if ui
                .add_enabled(snapshot.reset_enabled, egui::Button::new("Start over"))
                .clicked()
            {
                self.controller.reset();
            }
        });
    }
}

impl eframe::App for WizardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.identity_requested {
            self.identity_requested = true;
            self.dispatch(BackendCommand::ResolveIdentity);
        }
        self.drain_events();

        egui::TopBottomPanel::bottom("wizard_nav").show(ctx, |ui| {
            if matches!(self.controller.access(), AccessState::Granted) {
                self.show_nav(ui);
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_messages(ui);
            ui.add_space(8.0);
            match self.controller.access().clone() {
                AccessState::ResolvingIdentity | AccessState::CheckingAccess => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Checking access...");
                    });
                }
                AccessState::PromptIdentity => self.show_identity_prompt(ui),
                AccessState::Granted => self.show_step(ui),
                // Terminal states render their message only.
                AccessState::Denied(_) | AccessState::Unavailable(_) => {}
            }
        });

        // Worker events arrive off-frame; keep polling at a modest cadence.
        ctx.request_repaint_after(Duration::from_millis(120));
    }
}
