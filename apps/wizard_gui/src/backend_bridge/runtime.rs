//! Backend worker: owns the tokio runtime and the HTTP client, consumes the
//! command queue, and reports back through `UiEvent`s. No failure escapes
//! the loop; every error resolves to an event the controller can show.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use client_core::{
    identity::{
        parse_prompted_identity, resolve_identity, HostEnvironment, IdentityResolution,
        InMemorySessionCache, SessionCache,
    },
    run_cutting_chain, ApiError, WizardApi, GENERIC_DENIAL,
};
use shared::domain::UserId;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

const IDENTITY_UNAVAILABLE: &str =
    "Could not determine your user ID. Reload the app to try again.";
const ACCESS_CONFIRMED: &str = "Access confirmed. Choose a tool to begin.";

pub fn start_backend_bridge(
    server_url: String,
    host: Box<dyn HostEnvironment>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::IdentityUnavailable(format!(
                    "Backend worker failed to start: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let api = WizardApi::new(server_url);
            let mut cache = InMemorySessionCache::default();

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::ResolveIdentity => {
                        match resolve_identity(host.as_ref(), &cache) {
                            IdentityResolution::Resolved(user_id) => {
                                let _ = ui_tx.try_send(UiEvent::IdentityResolved(user_id));
                                run_access_check(&api, user_id, &ui_tx).await;
                            }
                            IdentityResolution::PromptRequired => {
                                let _ = ui_tx.try_send(UiEvent::IdentityPromptRequired);
                            }
                        }
                    }
                    BackendCommand::SubmitIdentity { input } => {
                        match parse_prompted_identity(&input) {
                            Some(user_id) => {
                                cache.store(user_id);
                                let _ = ui_tx.try_send(UiEvent::IdentityResolved(user_id));
                                run_access_check(&api, user_id, &ui_tx).await;
                            }
                            None => {
                                let _ = ui_tx.try_send(UiEvent::IdentityUnavailable(
                                    IDENTITY_UNAVAILABLE.to_string(),
                                ));
                            }
                        }
                    }
                    BackendCommand::RunCuttingChain { user_id, selection } => {
                        tracing::debug!(material = %selection.material, "running cutting chain");
                        match run_cutting_chain(&api, user_id, &selection).await {
                            Ok(outcome) => {
                                let _ = ui_tx.try_send(UiEvent::MaterialAnalyzed(
                                    outcome.material_properties,
                                ));
                                let _ = ui_tx.try_send(UiEvent::ChainCompleted(outcome.result));
                            }
                            Err(err) => {
                                tracing::warn!("cutting chain failed: {}", err.message);
                                if let Some(properties) = err.material_properties {
                                    let _ =
                                        ui_tx.try_send(UiEvent::MaterialAnalyzed(properties));
                                }
                                let _ = ui_tx.try_send(UiEvent::ChainFailed(err.message));
                            }
                        }
                    }
                }
            }
        });
    });
}

async fn run_access_check(api: &WizardApi, user_id: UserId, ui_tx: &Sender<UiEvent>) {
    match api.check_access(user_id).await {
        Ok(()) => {
            let _ = ui_tx.try_send(UiEvent::AccessGranted);
            let _ = ui_tx.try_send(UiEvent::Info(ACCESS_CONFIRMED.to_string()));
            // Best-effort autocomplete catalogue; failures never surface.
            match api.fetch_material_catalogue().await {
                Ok(materials) => {
                    let names = materials.into_iter().map(|m| m.name).collect();
                    let _ = ui_tx.try_send(UiEvent::CatalogueLoaded(names));
                }
                Err(err) => tracing::debug!("material catalogue unavailable: {err}"),
            }
        }
        Err(ApiError::Denied(message)) => {
            let _ = ui_tx.try_send(UiEvent::AccessDenied(message));
        }
        Err(err) => {
            tracing::warn!("access check transport failure: {err}");
            let _ = ui_tx.try_send(UiEvent::AccessDenied(GENERIC_DENIAL.to_string()));
        }
    }
}
