mod backend_bridge;
mod controller;
mod settings;
mod ui;

use clap::Parser;
use client_core::identity::{ConfiguredHost, HostEnvironment, NoHostEnvironment};
use crossbeam_channel::bounded;
use shared::domain::UserId;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::app::WizardApp;

/// Guided CNC cutting-mode wizard backed by a remote calculation service.
#[derive(Parser, Debug)]
#[command(name = "wizard_gui")]
struct Args {
    /// Backend base URL; overrides wizard.toml and WIZARD_SERVER_URL.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let mut settings = settings::load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    tracing::info!(server_url = %settings.server_url, "starting wizard");

    let host: Box<dyn HostEnvironment> = match settings.host_user_id {
        Some(id) => Box::new(ConfiguredHost::new(UserId(id))),
        None => Box::new(NoHostEnvironment),
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::start_backend_bridge(settings.server_url, host, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("CNC Cutting Mode Wizard")
            .with_inner_size([540.0, 680.0])
            .with_min_inner_size([420.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "CNC Cutting Mode Wizard",
        options,
        Box::new(|_cc| Ok(Box::new(WizardApp::new(cmd_tx, ui_rx)))),
    )
}
