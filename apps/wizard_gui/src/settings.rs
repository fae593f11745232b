use std::fs;

use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
    /// Identifier injected by the embedding host, when configured.
    pub host_user_id: Option<i64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            host_user_id: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server_url: Option<String>,
    host_user_id: Option<i64>,
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("wizard.toml") {
        match toml::from_str::<FileConfig>(&raw) {
            Ok(file_cfg) => apply_file_config(&mut settings, file_cfg),
            Err(err) => tracing::warn!("ignoring malformed wizard.toml: {err}"),
        }
    }

    apply_env_config(
        &mut settings,
        std::env::var("WIZARD_SERVER_URL").ok(),
        std::env::var("WIZARD_HOST_USER_ID").ok(),
    );

    settings
}

fn apply_file_config(settings: &mut Settings, file_cfg: FileConfig) {
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.host_user_id {
        settings.host_user_id = Some(v);
    }
}

fn apply_env_config(
    settings: &mut Settings,
    server_url: Option<String>,
    host_user_id: Option<String>,
) {
    if let Some(v) = server_url {
        settings.server_url = v;
    }
    if let Some(v) = host_user_id {
        match v.parse() {
            Ok(id) => settings.host_user_id = Some(id),
            Err(_) => tracing::warn!("ignoring non-integer WIZARD_HOST_USER_ID"),
        }
    }
}
