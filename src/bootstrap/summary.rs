//! Connection summary printed after a successful bootstrap.

use std::collections::HashMap;
use std::path::Path;

use crate::config::{default_value, BootstrapSettings};
use crate::ui::UserInterface;

use super::compose::ComposeCli;

/// Jaeger UI address published by the compose file.
pub const JAEGER_UI: &str = "http://localhost:16686";

/// Prometheus address published by the compose file.
pub const PROMETHEUS_UI: &str = "http://localhost:9090";

/// Service endpoints and follow-up commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// `(service, address)` pairs.
    pub endpoints: Vec<(String, String)>,
    /// Commands to run next.
    pub next_steps: Vec<String>,
}

impl Summary {
    /// Build the summary from the materialized environment.
    ///
    /// Keys missing from `vars` fall back to the built-in defaults.
    pub fn from_env(
        vars: &HashMap<String, String>,
        settings: &BootstrapSettings,
        activate_hint: &str,
    ) -> Self {
        let get = |key: &str| -> String {
            vars.get(key)
                .cloned()
                .or_else(|| default_value(key).map(str::to_string))
                .unwrap_or_default()
        };

        let app_port = get("APP_PORT");
        let endpoints = vec![
            ("App".to_string(), format!("http://localhost:{}", app_port)),
            (
                "Postgres".to_string(),
                format!(
                    "postgresql://{}@{}:{}/{}",
                    get("POSTGRES_USER"),
                    get("POSTGRES_HOST"),
                    get("POSTGRES_PORT"),
                    get("POSTGRES_DB")
                ),
            ),
            (
                "Redis".to_string(),
                format!("redis://{}:{}", get("REDIS_HOST"), get("REDIS_PORT")),
            ),
            ("Jaeger UI".to_string(), JAEGER_UI.to_string()),
            ("Prometheus".to_string(), PROMETHEUS_UI.to_string()),
            ("OTLP endpoint".to_string(), get("OTEL_EXPORTER_OTLP_ENDPOINT")),
        ];

        let compose_file = settings.compose_file.as_deref();
        let engine = settings.container_engine.as_str();
        let next_steps = vec![
            activate_hint.to_string(),
            format!("uvicorn app.main:app --reload --port {}", app_port),
            ComposeCli::user_command(engine, compose_file, "logs -f"),
            ComposeCli::user_command(engine, compose_file, "down"),
        ];

        Self {
            endpoints,
            next_steps,
        }
    }

    /// Print the summary.
    pub fn render(&self, ui: &mut dyn UserInterface) {
        let width = self
            .endpoints
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0);

        ui.message("");
        ui.message("Services:");
        for (name, address) in &self.endpoints {
            ui.message(&format!("  {:<width$}  {}", name, address, width = width));
        }

        ui.message("");
        ui.message("Next steps:");
        for step in &self.next_steps {
            ui.message(&format!("  {}", step));
        }
    }
}

/// Relative display of `path` under `root`.
pub fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
