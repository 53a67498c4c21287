//! Default `.env` contents.
//!
//! Written only when neither the environment file nor its template exists.

/// A group of related entries rendered under one comment header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvSection {
    /// Comment header for the group.
    pub title: &'static str,
    /// `(key, value)` pairs in write order.
    pub entries: &'static [(&'static str, &'static str)],
}

/// Default application, datastore, cache and telemetry settings.
pub const DEFAULT_SECTIONS: &[EnvSection] = &[
    EnvSection {
        title: "App",
        entries: &[("APP_PORT", "8000"), ("LOG_LEVEL", "info")],
    },
    EnvSection {
        title: "Postgres",
        entries: &[
            ("POSTGRES_USER", "postgres"),
            ("POSTGRES_PASSWORD", "postgres"),
            ("POSTGRES_DB", "agent_factory"),
            ("POSTGRES_HOST", "localhost"),
            ("POSTGRES_PORT", "5432"),
        ],
    },
    EnvSection {
        title: "Redis",
        entries: &[("REDIS_HOST", "localhost"), ("REDIS_PORT", "6379")],
    },
    EnvSection {
        title: "OpenTelemetry",
        entries: &[
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4318"),
            ("OTEL_SERVICE_NAME", "agent-factory"),
        ],
    },
];

/// All default entries, flattened in write order.
pub fn default_entries() -> Vec<(&'static str, &'static str)> {
    DEFAULT_SECTIONS
        .iter()
        .flat_map(|section| section.entries.iter().copied())
        .collect()
}

/// Look up the default value for a key.
pub fn default_value(key: &str) -> Option<&'static str> {
    DEFAULT_SECTIONS
        .iter()
        .flat_map(|section| section.entries.iter())
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// Render the default sections as `.env` text.
///
/// The `entries` argument is accepted so callers can render any flat list;
/// entries that belong to a default section keep its header.
pub fn render_env_file(entries: &[(&str, &str)]) -> String {
    let mut out = String::new();
    let mut current: Option<&str> = None;

    for (key, value) in entries {
        let section = DEFAULT_SECTIONS
            .iter()
            .find(|s| s.entries.iter().any(|(k, _)| k == key))
            .map(|s| s.title);

        if section.is_some() && section != current {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("# {}\n", section.unwrap_or_default()));
            current = section;
        }
        out.push_str(&format!("{}={}\n", key, value));
    }

    out
}
