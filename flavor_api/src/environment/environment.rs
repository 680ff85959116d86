use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlavorError;

/// A named deployment target ("flavor") of the client application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Fixed configuration values of one [`Environment`].
///
/// `base_url` always ends with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentSettings {
    pub base_url: &'static str,
    pub display_name: &'static str,
    pub logging_enabled: bool,
    pub debug_mode: bool,
}

/* ───────────────────────────── Settings table ───────────────────────────── */

const DEVELOPMENT: EnvironmentSettings = EnvironmentSettings {
    base_url: "https://dev.api.example.com/api/",
    display_name: "Development",
    logging_enabled: true,
    debug_mode: true,
};

const STAGING: EnvironmentSettings = EnvironmentSettings {
    base_url: "https://staging.api.example.com/api/",
    display_name: "Staging",
    logging_enabled: true,
    debug_mode: false,
};

const PRODUCTION: EnvironmentSettings = EnvironmentSettings {
    base_url: "https://api.example.com/api/",
    display_name: "Production",
    logging_enabled: false,
    debug_mode: false,
};

impl Environment {
    pub const ALL: [Environment; 3] = [
        Environment::Development,
        Environment::Staging,
        Environment::Production,
    ];

    /// The settings record for this environment.
    pub const fn settings(self) -> &'static EnvironmentSettings {
        match self {
            Environment::Development => &DEVELOPMENT,
            Environment::Staging => &STAGING,
            Environment::Production => &PRODUCTION,
        }
    }

    /// Short name used on the command line and in `APP_ENV`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "dev",
            Environment::Staging => "staging",
            Environment::Production => "prod",
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = FlavorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "staging" | "stage" | "stg" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Production),
            other => Err(FlavorError::invalid(format!(
                "unknown environment `{other}` (expected dev, staging or prod)"
            ))),
        }
    }
}
