use std::path::PathBuf;

use axum::http::HeaderName;

use crate::authz::{AuthzMode, RoleRegistry};
use crate::errors::AppError;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_IDENTITY_HEADER: &str = "x-eureka-role";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub authz_mode: AuthzMode,
    /// JSON policy document; the built-in table is used when unset.
    pub policy_file: Option<PathBuf>,
    /// Header carrying the raw role string set by the upstream auth layer.
    pub identity_header: HeaderName,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            authz_mode: AuthzMode::Off,
            policy_file: None,
            identity_header: HeaderName::from_static(DEFAULT_IDENTITY_HEADER),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let port = std::env::var("APP_PORT")
            .map(|val| val.parse::<u16>())
            .unwrap_or(Ok(DEFAULT_PORT))
            .map_err(|_| AppError::configuration("APP_PORT must be a valid port number"))?;

        let authz_mode = std::env::var("AUTHZ_MODE")
            .unwrap_or_default()
            .parse::<AuthzMode>()
            .map_err(AppError::configuration)?;

        let policy_file = std::env::var("POLICY_FILE")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let identity_header = match std::env::var("IDENTITY_HEADER") {
            Ok(name) => HeaderName::from_bytes(name.trim().to_ascii_lowercase().as_bytes())
                .map_err(|_| AppError::configuration(format!("IDENTITY_HEADER '{name}' is not a valid header name")))?,
            Err(_) => HeaderName::from_static(DEFAULT_IDENTITY_HEADER),
        };

        Ok(Self {
            port,
            authz_mode,
            policy_file,
            identity_header,
        })
    }

    pub fn with_authz_mode(mut self, mode: AuthzMode) -> Self {
        self.authz_mode = mode;
        self
    }

    pub fn with_policy_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.policy_file = Some(path.into());
        self
    }

    /// Registry named by the config: the policy file when set, else the built-in table.
    pub fn load_registry(&self) -> Result<RoleRegistry, AppError> {
        match &self.policy_file {
            Some(path) => {
                let registry = RoleRegistry::from_policy_file(path)?;
                tracing::info!(path = %path.display(), "loaded role policy file");
                Ok(registry)
            }
            None => Ok(RoleRegistry::builtin()),
        }
    }
}
