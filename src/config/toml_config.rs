use crate::adapters::soap::{Credentials, DEFAULT_NAMESPACE};
use crate::utils::error::{ReportingError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportingConfig {
    pub connection: ConnectionConfig,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// 例如 https://cw.example.com/v4_6_release/apis/2.0
    pub base_url: String,
    pub company_id: String,
    pub integrator_login_id: String,
    pub integrator_password: String,
    pub namespace: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("base_url", &self.base_url)
            .field("company_id", &self.company_id)
            .field("integrator_login_id", &self.integrator_login_id)
            .field("integrator_password", &"***")
            .field("namespace", &self.namespace)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl ConnectionConfig {
    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            company_id: self.company_id.clone(),
            integrator_login_id: self.integrator_login_id.clone(),
            integrator_password: self.integrator_password.clone(),
        }
    }
}

impl ReportingConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReportingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReportingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CW_PASSWORD})，未定義的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReportingError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for ReportingConfig {
    fn validate(&self) -> Result<()> {
        let connection = &self.connection;

        validation::validate_url("connection.base_url", &connection.base_url)?;
        validation::validate_non_empty_string("connection.company_id", &connection.company_id)?;
        validation::validate_non_empty_string(
            "connection.integrator_login_id",
            &connection.integrator_login_id,
        )?;
        validation::validate_non_empty_string(
            "connection.integrator_password",
            &connection.integrator_password,
        )?;

        if let Some(namespace) = &connection.namespace {
            validation::validate_url("connection.namespace", namespace)?;
        }

        validation::validate_range(
            "connection.timeout_seconds",
            connection.timeout_seconds(),
            1,
            600,
        )
    }
}
