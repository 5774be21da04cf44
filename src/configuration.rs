use reqwest::StatusCode;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::path::Path;
use std::time::Duration;

use crate::check::{RequestDescriptor, StatusCheck};
use crate::errors::CheckError;

// which yaml file gets layered on top of base.yaml, picked by APP_ENVIRONMENT
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. \
                Use either `local` or `production`."
            )),
        }
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    #[serde(default)]
    pub check: CheckSettings,
}

// where the application under test is listening
#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub base_url: String,
}

// what to ask the application and what to expect back.
// every field has a default so the whole section can be left out of the yaml
#[derive(serde::Deserialize, Clone)]
pub struct CheckSettings {
    #[serde(default = "default_path")]
    pub path: String,
    // env vars always arrive as strings, hence deserialize_number_from_string
    #[serde(
        default = "default_expected_status",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub expected_status: u16,
    #[serde(
        default = "default_timeout_milliseconds",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub timeout_milliseconds: u64,
}

fn default_path() -> String {
    "/".to_string()
}

const fn default_expected_status() -> u16 {
    200
}

// keep the yaml default and the check's own default on the same constant
const fn default_timeout_milliseconds() -> u64 {
    StatusCheck::DEFAULT_TIMEOUT_MILLISECONDS
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            path: default_path(),
            expected_status: default_expected_status(),
            timeout_milliseconds: default_timeout_milliseconds(),
        }
    }
}

impl CheckSettings {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn status_check(&self) -> Result<StatusCheck, CheckError> {
        let request = RequestDescriptor::get(self.path.clone())?;
        let expected = StatusCode::from_u16(self.expected_status).map_err(|e| {
            CheckError::InvalidRequest(format!(
                "expected status {}: {e}",
                self.expected_status
            ))
        })?;
        Ok(StatusCheck::new(request, expected).with_timeout(self.timeout()))
    }
}

#[allow(clippy::missing_errors_doc)]
/// # Panics
/// if the working directory can't be read or `APP_ENVIRONMENT` is unknown
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");

    // detect environment
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT");

    get_configuration_from(&base_path.join("configuration"), &environment)
}

#[allow(clippy::missing_errors_doc)]
pub fn get_configuration_from(
    configuration_directory: &Path,
    environment: &Environment,
) -> Result<Settings, config::ConfigError> {
    let environment_filename = format!("{}.yaml", environment.as_str());
    // later sources win: base.yaml, then the environment file, then APP_* variables
    // (APP_CHECK__TIMEOUT_MILLISECONDS=500 sets check.timeout_milliseconds)
    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        // an environment without overrides doesn't need its own file
        .add_source(
            config::File::from(configuration_directory.join(environment_filename))
                .required(false),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
