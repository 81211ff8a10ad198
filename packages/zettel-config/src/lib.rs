mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Service, Workbench};

use std::{env, fs, path::Path};

pub const API_BASE_ENV: &str = "ZETTEL_API_BASE_URL";

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	apply_env_override(&mut cfg, env::var(API_BASE_ENV).ok());
	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

/// Builds a config from the environment alone, for runs without a config file.
pub fn from_env() -> Result<Config> {
	let api_base = env::var(API_BASE_ENV).unwrap_or_default();
	let mut cfg = Config { service: Service::new(api_base), workbench: Workbench::default() };

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	let api_base = cfg.service.api_base.as_str();

	if api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: format!("service.api_base must be non-empty (or set {API_BASE_ENV})."),
		});
	}
	if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
		return Err(Error::Validation {
			message: "service.api_base must start with http:// or https://.".to_string(),
		});
	}
	if cfg.service.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "service.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.workbench.debounce_ms == 0 {
		return Err(Error::Validation {
			message: "workbench.debounce_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn apply_env_override(cfg: &mut Config, value: Option<String>) {
	if let Some(api_base) = value
		&& !api_base.trim().is_empty()
	{
		tracing::debug!(env = API_BASE_ENV, "Overriding service.api_base from environment.");

		cfg.service.api_base = api_base;
	}
}

fn normalize(cfg: &mut Config) {
	let trimmed = cfg.service.api_base.trim().trim_end_matches('/');

	cfg.service.api_base = trimmed.to_string();

	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
