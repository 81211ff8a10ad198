use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	#[serde(default)]
	pub workbench: Workbench,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	/// Base URL of the remote note service, e.g. "http://127.0.0.1:5000/api".
	pub api_base: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
	/// Client-wide request timeout. There is no per-request override.
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
}
impl Service {
	pub fn new(api_base: impl Into<String>) -> Self {
		Self {
			api_base: api_base.into(),
			log_level: default_log_level(),
			timeout_ms: default_timeout_ms(),
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Workbench {
	pub debounce_ms: u64,
	pub min_link_search_chars: usize,
}
impl Default for Workbench {
	fn default() -> Self {
		Self { debounce_ms: 300, min_link_search_chars: 2 }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_timeout_ms() -> u64 {
	10_000
}
