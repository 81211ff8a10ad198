use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use zettel_config::{Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let table = root
		.as_table_mut()
		.expect("Template config must be a table.")
		.get_mut(section)
		.and_then(Value::as_table_mut)
		.expect("Template config must include the requested section.");

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("zettel_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse test config.")
}

#[test]
fn template_config_is_valid() {
	assert!(zettel_config::validate(&base_config()).is_ok());
}

#[test]
fn workbench_section_defaults_when_missing() {
	let cfg: Config = toml::from_str("[service]\napi_base = \"http://127.0.0.1:5000/api\"\n")
		.expect("Failed to parse minimal config.");

	assert_eq!(cfg.workbench.debounce_ms, 300);
	assert_eq!(cfg.workbench.min_link_search_chars, 2);
	assert_eq!(cfg.service.log_level, "info");
	assert_eq!(cfg.service.timeout_ms, 10_000);
}

#[test]
fn api_base_must_use_http_scheme() {
	let payload =
		sample_toml_with("service", "api_base", Value::String("ftp://notes.example".to_string()));
	let path = write_temp_config(payload);
	let result = zettel_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected api_base validation error.");

	assert!(
		err.to_string().contains("service.api_base must start with http:// or https://."),
		"Unexpected error: {err}"
	);
}

#[test]
fn debounce_must_be_positive() {
	let mut cfg = base_config();

	cfg.workbench.debounce_ms = 0;

	let err = zettel_config::validate(&cfg).expect_err("Expected debounce validation error.");

	assert!(
		err.to_string().contains("workbench.debounce_ms must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn timeout_must_be_positive() {
	let mut cfg = base_config();

	cfg.service.timeout_ms = 0;

	let err = zettel_config::validate(&cfg).expect_err("Expected timeout validation error.");

	assert!(
		err.to_string().contains("service.timeout_ms must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn load_trims_trailing_slash_from_api_base() {
	if env::var(zettel_config::API_BASE_ENV).is_ok() {
		eprintln!("Skipping load_trims_trailing_slash_from_api_base; environment override is set.");

		return;
	}

	let payload = sample_toml_with(
		"service",
		"api_base",
		Value::String("http://127.0.0.1:5000/api/".to_string()),
	);
	let path = write_temp_config(payload);
	let result = zettel_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Expected config to load.");

	assert_eq!(cfg.service.api_base, "http://127.0.0.1:5000/api");
}

#[test]
fn missing_file_reports_read_error() {
	let path = env::temp_dir().join("zettel_config_test_missing_file.toml");
	let err = zettel_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error: {err}");
}

#[test]
fn malformed_file_reports_parse_error() {
	let path = write_temp_config("[service\napi_base = ".to_string());
	let result = zettel_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }), "Unexpected error: {err}");
}
