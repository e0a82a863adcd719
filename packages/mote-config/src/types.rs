use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub vault: Vault,
	#[serde(default)]
	pub window: Window,
	pub summarizer: Summarizer,
	pub email: Email,
	#[serde(default)]
	pub retry: Retry,
	#[serde(default)]
	pub report: Report,
	#[serde(default)]
	pub logging: Logging,
}

#[derive(Debug, Deserialize)]
pub struct Vault {
	pub root: PathBuf,
	pub target_tag: String,
	#[serde(default = "default_extension")]
	pub extension: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Window {
	pub days: u32,
	pub start_time: String,
	pub end_time: String,
	/// Offset the window is anchored to, e.g. "+09:00". Process-local when
	/// absent.
	pub utc_offset: Option<String>,
}
impl Default for Window {
	fn default() -> Self {
		Self {
			days: 1,
			start_time: "00:00".to_string(),
			end_time: "23:59".to_string(),
			utc_offset: None,
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct Summarizer {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub max_input_tokens: u32,
	pub max_output_tokens: u32,
	#[serde(default)]
	pub additional_prompt: Option<String>,
	pub timeout_ms: u64,
	#[serde(default)]
	pub skip_summary: bool,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Email {
	#[serde(default = "default_email_enabled")]
	pub enabled: bool,
	pub from: String,
	pub to: Vec<String>,
	pub smtp_host: String,
	pub smtp_port: u16,
	pub password: String,
	#[serde(default)]
	pub notify_when_empty: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Retry {
	pub max_attempts: u32,
	pub base_delay_ms: u64,
}
impl Default for Retry {
	fn default() -> Self {
		Self { max_attempts: 3, base_delay_ms: 500 }
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Report {
	/// Digests that could not be mailed are written here for manual recovery.
	pub failure_spool_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Logging {
	pub level: String,
}
impl Default for Logging {
	fn default() -> Self {
		Self { level: "info".to_string() }
	}
}

fn default_extension() -> String {
	"md".to_string()
}

fn default_email_enabled() -> bool {
	true
}
