mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Email, Logging, Report, Retry, Summarizer, Vault, Window};

use std::{fs, path::Path, sync::LazyLock};

use regex::Regex;
use time::{Time, UtcOffset, macros::format_description};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
		.expect("Email pattern must compile.")
});

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.vault.root.as_os_str().is_empty() {
		return Err(Error::Validation { message: "vault.root must be non-empty.".to_string() });
	}
	if cfg.vault.target_tag.trim().is_empty() {
		return Err(Error::Validation {
			message: "vault.target_tag must be non-empty.".to_string(),
		});
	}
	if cfg.vault.extension.trim().is_empty() {
		return Err(Error::Validation { message: "vault.extension must be non-empty.".to_string() });
	}
	if cfg.window.days == 0 {
		return Err(Error::Validation { message: "window.days must be at least 1.".to_string() });
	}
	if cfg.window.days > 3_650 {
		return Err(Error::Validation { message: "window.days must be 3,650 or less.".to_string() });
	}

	let start = parse_time_of_day(&cfg.window.start_time, "window.start_time")?;
	let end = parse_time_of_day(&cfg.window.end_time, "window.end_time")?;

	if start > end {
		return Err(Error::Validation {
			message: "window.start_time must not be after window.end_time.".to_string(),
		});
	}
	if let Some(raw) = cfg.window.utc_offset.as_deref() {
		parse_utc_offset(raw)?;
	}

	for (label, value) in [
		("summarizer.api_base", &cfg.summarizer.api_base),
		("summarizer.api_key", &cfg.summarizer.api_key),
		("summarizer.path", &cfg.summarizer.path),
		("summarizer.model", &cfg.summarizer.model),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.summarizer.max_input_tokens == 0 {
		return Err(Error::Validation {
			message: "summarizer.max_input_tokens must be greater than zero.".to_string(),
		});
	}
	if cfg.summarizer.max_output_tokens == 0 {
		return Err(Error::Validation {
			message: "summarizer.max_output_tokens must be greater than zero.".to_string(),
		});
	}
	if cfg.summarizer.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "summarizer.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.retry.max_attempts == 0 {
		return Err(Error::Validation {
			message: "retry.max_attempts must be at least 1.".to_string(),
		});
	}
	if cfg.logging.level.trim().is_empty() {
		return Err(Error::Validation { message: "logging.level must be non-empty.".to_string() });
	}

	if cfg.email.enabled {
		validate_email(&cfg.email)?;
	}

	Ok(())
}

fn validate_email(email: &Email) -> Result<()> {
	if !EMAIL_PATTERN.is_match(&email.from) {
		return Err(Error::Validation {
			message: "email.from must be a valid address.".to_string(),
		});
	}
	if email.to.is_empty() {
		return Err(Error::Validation {
			message: "email.to must list at least one recipient.".to_string(),
		});
	}

	for addr in &email.to {
		if !EMAIL_PATTERN.is_match(addr) {
			return Err(Error::Validation {
				message: format!("email.to entry {addr:?} is not a valid address."),
			});
		}
	}

	if email.smtp_host.trim().is_empty() {
		return Err(Error::Validation { message: "email.smtp_host must be non-empty.".to_string() });
	}
	if email.smtp_port == 0 {
		return Err(Error::Validation {
			message: "email.smtp_port must be greater than zero.".to_string(),
		});
	}
	if email.password.is_empty() {
		return Err(Error::Validation { message: "email.password must be non-empty.".to_string() });
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg
		.summarizer
		.additional_prompt
		.as_deref()
		.map(|prompt| prompt.trim().is_empty())
		.unwrap_or(false)
	{
		cfg.summarizer.additional_prompt = None;
	}
	if cfg.window.utc_offset.as_deref().map(|offset| offset.trim().is_empty()).unwrap_or(false) {
		cfg.window.utc_offset = None;
	}
}

fn parse_time_of_day(raw: &str, label: &str) -> Result<Time> {
	let format = format_description!("[hour]:[minute]");

	Time::parse(raw, format).map_err(|_| Error::Validation {
		message: format!("{label} {raw:?} is not a valid HH:MM time."),
	})
}

fn parse_utc_offset(raw: &str) -> Result<UtcOffset> {
	let format = format_description!("[offset_hour sign:mandatory]:[offset_minute]");

	UtcOffset::parse(raw, format).map_err(|_| Error::Validation {
		message: format!("window.utc_offset {raw:?} is not a valid +HH:MM offset."),
	})
}
