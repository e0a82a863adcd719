use std::path::PathBuf;

use clap::Parser;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

use mote_service::{MoteService, Providers, RunOutcome};

#[derive(Debug, Parser)]
#[command(
	version = mote_cli::VERSION,
	rename_all = "kebab",
	styles = mote_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = mote_config::load(&args.config)?;

	init_tracing(&config);

	let now = resolve_now(&config)?;
	let service = MoteService::new(config, Providers::live());

	match service.run(now).await? {
		RunOutcome::NoNotes => {
			tracing::info!("Run complete. No qualifying notes.");
		},
		RunOutcome::Completed { notes, requests, mailed } => {
			tracing::info!(notes, requests, mailed, "Run complete.");
		},
	}

	Ok(())
}

fn init_tracing(config: &mote_config::Config) {
	let filter =
		EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// The run's clock: the configured offset wins, then the process-local
/// offset, then UTC.
fn resolve_now(config: &mote_config::Config) -> color_eyre::Result<OffsetDateTime> {
	if let Some(raw) = config.window.utc_offset.as_deref() {
		let offset = mote_domain::window::parse_utc_offset(raw)?;

		return Ok(OffsetDateTime::now_utc().to_offset(offset));
	}

	match OffsetDateTime::now_local() {
		Ok(now) => Ok(now),
		Err(err) => {
			tracing::warn!(error = %err, "Local UTC offset is indeterminate. Using UTC.");

			Ok(OffsetDateTime::now_utc())
		},
	}
}
