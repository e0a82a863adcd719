use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = mote_digest::Args::parse();

	mote_digest::run(args).await
}
