mod error;
pub mod report;
pub mod retry;
mod run;
pub mod select;

pub use error::{Error, Result};
pub use report::{Digest, RunMetadata, SummaryResult};
pub use run::RunOutcome;
pub use select::{SelectedNote, SelectionResult};

use std::{future::Future, pin::Pin, sync::Arc};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait SummarizeProvider
where
	Self: Send + Sync,
{
	fn summarize<'a>(
		&'a self,
		cfg: &'a mote_config::Summarizer,
		input: &'a str,
	) -> BoxFuture<'a, mote_providers::Result<String>>;
}

pub trait MailProvider
where
	Self: Send + Sync,
{
	fn send<'a>(
		&'a self,
		cfg: &'a mote_config::Email,
		subject: &'a str,
		body: &'a str,
	) -> BoxFuture<'a, mote_providers::Result<()>>;
}

#[derive(Clone)]
pub struct Providers {
	pub summarizer: Arc<dyn SummarizeProvider>,
	pub mailer: Arc<dyn MailProvider>,
}
impl Providers {
	pub fn new(summarizer: Arc<dyn SummarizeProvider>, mailer: Arc<dyn MailProvider>) -> Self {
		Self { summarizer, mailer }
	}

	/// The real HTTP summarizer and SMTP mailer.
	pub fn live() -> Self {
		Self::new(Arc::new(HttpSummarizer), Arc::new(SmtpMailer))
	}
}

pub struct HttpSummarizer;
impl SummarizeProvider for HttpSummarizer {
	fn summarize<'a>(
		&'a self,
		cfg: &'a mote_config::Summarizer,
		input: &'a str,
	) -> BoxFuture<'a, mote_providers::Result<String>> {
		Box::pin(mote_providers::summarizer::summarize(cfg, input))
	}
}

pub struct SmtpMailer;
impl MailProvider for SmtpMailer {
	fn send<'a>(
		&'a self,
		cfg: &'a mote_config::Email,
		subject: &'a str,
		body: &'a str,
	) -> BoxFuture<'a, mote_providers::Result<()>> {
		Box::pin(mote_providers::mailer::send(cfg, subject, body))
	}
}

pub struct MoteService {
	pub cfg: mote_config::Config,
	pub providers: Providers,
}
impl MoteService {
	pub fn new(cfg: mote_config::Config, providers: Providers) -> Self {
		Self { cfg, providers }
	}
}
