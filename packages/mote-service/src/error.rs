pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Domain(#[from] mote_domain::Error),
	#[error(transparent)]
	Vault(#[from] mote_vault::Error),
	#[error("Summarization failed: {source}")]
	Summarizer { source: mote_providers::Error },
	#[error("Summarization retries exhausted after {attempts} attempts: {source}")]
	SummarizerExhausted { attempts: u32, source: mote_providers::Error },
	#[error("Mail delivery failed: {source}")]
	Mail { source: mote_providers::Error },
	#[error("Mail delivery retries exhausted after {attempts} attempts: {source}")]
	MailExhausted { attempts: u32, source: mote_providers::Error },
	#[error("Failed to format digest timestamp.")]
	FormatTimestamp(#[from] time::error::Format),
}
