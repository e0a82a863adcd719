use std::fs;

use time::OffsetDateTime;
use uuid::Uuid;

use mote_batching::{NoteInput, SummaryRequest};
use mote_domain::window;

use crate::{
	Error, MoteService, Result,
	report::{self, Digest, RunMetadata, SummaryResult},
	retry::{self, RetryPolicy},
	select,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
	/// Nothing qualified. Summarization and (unless configured otherwise)
	/// mail were skipped; this is a success, not a failure.
	NoNotes,
	Completed { notes: usize, requests: usize, mailed: bool },
}

impl MoteService {
	/// Execute one scheduled run against the vault as of `now`.
	pub async fn run(&self, now: OffsetDateTime) -> Result<RunOutcome> {
		let window = window::compute_from(&self.cfg.window, now)?;
		let meta = RunMetadata { run_id: Uuid::new_v4(), generated_at: now, window };

		tracing::info!(
			run_id = %meta.run_id,
			start = %window.start,
			end = %window.end,
			"Digest run started."
		);

		let selection = select::select_notes(&self.cfg.vault, window)?;

		if selection.notes.is_empty() {
			tracing::info!("No notes qualified for the digest window.");

			if self.cfg.email.enabled && self.cfg.email.notify_when_empty {
				self.deliver(&report::empty_notice(&meta)?).await?;
			}

			return Ok(RunOutcome::NoNotes);
		}

		tracing::info!(count = selection.notes.len(), "Notes selected for summarization.");

		let inputs = selection
			.notes
			.iter()
			.map(|note| NoteInput {
				path: note.path.clone(),
				title: note.title.clone(),
				text: note.text.clone(),
			})
			.collect::<Vec<_>>();
		let (results, request_count) = if self.cfg.summarizer.skip_summary {
			tracing::info!("Summarization skipped by configuration.");

			let note_paths = inputs.iter().map(|input| input.path.clone()).collect();
			let summary = format!(
				"Summarization was skipped by configuration. {} notes qualified.",
				selection.notes.len()
			);

			(vec![SummaryResult { note_paths, summary }], 0)
		} else {
			let requests = mote_batching::pack(&inputs, self.cfg.summarizer.max_input_tokens);
			let mut results = Vec::with_capacity(requests.len());

			for request in &requests {
				results.push(self.summarize_request(request).await?);
			}

			let count = requests.len();

			(results, count)
		};
		let digest = report::assemble(&results, &meta)?;

		// The digest always reaches the log, so a failed delivery can be
		// recovered by hand.
		tracing::info!(subject = %digest.subject, "Digest assembled.");
		tracing::info!("{}", digest.body);

		let mailed = if self.cfg.email.enabled {
			self.deliver(&digest).await?;

			true
		} else {
			tracing::info!("Mail delivery disabled. Digest logged only.");

			false
		};

		Ok(RunOutcome::Completed {
			notes: selection.notes.len(),
			requests: request_count,
			mailed,
		})
	}

	async fn summarize_request(&self, request: &SummaryRequest) -> Result<SummaryResult> {
		if request.truncated {
			tracing::warn!(
				notes = request.note_paths.len(),
				"Request input was truncated to fit the token budget."
			);
		}

		let policy = RetryPolicy::from_config(&self.cfg.retry);
		let summary = retry::with_backoff(&policy, "summarizer", || {
			self.providers.summarizer.summarize(&self.cfg.summarizer, &request.input)
		})
		.await
		.map_err(|err| {
			if err.is_transient() {
				Error::SummarizerExhausted { attempts: policy.max_attempts, source: err }
			} else {
				Error::Summarizer { source: err }
			}
		})?;

		Ok(SummaryResult { note_paths: request.note_paths.clone(), summary })
	}

	async fn deliver(&self, digest: &Digest) -> Result<()> {
		let policy = RetryPolicy::from_config(&self.cfg.retry);
		let result = retry::with_backoff(&policy, "mailer", || {
			self.providers.mailer.send(&self.cfg.email, &digest.subject, &digest.body)
		})
		.await;

		match result {
			Ok(()) => {
				tracing::info!(recipients = self.cfg.email.to.len(), "Digest mailed.");

				Ok(())
			},
			Err(err) => {
				self.spool_digest(digest);

				Err(if err.is_transient() {
					Error::MailExhausted { attempts: policy.max_attempts, source: err }
				} else {
					Error::Mail { source: err }
				})
			},
		}
	}

	fn spool_digest(&self, digest: &Digest) {
		let Some(dir) = self.cfg.report.failure_spool_dir.as_ref() else {
			return;
		};
		let write = || -> std::io::Result<std::path::PathBuf> {
			fs::create_dir_all(dir)?;

			let path = dir.join(format!("digest-{}.txt", digest.run_id));

			fs::write(&path, format!("{}\n\n{}", digest.subject, digest.body))?;

			Ok(path)
		};

		match write() {
			Ok(path) => tracing::info!(path = %path.display(), "Undelivered digest spooled."),
			Err(err) => tracing::error!(error = %err, "Failed to spool undelivered digest."),
		}
	}
}
