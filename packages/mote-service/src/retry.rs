use std::{future::Future, time::Duration};

const MAX_BACKOFF: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
	pub max_attempts: u32,
	pub base_delay: Duration,
}
impl RetryPolicy {
	pub fn from_config(cfg: &mote_config::Retry) -> Self {
		Self {
			max_attempts: cfg.max_attempts.max(1),
			base_delay: Duration::from_millis(cfg.base_delay_ms),
		}
	}
}

pub fn backoff_for_attempt(policy: &RetryPolicy, attempt: u32) -> Duration {
	let exp = attempt.saturating_sub(1).min(6);

	policy.base_delay.saturating_mul(1 << exp).min(MAX_BACKOFF)
}

/// Run `call` until it succeeds, retrying transient failures with
/// exponential backoff up to the bounded attempt count. Permanent failures
/// and the last transient failure are returned to the caller.
pub async fn with_backoff<T, F, Fut>(
	policy: &RetryPolicy,
	operation: &str,
	mut call: F,
) -> mote_providers::Result<T>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = mote_providers::Result<T>>,
{
	let mut attempt = 0;

	loop {
		attempt += 1;

		match call().await {
			Ok(value) => return Ok(value),
			Err(err) if err.is_transient() && attempt < policy.max_attempts => {
				let delay = backoff_for_attempt(policy, attempt);

				tracing::warn!(
					error = %err,
					attempt,
					operation,
					delay_ms = delay.as_millis() as u64,
					"Transient failure. Retrying after backoff."
				);
				tokio::time::sleep(delay).await;
			},
			Err(err) => return Err(err),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicU32, Ordering};

	use mote_providers::Error;

	use super::*;

	fn policy(max_attempts: u32) -> RetryPolicy {
		RetryPolicy { max_attempts, base_delay: Duration::from_millis(1) }
	}

	#[test]
	fn backoff_doubles_and_caps() {
		let policy = RetryPolicy { max_attempts: 10, base_delay: Duration::from_millis(500) };

		assert_eq!(backoff_for_attempt(&policy, 1), Duration::from_millis(500));
		assert_eq!(backoff_for_attempt(&policy, 2), Duration::from_millis(1_000));
		assert_eq!(backoff_for_attempt(&policy, 3), Duration::from_millis(2_000));
		assert_eq!(backoff_for_attempt(&policy, 20), MAX_BACKOFF);
	}

	#[tokio::test]
	async fn transient_failures_are_retried_until_success() {
		let calls = AtomicU32::new(0);
		let result = with_backoff(&policy(3), "test", || {
			let attempt = calls.fetch_add(1, Ordering::SeqCst);

			async move {
				if attempt == 0 {
					Err(Error::Transient { message: "blip".to_string() })
				} else {
					Ok("done")
				}
			}
		})
		.await;

		assert_eq!(result.expect("Expected a success."), "done");
		assert_eq!(calls.load(Ordering::SeqCst), 2);
	}

	#[tokio::test]
	async fn permanent_failures_are_not_retried() {
		let calls = AtomicU32::new(0);
		let result: mote_providers::Result<()> = with_backoff(&policy(5), "test", || {
			calls.fetch_add(1, Ordering::SeqCst);

			async { Err(Error::Permanent { message: "denied".to_string() }) }
		})
		.await;

		assert!(!result.expect_err("Expected a failure.").is_transient());
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn attempts_are_bounded() {
		let calls = AtomicU32::new(0);
		let result: mote_providers::Result<()> = with_backoff(&policy(3), "test", || {
			calls.fetch_add(1, Ordering::SeqCst);

			async { Err(Error::Transient { message: "still down".to_string() }) }
		})
		.await;

		assert!(result.expect_err("Expected a failure.").is_transient());
		assert_eq!(calls.load(Ordering::SeqCst), 3);
	}
}
