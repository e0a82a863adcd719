use lettre::{
	AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
	message::{Mailbox, header::ContentType},
	transport::smtp::authentication::Credentials,
};

use crate::{Error, Result};

/// Deliver the digest over SMTP with STARTTLS. Recipients go in Bcc with the
/// sender in To, so addresses are not disclosed to each other.
pub async fn send(cfg: &mote_config::Email, subject: &str, body: &str) -> Result<()> {
	let from: Mailbox = cfg
		.from
		.parse()
		.map_err(|err| Error::Permanent { message: format!("Invalid from address: {err}.") })?;
	let mut builder = Message::builder().from(from.clone()).to(from).subject(subject);

	for addr in &cfg.to {
		let recipient: Mailbox = addr.parse().map_err(|err| Error::Permanent {
			message: format!("Invalid recipient {addr:?}: {err}."),
		})?;

		builder = builder.bcc(recipient);
	}

	let message = builder
		.header(ContentType::TEXT_PLAIN)
		.body(body.to_string())
		.map_err(|err| Error::Permanent { message: format!("Failed to build message: {err}.") })?;
	let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.smtp_host)
		.map_err(from_smtp)?
		.port(cfg.smtp_port)
		.credentials(Credentials::new(cfg.from.clone(), cfg.password.clone()))
		.build();

	transport.send(message).await.map(|_| ()).map_err(from_smtp)
}

fn from_smtp(err: lettre::transport::smtp::Error) -> Error {
	// Only a definitive SMTP rejection is permanent; connection, TLS, and
	// 4xx-class failures are worth another attempt.
	if err.is_permanent() {
		Error::Permanent { message: err.to_string() }
	} else {
		Error::Transient { message: err.to_string() }
	}
}
