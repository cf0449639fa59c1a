// file: src/delivery/smtp.rs
// description: digest delivery over SMTP with the gazette attached
// reference: https://docs.rs/lettre

use crate::config::{MailConfig, ReportFormat};
use crate::error::{MonitorError, Result};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, Message, SmtpTransport, Transport};
use tracing::{info, warn};

/// Everything a sink needs to send one notification.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub subject: String,
    pub body: String,
    pub format: ReportFormat,
    pub recipients: Vec<String>,
    pub attachment: Vec<u8>,
    pub attachment_name: String,
}

pub trait DeliverySink {
    fn deliver(&self, envelope: &Envelope) -> Result<()>;
}

/// Sends through an SMTP relay with STARTTLS. Recipients go in BCC.
pub struct SmtpMailer {
    config: MailConfig,
}

impl SmtpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    pub fn build_message(&self, envelope: &Envelope) -> Result<Message> {
        let sender: Address = self
            .config
            .sender
            .parse()
            .map_err(|e| MonitorError::Delivery(format!("sender address is invalid: {}", e)))?;
        let from = Mailbox::new(Some(self.config.display_name.clone()), sender);

        let mut builder = Message::builder().from(from).subject(envelope.subject.as_str());
        let mut accepted = 0;
        let recipients = envelope
            .recipients
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty());
        for recipient in recipients {
            match recipient.parse::<Mailbox>() {
                Ok(mailbox) => {
                    builder = builder.bcc(mailbox);
                    accepted += 1;
                }
                Err(e) => warn!("Skipping invalid recipient '{}': {}", recipient, e),
            }
        }

        if accepted == 0 {
            return Err(MonitorError::Delivery("no valid recipients".to_string()));
        }

        let body = match envelope.format {
            ReportFormat::Plain => SinglePart::plain(envelope.body.clone()),
            ReportFormat::Html => SinglePart::html(envelope.body.clone()),
        };
        let pdf = ContentType::parse("application/pdf")
            .map_err(|e| MonitorError::Delivery(format!("invalid content type: {}", e)))?;
        let attachment = Attachment::new(envelope.attachment_name.clone())
            .body(envelope.attachment.clone(), pdf);

        builder
            .multipart(MultiPart::mixed().singlepart(body).singlepart(attachment))
            .map_err(|e| MonitorError::Delivery(format!("message build failed: {}", e)))
    }

    fn transport(&self) -> Result<SmtpTransport> {
        let password = self
            .config
            .password
            .clone()
            .ok_or_else(|| MonitorError::Delivery("mail.password is not set".to_string()))?;

        let transport = SmtpTransport::starttls_relay(&self.config.smtp_server)
            .map_err(|e| MonitorError::Delivery(format!("starttls relay init failed: {}", e)))?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(self.config.sender.clone(), password))
            .build();

        Ok(transport)
    }
}

impl DeliverySink for SmtpMailer {
    fn deliver(&self, envelope: &Envelope) -> Result<()> {
        info!(
            "Preparing mail for {} recipient(s)",
            envelope.recipients.len()
        );

        let message = self.build_message(envelope)?;
        self.transport()?
            .send(&message)
            .map_err(|e| MonitorError::Delivery(format!("smtp send failed: {}", e)))?;

        info!("Mail sent");
        Ok(())
    }
}

/// Logs the notification instead of sending it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DeliverySink for LogSink {
    fn deliver(&self, envelope: &Envelope) -> Result<()> {
        info!(
            "Dry run: would send '{}' to {} recipient(s) with {} ({} bytes)",
            envelope.subject,
            envelope.recipients.len(),
            envelope.attachment_name,
            envelope.attachment.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn mailer() -> SmtpMailer {
        let mut config = Config::default_config().mail;
        config.sender = "robo@example.org".to_string();
        config.password = Some("secret".to_string());
        SmtpMailer::new(config)
    }

    fn envelope(recipients: &[&str]) -> Envelope {
        Envelope {
            subject: "📰🔵✅ DOTCECE_12-1.pdf (Termos encontrados) 📢".to_string(),
            body: "🤖 Olá,\n\nResumo".to_string(),
            format: ReportFormat::Plain,
            recipients: recipients.iter().map(|r| r.to_string()).collect(),
            attachment: b"%PDF-1.4".to_vec(),
            attachment_name: "DOTCECE_12-1.pdf".to_string(),
        }
    }

    #[test]
    fn test_message_carries_attachment_and_hides_recipients() {
        let message = mailer()
            .build_message(&envelope(&["a@example.org", " b@example.org "]))
            .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("filename=\"DOTCECE_12-1.pdf\""));
        assert!(raw.contains("application/pdf"));
        assert!(!raw.contains("a@example.org"));
        assert_eq!(message.envelope().to().len(), 2);
    }

    #[test]
    fn test_invalid_recipients_are_skipped() {
        let message = mailer()
            .build_message(&envelope(&["not an address", "ok@example.org"]))
            .unwrap();
        assert_eq!(message.envelope().to().len(), 1);
    }

    #[test]
    fn test_no_valid_recipients() {
        let result = mailer().build_message(&envelope(&["", "nope"]));
        assert!(matches!(result, Err(MonitorError::Delivery(_))));
    }

    #[test]
    fn test_log_sink_always_succeeds() {
        assert!(LogSink.deliver(&envelope(&[])).is_ok());
    }
}
