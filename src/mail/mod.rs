use crate::config::MailConfig;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use serde::Serialize;
use thiserror::Error;

const TEST_SUBJECT: &str = "Commit relay test email";
const TEST_BODY: &str = "This is a test message from the commit relay.\n\nIf you can read it, email notifications are configured correctly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailMode {
    Live,
    Simulation,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid recipient address {0}")]
    InvalidRecipient(String),
    #[error("Invalid sender address {0}")]
    InvalidSender(String),
    #[error("Cannot build email: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("Cannot configure SMTP: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("Cannot send email: {0}")]
    Delivery(String),
}

enum Transport<T> {
    Live { transport: T, sender: Mailbox },
    Simulation,
}

/// Sends the fixed test message, either through a lettre transport or,
/// without SMTP settings, by describing what would have been sent.
pub struct Mailer<T = AsyncSmtpTransport<Tokio1Executor>> {
    transport: Transport<T>,
}

impl Mailer {
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        let (Some(host), Some(user), Some(password)) = (&config.host, &config.user, &config.password)
        else {
            return Ok(Mailer::simulation());
        };

        if !config.is_live() {
            return Ok(Mailer::simulation());
        }

        let sender_address = config.from.as_deref().unwrap_or(user);
        let sender = sender_address
            .parse::<Mailbox>()
            .map_err(|_| MailError::InvalidSender(sender_address.to_owned()))?;

        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
        };

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(user.to_owned(), password.to_owned()))
            .build();

        log::info!("Email service is live via {}:{}", host, config.port);

        Ok(Mailer::live(transport, sender))
    }

    pub fn simulation() -> Self {
        log::info!("Email service is running in simulation mode");

        Mailer {
            transport: Transport::Simulation,
        }
    }
}

impl<T> Mailer<T>
where
    T: AsyncTransport + Sync,
    T::Error: std::fmt::Display,
{
    pub fn live(transport: T, sender: Mailbox) -> Self {
        Mailer {
            transport: Transport::Live { transport, sender },
        }
    }

    pub fn mode(&self) -> MailMode {
        match self.transport {
            Transport::Live { .. } => MailMode::Live,
            Transport::Simulation => MailMode::Simulation,
        }
    }

    pub async fn send_test(&self, recipient: &str) -> Result<String, MailError> {
        let to = recipient
            .trim()
            .parse::<Mailbox>()
            .map_err(|_| MailError::InvalidRecipient(recipient.to_owned()))?;

        match &self.transport {
            Transport::Simulation => {
                log::info!("Simulated test email to {}", to);

                Ok(format!(
                    "Simulation mode: no email was sent.\nTo: {to}\nSubject: {TEST_SUBJECT}\n\n{TEST_BODY}"
                ))
            }
            Transport::Live { transport, sender } => {
                let message = Message::builder()
                    .from(sender.clone())
                    .to(to.clone())
                    .subject(TEST_SUBJECT)
                    .header(ContentType::TEXT_PLAIN)
                    .body(TEST_BODY.to_owned())?;

                transport
                    .send(message)
                    .await
                    .map_err(|err| MailError::Delivery(err.to_string()))?;
                log::info!("Sent test email to {}", to);

                Ok(format!("Test email sent to {to}"))
            }
        }
    }
}
