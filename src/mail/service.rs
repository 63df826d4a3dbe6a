//! Mail delivery service.
//!
//! Wraps a [`TransportFactory`] and performs the sends behind each endpoint.
//! Every call builds its own transport; nothing is shared between requests.

use std::sync::Arc;

use super::transport::{MailError, Provider, TransportFactory};
use super::types::{BulkOutcome, Delivery, FailedDelivery, OutgoingEmail, SendReceipt};

/// Service for sending mail.
#[derive(Clone)]
pub struct MailService {
    factory: Arc<dyn TransportFactory>,
}

impl MailService {
    /// Create a new service backed by `factory`.
    pub fn new(factory: Arc<dyn TransportFactory>) -> Self {
        Self { factory }
    }

    /// Send a single message.
    pub async fn send(
        &self,
        provider: Provider,
        email: &OutgoingEmail,
    ) -> Result<SendReceipt, MailError> {
        let mailer = self.factory.create(provider)?;
        let receipt = mailer.send(email).await?;

        tracing::info!(
            to = %email.to,
            %provider,
            message_id = %receipt.message_id,
            "Email sent"
        );

        Ok(receipt)
    }

    /// Send `base` to each recipient in turn, one message per recipient.
    ///
    /// Sends are awaited sequentially. A failure for one recipient is
    /// recorded and the loop moves on. Only failing to build the transport
    /// aborts the whole call.
    pub async fn send_bulk(
        &self,
        provider: Provider,
        recipients: &[String],
        base: &OutgoingEmail,
    ) -> Result<BulkOutcome, MailError> {
        let mailer = self.factory.create(provider)?;
        let mut outcome = BulkOutcome::default();

        for recipient in recipients {
            let email = OutgoingEmail {
                to: recipient.clone(),
                ..base.clone()
            };

            match mailer.send(&email).await {
                Ok(receipt) => {
                    tracing::debug!(to = %recipient, message_id = %receipt.message_id, "Bulk email sent");
                    outcome.sent.push(Delivery {
                        email: recipient.clone(),
                        receipt,
                    });
                }
                Err(e) => {
                    tracing::warn!(to = %recipient, error = %e, "Bulk email failed");
                    outcome.failed.push(FailedDelivery {
                        email: recipient.clone(),
                        error: e.detail().to_string(),
                    });
                }
            }
        }

        tracing::info!(
            %provider,
            sent = outcome.sent.len(),
            failed = outcome.failed.len(),
            "Bulk email run finished"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::Mailer;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Mailer that fails for addresses in `fail_for`.
    struct ScriptedMailer {
        fail_for: Vec<String>,
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Mailer for ScriptedMailer {
        async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, MailError> {
            self.log.lock().unwrap().push(email.to.clone());
            if self.fail_for.contains(&email.to) {
                return Err(MailError::Transport("550 mailbox unavailable".to_string()));
            }
            Ok(SendReceipt {
                message_id: format!("<{}@test>", email.to),
                response: "250 OK".to_string(),
            })
        }
    }

    struct ScriptedFactory {
        fail_for: Vec<String>,
        fail_create: bool,
        created: AtomicUsize,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedFactory {
        fn new(fail_for: &[&str]) -> Self {
            Self {
                fail_for: fail_for.iter().map(|s| s.to_string()).collect(),
                fail_create: false,
                created: AtomicUsize::new(0),
                log: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl TransportFactory for ScriptedFactory {
        fn create(&self, _provider: Provider) -> Result<Box<dyn Mailer>, MailError> {
            self.created.fetch_add(1, Ordering::SeqCst);
            if self.fail_create {
                return Err(MailError::Transport("bad TLS config".to_string()));
            }
            Ok(Box::new(ScriptedMailer {
                fail_for: self.fail_for.clone(),
                log: self.log.clone(),
            }))
        }
    }

    fn base_email() -> OutgoingEmail {
        OutgoingEmail {
            subject: "Hello".to_string(),
            text: Some("Body".to_string()),
            ..Default::default()
        }
    }

    fn recipients(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_send_single() {
        let factory = Arc::new(ScriptedFactory::new(&[]));
        let service = MailService::new(factory.clone());

        let email = OutgoingEmail {
            to: "a@example.com".to_string(),
            ..base_email()
        };
        let receipt = service.send(Provider::Gmail, &email).await.unwrap();

        assert_eq!(receipt.message_id, "<a@example.com@test>");
        assert_eq!(factory.created.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_send_single_failure_propagates() {
        let factory = Arc::new(ScriptedFactory::new(&["a@example.com"]));
        let service = MailService::new(factory);

        let email = OutgoingEmail {
            to: "a@example.com".to_string(),
            ..base_email()
        };
        let result = service.send(Provider::Smtp, &email).await;

        assert!(matches!(result, Err(MailError::Transport(_))));
    }

    #[tokio::test]
    async fn test_bulk_isolates_failures_in_order() {
        let factory = Arc::new(ScriptedFactory::new(&["b@example.com"]));
        let service = MailService::new(factory.clone());

        let list = recipients(&["a@example.com", "b@example.com", "c@example.com"]);
        let outcome = service
            .send_bulk(Provider::Gmail, &list, &base_email())
            .await
            .unwrap();

        let sent: Vec<&str> = outcome.sent.iter().map(|d| d.email.as_str()).collect();
        assert_eq!(sent, vec!["a@example.com", "c@example.com"]);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].email, "b@example.com");
        assert_eq!(outcome.failed[0].error, "550 mailbox unavailable");

        // One transport, every recipient attempted in input order.
        assert_eq!(factory.created.load(Ordering::SeqCst), 1);
        assert_eq!(*factory.log.lock().unwrap(), list);
    }

    #[tokio::test]
    async fn test_bulk_all_fail_still_ok() {
        let factory = Arc::new(ScriptedFactory::new(&["a@example.com", "b@example.com"]));
        let service = MailService::new(factory);

        let list = recipients(&["a@example.com", "b@example.com"]);
        let outcome = service
            .send_bulk(Provider::Gmail, &list, &base_email())
            .await
            .unwrap();

        assert!(outcome.sent.is_empty());
        assert_eq!(outcome.failed.len(), 2);
    }

    #[tokio::test]
    async fn test_bulk_transport_creation_failure() {
        let mut factory = ScriptedFactory::new(&[]);
        factory.fail_create = true;
        let factory = Arc::new(factory);
        let service = MailService::new(factory.clone());

        let list = recipients(&["a@example.com"]);
        let result = service.send_bulk(Provider::Gmail, &list, &base_email()).await;

        assert!(result.is_err());
        assert!(factory.log.lock().unwrap().is_empty());
    }
}
