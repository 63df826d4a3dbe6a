//! Test helpers for Web API integration tests.
//!
//! Provides a recording transport factory and a TestServer builder.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;

use mail_relay::config::Config;
use mail_relay::mail::{MailError, MailService, Mailer, OutgoingEmail, Provider, SendReceipt};
use mail_relay::web::handlers::AppState;
use mail_relay::web::middleware::RateLimitState;
use mail_relay::web::router::create_router;
use mail_relay::TransportFactory;

/// Error text returned by scripted failures.
pub const SCRIPTED_FAILURE: &str = "550 5.1.1 mailbox unavailable";

#[derive(Default)]
struct Recorder {
    created: AtomicUsize,
    calls: AtomicUsize,
    providers: Mutex<Vec<Provider>>,
    sent: Mutex<Vec<OutgoingEmail>>,
    fail_on: Vec<usize>,
    fail_create: bool,
}

/// Transport factory that records every transport and message.
///
/// Send calls are numbered from 1 across all transports; calls listed in
/// `fail_on` return [`SCRIPTED_FAILURE`].
#[derive(Clone, Default)]
pub struct RecordingFactory {
    inner: Arc<Recorder>,
}

impl RecordingFactory {
    /// A factory whose sends all succeed.
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory failing the given 1-based send calls.
    pub fn failing_on(calls: &[usize]) -> Self {
        Self {
            inner: Arc::new(Recorder {
                fail_on: calls.to_vec(),
                ..Default::default()
            }),
        }
    }

    /// A factory that cannot build a transport.
    pub fn broken() -> Self {
        Self {
            inner: Arc::new(Recorder {
                fail_create: true,
                ..Default::default()
            }),
        }
    }

    /// Number of transports constructed.
    pub fn created(&self) -> usize {
        self.inner.created.load(Ordering::SeqCst)
    }

    /// Providers requested, in order.
    pub fn providers(&self) -> Vec<Provider> {
        self.inner.providers.lock().unwrap().clone()
    }

    /// Messages handed to a transport, in order, including failed ones.
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.inner.sent.lock().unwrap().clone()
    }
}

impl TransportFactory for RecordingFactory {
    fn create(&self, provider: Provider) -> Result<Box<dyn Mailer>, MailError> {
        self.inner.created.fetch_add(1, Ordering::SeqCst);
        self.inner.providers.lock().unwrap().push(provider);
        if self.inner.fail_create {
            return Err(MailError::Transport("TLS configuration rejected".to_string()));
        }
        Ok(Box::new(RecordingMailer {
            inner: self.inner.clone(),
        }))
    }
}

struct RecordingMailer {
    inner: Arc<Recorder>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, MailError> {
        let call = self.inner.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.sent.lock().unwrap().push(email.clone());

        if self.inner.fail_on.contains(&call) {
            return Err(MailError::Transport(SCRIPTED_FAILURE.to_string()));
        }

        Ok(SendReceipt {
            message_id: format!("<{call}@relay.test>"),
            response: "250 2.0.0 OK queued".to_string(),
        })
    }
}

/// Default configuration for tests.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config
}

/// Create a test server backed by `factory` using `config`.
pub fn create_test_server_with(factory: &RecordingFactory, config: &Config) -> TestServer {
    let app_state = Arc::new(
        AppState::new(MailService::new(Arc::new(factory.clone())), &config.mail)
            .with_docs_enabled(config.web.enable_docs),
    );
    let rate_limit_state = Arc::new(RateLimitState::new(&config.rate_limit));

    let router = create_router(app_state, rate_limit_state, &config.web);

    TestServer::new(router).expect("Failed to create test server")
}

/// Create a test server backed by `factory` with default settings.
pub fn create_test_server(factory: &RecordingFactory) -> TestServer {
    create_test_server_with(factory, &test_config())
}
