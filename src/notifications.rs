// ABOUTME: Outbound email notification sink over SMTP
// ABOUTME: Fire-and-forget sends; delivery failure never fails the request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

//! Email notifications.
//!
//! The notifier is a best-effort sink: appointment confirmations and
//! password-reset mail are dispatched off the request path, and a delivery
//! failure is logged rather than surfaced to the caller. When no SMTP host
//! is configured the notifier is disabled and sends become debug-logged
//! no-ops, which keeps development and test environments mail-free.

use crate::config::SmtpConfig;
use anyhow::{Context, Result};
use lettre::{
    message::{header::ContentType, Message},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};
use tracing::{debug, error, info};

/// Best-effort SMTP notification sink
#[derive(Clone)]
pub struct EmailNotifier {
    config: SmtpConfig,
}

impl EmailNotifier {
    #[must_use]
    pub const fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// True when an SMTP host is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.config.host.is_some()
    }

    /// Queue a plain-text message. Returns immediately; the blocking SMTP
    /// handshake runs on the blocking pool and failures are only logged.
    pub fn send(&self, to: &str, subject: &str, body: &str) {
        if !self.is_enabled() {
            debug!("smtp not configured; skipping mail to {to} ({subject})");
            return;
        }

        let config = self.config.clone();
        let to = to.to_owned();
        let subject = subject.to_owned();
        let body = body.to_owned();

        tokio::task::spawn_blocking(move || {
            match deliver(&config, &to, &subject, &body) {
                Ok(()) => info!("notification mail sent to {to}"),
                Err(e) => error!("failed to send notification mail to {to}: {e:#}"),
            }
        });
    }

    /// Appointment confirmation for the business owner.
    pub fn send_appointment_created(&self, to: &str, client_name: &str, start_at: &str) {
        let body = format!(
            "A new appointment was booked.\n\nClient: {client_name}\nStarts: {start_at}\n"
        );
        self.send(to, "New appointment booked", &body);
    }

    /// Password-reset link for a business account.
    pub fn send_password_reset(&self, to: &str, token: &str) {
        let body = format!(
            "A password reset was requested for your account.\n\n\
             Reset token: {token}\n\n\
             The token expires in one hour. If you did not request a reset,\n\
             you can ignore this message.\n"
        );
        self.send(to, "Password reset request", &body);
    }
}

fn deliver(config: &SmtpConfig, to: &str, subject: &str, body: &str) -> Result<()> {
    let host = config
        .host
        .as_deref()
        .context("smtp host not configured")?;

    let message = Message::builder()
        .from(config.from_address.parse().context("invalid from address")?)
        .to(to.parse().context("invalid recipient address")?)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_owned())
        .context("failed to build message")?;

    let mailer = match (&config.username, &config.password) {
        (Some(user), Some(pass)) => SmtpTransport::relay(host)
            .context("smtp relay setup failed")?
            .credentials(Credentials::new(user.clone(), pass.clone()))
            .build(),
        _ => SmtpTransport::builder_dangerous(host).build(),
    };

    mailer.send(&message).context("smtp send failed")?;
    Ok(())
}
