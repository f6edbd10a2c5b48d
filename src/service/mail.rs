//! Outbound email via the Mailgun HTTP API.
//!
//! Every message is a Mailgun stored template plus a variables object. In
//! development mode nothing is sent; the would-be confirmation or reset link
//! is logged instead so local flows stay testable without an API key.

use serde_json::json;

use crate::{config::MailConfig, error::AppError};

/// Mailgun-backed mailer. Cheap to clone; lives in `AppState`.
#[derive(Clone)]
pub struct MailService {
    client: reqwest::Client,
    config: MailConfig,
}

impl MailService {
    pub fn new(client: reqwest::Client, config: MailConfig) -> Self {
        Self { client, config }
    }

    /// Sends the post-registration confirmation email.
    pub async fn send_confirmation_email(
        &self,
        email: &str,
        confirmation_url: &str,
    ) -> Result<bool, AppError> {
        self.send_template(
            email,
            "Welcome to Hearthgate!",
            "confirm-email",
            json!({ "confirmation": confirmation_url }),
        )
        .await
    }

    /// Sends the password reset email.
    pub async fn send_password_reset_email(
        &self,
        email: &str,
        reset_url: &str,
    ) -> Result<bool, AppError> {
        self.send_template(
            email,
            "Reset your password",
            "reset-password",
            json!({ "reset_password_url": reset_url }),
        )
        .await
    }

    /// Tells an applicant their whitelist application was accepted.
    pub async fn send_application_accepted_email(&self, email: &str) -> Result<bool, AppError> {
        self.send_template(
            email,
            "Congratulations! Your application has been accepted!",
            "application-accepted",
            json!({}),
        )
        .await
    }

    /// Sends a Mailgun template message.
    ///
    /// # Returns
    /// - `Ok(true)` - Mailgun accepted the message (or development mode skipped it)
    /// - `Ok(false)` - Mailgun rejected it or no API key is configured
    /// - `Err(AppError::ReqwestErr)` - The request itself failed
    async fn send_template(
        &self,
        to: &str,
        subject: &str,
        template: &str,
        variables: serde_json::Value,
    ) -> Result<bool, AppError> {
        if self.config.development {
            tracing::info!(
                "Development mode, skipping email '{}' to {}: {}",
                template,
                to,
                variables
            );
            return Ok(true);
        }

        let Some(api_key) = self.config.api_key.as_deref() else {
            tracing::warn!("MAILGUN_API_KEY not set, dropping email '{}' to {}", template, to);
            return Ok(false);
        };

        let variables = variables.to_string();
        let response = self
            .client
            .post(format!(
                "https://api.mailgun.net/v3/{}/messages",
                self.config.domain
            ))
            .basic_auth("api", Some(api_key))
            .form(&[
                ("from", self.config.from.as_str()),
                ("subject", subject),
                ("to", to),
                ("template", template),
                ("h:X-Mailgun-Variables", variables.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(
                "Mailgun rejected email '{}' to {}: {}",
                template,
                to,
                response.status()
            );
            return Ok(false);
        }

        Ok(true)
    }
}
