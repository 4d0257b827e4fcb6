//! Report-ready email delivery via the Resend HTTP API.

use reqwest::blocking::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::info;

use crate::error::{ReportError, Result};

/// Default Resend API endpoint
pub const RESEND_URL: &str = "https://api.resend.com/emails";

/// Mailer configuration, injected at construction.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub api_key: String,
    /// Sender, e.g. `E5 Compass <reports@e5compass.example>`.
    pub from: String,
}

/// One report-ready notification.
#[derive(Debug, Clone)]
pub struct ReportEmail {
    pub to: String,
    pub company_name: String,
    pub report_id: String,
    pub download_url: String,
}

/// Client for sending report-ready emails.
#[derive(Debug, Clone)]
pub struct ReportMailer {
    http: Client,
    config: MailerConfig,
    endpoint: String,
}

impl ReportMailer {
    pub fn new(config: MailerConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            http,
            config,
            endpoint: RESEND_URL.to_string(),
        })
    }

    /// Point the mailer at a different endpoint (tests, proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Send the report-ready email; returns the provider's message id.
    pub fn send_report_ready(&self, email: &ReportEmail) -> Result<String> {
        let body = json!({
            "from": self.config.from,
            "to": email.to,
            "subject": format!("Your E5 Business Case Report - {}", email.company_name),
            "html": render_email_html(email),
        });

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_else(|_| "unknown error".to_string());
            return Err(ReportError::Email(format!("({}) {}", status.as_u16(), message)));
        }

        let data: Value = response.json()?;
        let id = data
            .pointer("/id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        info!(report_id = %email.report_id, message_id = %id, "report email sent");
        Ok(id)
    }
}

/// HTML body of the report-ready email.
fn render_email_html(email: &ReportEmail) -> String {
    format!(
        r#"<div style="font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; max-width: 600px; margin: 0 auto; padding: 40px 20px;">
  <h1 style="color: #1e3a5f; font-size: 24px; text-align: center;">E5 Compass</h1>
  <div style="background: #f8fafc; border-radius: 12px; padding: 32px;">
    <h2 style="color: #0f172a; font-size: 20px; margin: 0 0 8px 0;">Your report is ready</h2>
    <p style="color: #475569; font-size: 15px; line-height: 1.6;">
      Your full Microsoft 365 E5 Business Case for <strong>{company}</strong> has been generated
      and is ready to download, including the board-ready PDF report and the PowerPoint deck.
    </p>
  </div>
  <div style="text-align: center; margin: 32px 0;">
    <a href="{url}" style="display: inline-block; background: #1e3a5f; color: white; text-decoration: none; padding: 14px 32px; border-radius: 8px; font-size: 16px; font-weight: 600;">Download Your Report</a>
  </div>
  <p style="color: #94a3b8; font-size: 12px; text-align: center;">Report ID: {report_id}</p>
</div>"#,
        company = email.company_name,
        url = email.download_url,
        report_id = email.report_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_html_contains_details() {
        let email = ReportEmail {
            to: "cfo@acme.example".to_string(),
            company_name: "Acme Ltd".to_string(),
            report_id: "rpt_123".to_string(),
            download_url: "https://example.com/report/download?id=rpt_123".to_string(),
        };

        let html = render_email_html(&email);
        assert!(html.contains("Acme Ltd"));
        assert!(html.contains("rpt_123"));
        assert!(html.contains("https://example.com/report/download?id=rpt_123"));
    }
}
