//! Outbound email notifications for newly added employees.
//!
//! The gateway maps an accepted record to a template parameter set and
//! issues one send request against an EmailJS-style delivery endpoint.
//! Failure is terminal for the submission attempt; there is no retry.

use crate::domain::{Employee, RegistryError, RegistryResult};
use log::debug;
use serde_json::{Value, json};
use std::env;

pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

const SERVICE_ID_VAR: &str = "EMAILJS_SERVICE_ID";
const TEMPLATE_ID_VAR: &str = "EMAILJS_TEMPLATE_ID";
const USER_ID_VAR: &str = "EMAILJS_USER_ID";

/// Delivery-service configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
}

impl EmailConfig {
    /// Reads the three delivery settings, or `None` when any is absent.
    ///
    /// Absent email configuration is not fatal at startup; sending with it
    /// missing yields a configuration error at submission time instead.
    pub fn from_env() -> Option<Self> {
        let read = |var: &str| env::var(var).ok().filter(|v| !v.is_empty());
        Some(Self {
            service_id: read(SERVICE_ID_VAR)?,
            template_id: read(TEMPLATE_ID_VAR)?,
            user_id: read(USER_ID_VAR)?,
        })
    }
}

/// Sends one structured notification per accepted submission.
pub trait NotificationGateway {
    /// Delivers the notification, returning confirmation text on success.
    fn send(&self, employee: &Employee) -> RegistryResult<String>;
}

pub struct EmailJsGateway {
    config: Option<EmailConfig>,
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl EmailJsGateway {
    pub fn new(config: Option<EmailConfig>) -> Self {
        Self {
            config,
            client: reqwest::blocking::Client::new(),
            endpoint: EMAILJS_ENDPOINT.to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(EmailConfig::from_env())
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Template parameters for the delivery service.
    ///
    /// An absent or empty phone is sent as the literal "N/A"; the stored
    /// record keeps whatever was entered.
    pub fn template_params(employee: &Employee) -> Value {
        json!({
            "name": employee.name,
            "email": employee.email,
            "phone": employee
                .phone
                .as_deref()
                .filter(|phone| !phone.is_empty())
                .unwrap_or("N/A"),
            "role": employee.role.as_str(),
            "joining_date": employee.joining_date,
        })
    }
}

impl NotificationGateway for EmailJsGateway {
    fn send(&self, employee: &Employee) -> RegistryResult<String> {
        let config = self.config.as_ref().ok_or_else(|| {
            RegistryError::MissingConfig(format!(
                "{}, {} and {} must be set",
                SERVICE_ID_VAR, TEMPLATE_ID_VAR, USER_ID_VAR
            ))
        })?;

        let payload = json!({
            "service_id": config.service_id,
            "template_id": config.template_id,
            "user_id": config.user_id,
            "template_params": Self::template_params(employee),
        });

        debug!("sending notification for {}", employee.email);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .map_err(|e| RegistryError::Delivery(e.to_string()))?;

        let status = response.status();
        let body = response.text().unwrap_or_default();
        if status.is_success() {
            Ok(body)
        } else {
            Err(RegistryError::Delivery(format!("{}: {}", status, body)))
        }
    }
}
