//! Registration screen.

use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::http::Transport;
use crate::types::Credentials;
use crate::validation::is_valid_email;

use super::{Alert, Effect, Screen};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterScreen {
    email: String,
    password: String,
    confirm_password: String,
}

impl RegisterScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn confirm_password(&self) -> &str {
        &self.confirm_password
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn set_confirm_password(&mut self, confirm_password: impl Into<String>) {
        self.confirm_password = confirm_password.into();
    }

    /// Client-side checks, in the order the user sees them.
    pub fn check(&self) -> Result<Credentials, Alert> {
        if self.email.is_empty() || self.password.is_empty() || self.confirm_password.is_empty() {
            return Err(Alert::EmptyCredentials);
        }
        if !is_valid_email(&self.email) {
            return Err(Alert::InvalidEmail);
        }
        if self.password != self.confirm_password {
            return Err(Alert::PasswordMismatch);
        }
        Ok(Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }

    /// Fields are left untouched on every failure path.
    pub fn submit<T: Transport>(&mut self, gateway: &Gateway<T>) -> Vec<Effect> {
        let credentials = match self.check() {
            Ok(credentials) => credentials,
            Err(alert) => return vec![Effect::Alert(alert)],
        };
        match gateway.register(&credentials) {
            Ok(()) => vec![
                Effect::Navigate(Screen::Home),
                Effect::Alert(Alert::Registered),
            ],
            Err(ApiError::Status { status, .. }) => {
                tracing::warn!(status, "registration rejected");
                vec![Effect::Alert(Alert::EmailExists)]
            }
            Err(e) => {
                tracing::warn!(error = %e, "registration failed");
                Vec::new()
            }
        }
    }
}
