//! Login (Home) screen.
//!
//! A stored session skips the form entirely. Field validity is recomputed
//! only when a field loses focus, and submission is disabled while either
//! field is flagged invalid.

use crate::error::{ApiError, SessionError};
use crate::http::Transport;
use crate::session::SessionStore;
use crate::types::Credentials;
use crate::validation::{is_valid_email, is_valid_password};

use super::{Effect, Screen, Services};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginScreen {
    email: String,
    password: String,
    email_valid: bool,
    password_valid: bool,
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            email_valid: true,
            password_valid: true,
        }
    }
}

impl LoginScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn is_email_valid(&self) -> bool {
        self.email_valid
    }

    pub fn is_password_valid(&self) -> bool {
        self.password_valid
    }

    pub fn can_submit(&self) -> bool {
        self.email_valid && self.password_valid
    }

    pub fn on_mount<S: SessionStore>(&self, session: &S) -> Result<Vec<Effect>, SessionError> {
        if session.get()?.is_some() {
            tracing::info!("stored session found, skipping login");
            return Ok(vec![Effect::Navigate(Screen::Tasks)]);
        }
        Ok(Vec::new())
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn blur_email(&mut self) {
        self.email_valid = is_valid_email(&self.email);
    }

    pub fn blur_password(&mut self) {
        self.password_valid = is_valid_password(&self.password);
    }

    pub fn open_register(&self) -> Vec<Effect> {
        vec![Effect::Navigate(Screen::Register)]
    }

    /// Sign in with the current fields. Rejected credentials and network
    /// failures are logged and leave the screen unchanged.
    pub fn submit<T: Transport, S: SessionStore>(
        &mut self,
        services: &mut Services<T, S>,
    ) -> Result<Vec<Effect>, SessionError> {
        if !self.can_submit() {
            tracing::debug!("login submitted while disabled");
            return Ok(Vec::new());
        }
        let credentials = Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        };
        match services.gateway.login(&credentials) {
            Ok(id) => {
                services.session.set(id)?;
                Ok(vec![Effect::Navigate(Screen::Tasks)])
            }
            Err(ApiError::Status { status, .. }) => {
                tracing::warn!(status, "login rejected");
                Ok(Vec::new())
            }
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                Ok(Vec::new())
            }
        }
    }
}
