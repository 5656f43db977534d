//! Per-screen controllers.
//!
//! # Design
//! Each screen owns its form state in a plain struct. Handlers never touch
//! rendering or routing directly; they return `Effect`s that the `Navigator`
//! applies. Backend failures are logged and swallowed here so the screen
//! keeps its previous state. Only session storage failures propagate, since
//! they mean the host itself is broken.

pub mod login;
pub mod register;
pub mod tasks;

use std::fmt;

use crate::gateway::Gateway;

pub use login::LoginScreen;
pub use register::RegisterScreen;
pub use tasks::{ListToken, PendingList, RowState, TasksScreen};

/// Routes known to the navigator. `Home` is the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Register,
    Tasks,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Home => "Home",
            Screen::Register => "Register",
            Screen::Tasks => "Tasks",
        };
        f.write_str(name)
    }
}

/// A blocking message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    EmptyCredentials,
    InvalidEmail,
    PasswordMismatch,
    Registered,
    EmailExists,
    LoadFailed,
}

impl Alert {
    pub fn message(self) -> &'static str {
        match self {
            Alert::EmptyCredentials => "Email and password cannot be empty",
            Alert::InvalidEmail => "Please enter a valid email address",
            Alert::PasswordMismatch => "Password and confirm password must be the same",
            Alert::Registered => "Successfully registered!",
            Alert::EmailExists => "Email already exists",
            Alert::LoadFailed => "Something went wrong while loading your tasks",
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of a screen handler, applied in order by the navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Navigate(Screen),
    Alert(Alert),
}

/// Everything a screen handler may reach outside its own state.
#[derive(Debug)]
pub struct Services<T, S> {
    pub gateway: Gateway<T>,
    pub session: S,
}

impl<T, S> Services<T, S> {
    pub fn new(gateway: Gateway<T>, session: S) -> Self {
        Self { gateway, session }
    }
}
