//! Routing between the Home, Register, and Tasks screens.
//!
//! # Design
//! The navigator owns the shared services and the state of exactly one
//! screen. Entering a screen always builds fresh state, so form fields are
//! dropped on navigation, and then runs that screen's mount hook. Effects are
//! applied in order; navigation effects may cascade (Home with a stored
//! session goes straight on to Tasks), bounded by `MAX_REDIRECTS`.

use std::collections::VecDeque;

use crate::error::SessionError;
use crate::gateway::Gateway;
use crate::http::Transport;
use crate::screens::{
    Alert, Effect, LoginScreen, RegisterScreen, Screen, Services, TasksScreen,
};
use crate::session::SessionStore;

const MAX_REDIRECTS: usize = 8;

/// UI events of the login screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeEvent {
    EmailChanged(String),
    EmailBlurred,
    PasswordChanged(String),
    PasswordBlurred,
    Submit,
    OpenRegister,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterEvent {
    EmailChanged(String),
    PasswordChanged(String),
    ConfirmPasswordChanged(String),
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TasksEvent {
    DraftChanged(String),
    Add,
    Refresh,
    Toggle(String),
    Delete(String),
    FocusRow(usize),
    EditChanged(String),
    EditSubmitted,
    EditBlurred,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Home(HomeEvent),
    Register(RegisterEvent),
    Tasks(TasksEvent),
}

/// State of the screen currently shown.
#[derive(Debug, Clone)]
pub enum ActiveScreen {
    Home(LoginScreen),
    Register(RegisterScreen),
    Tasks(TasksScreen),
}

impl ActiveScreen {
    pub fn screen(&self) -> Screen {
        match self {
            ActiveScreen::Home(_) => Screen::Home,
            ActiveScreen::Register(_) => Screen::Register,
            ActiveScreen::Tasks(_) => Screen::Tasks,
        }
    }

    fn fresh(screen: Screen) -> Self {
        match screen {
            Screen::Home => ActiveScreen::Home(LoginScreen::new()),
            Screen::Register => ActiveScreen::Register(RegisterScreen::new()),
            Screen::Tasks => ActiveScreen::Tasks(TasksScreen::new()),
        }
    }
}

pub struct Navigator<T, S> {
    services: Services<T, S>,
    active: ActiveScreen,
}

impl<T: Transport, S: SessionStore> Navigator<T, S> {
    /// Creates a navigator parked on Home. Call `start` to mount it.
    pub fn new(gateway: Gateway<T>, session: S) -> Self {
        Self {
            services: Services::new(gateway, session),
            active: ActiveScreen::Home(LoginScreen::new()),
        }
    }

    pub fn start(&mut self) -> Result<Vec<Alert>, SessionError> {
        self.navigate(Screen::Home)
    }

    pub fn screen(&self) -> Screen {
        self.active.screen()
    }

    pub fn active(&self) -> &ActiveScreen {
        &self.active
    }

    pub fn services(&self) -> &Services<T, S> {
        &self.services
    }

    pub fn login(&self) -> Option<&LoginScreen> {
        match &self.active {
            ActiveScreen::Home(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn register(&self) -> Option<&RegisterScreen> {
        match &self.active {
            ActiveScreen::Register(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn tasks(&self) -> Option<&TasksScreen> {
        match &self.active {
            ActiveScreen::Tasks(screen) => Some(screen),
            _ => None,
        }
    }

    /// Enter `screen` with fresh state and return the alerts to show.
    pub fn navigate(&mut self, screen: Screen) -> Result<Vec<Alert>, SessionError> {
        self.apply(vec![Effect::Navigate(screen)])
    }

    /// Dispatch a UI event to the active screen.
    pub fn handle(&mut self, event: Event) -> Result<Vec<Alert>, SessionError> {
        let services = &mut self.services;
        let effects = match (&mut self.active, event) {
            (ActiveScreen::Home(screen), Event::Home(event)) => match event {
                HomeEvent::EmailChanged(email) => {
                    screen.set_email(email);
                    Vec::new()
                }
                HomeEvent::EmailBlurred => {
                    screen.blur_email();
                    Vec::new()
                }
                HomeEvent::PasswordChanged(password) => {
                    screen.set_password(password);
                    Vec::new()
                }
                HomeEvent::PasswordBlurred => {
                    screen.blur_password();
                    Vec::new()
                }
                HomeEvent::Submit => screen.submit(services)?,
                HomeEvent::OpenRegister => screen.open_register(),
            },
            (ActiveScreen::Register(screen), Event::Register(event)) => match event {
                RegisterEvent::EmailChanged(email) => {
                    screen.set_email(email);
                    Vec::new()
                }
                RegisterEvent::PasswordChanged(password) => {
                    screen.set_password(password);
                    Vec::new()
                }
                RegisterEvent::ConfirmPasswordChanged(confirm) => {
                    screen.set_confirm_password(confirm);
                    Vec::new()
                }
                RegisterEvent::Submit => screen.submit(&services.gateway),
            },
            (ActiveScreen::Tasks(screen), Event::Tasks(event)) => match event {
                TasksEvent::DraftChanged(text) => {
                    screen.set_draft(text);
                    Vec::new()
                }
                TasksEvent::Add => screen.add(services)?,
                TasksEvent::Refresh => screen.refresh(services)?,
                TasksEvent::Toggle(task_id) => screen.toggle(services, &task_id)?,
                TasksEvent::Delete(task_id) => screen.delete(services, &task_id)?,
                TasksEvent::FocusRow(index) => {
                    screen.begin_edit(index);
                    Vec::new()
                }
                TasksEvent::EditChanged(text) => {
                    screen.set_edit_text(text);
                    Vec::new()
                }
                TasksEvent::EditSubmitted => screen.submit_edit(services)?,
                TasksEvent::EditBlurred => {
                    screen.blur_edit();
                    Vec::new()
                }
            },
            (active, event) => {
                tracing::debug!(screen = %active.screen(), ?event, "event for inactive screen ignored");
                Vec::new()
            }
        };
        self.apply(effects)
    }

    fn apply(&mut self, effects: Vec<Effect>) -> Result<Vec<Alert>, SessionError> {
        let mut queue: VecDeque<Effect> = effects.into();
        let mut alerts = Vec::new();
        let mut redirects = 0;

        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Alert(alert) => alerts.push(alert),
                Effect::Navigate(screen) => {
                    redirects += 1;
                    if redirects > MAX_REDIRECTS {
                        tracing::warn!(%screen, "navigation loop detected, staying put");
                        continue;
                    }
                    tracing::debug!(from = %self.active.screen(), to = %screen, "navigating");
                    self.active = ActiveScreen::fresh(screen);
                    let mounted = self.mount()?;
                    // Effects of the new screen run before the remainder of the batch.
                    for effect in mounted.into_iter().rev() {
                        queue.push_front(effect);
                    }
                }
            }
        }
        Ok(alerts)
    }

    fn mount(&mut self) -> Result<Vec<Effect>, SessionError> {
        match &mut self.active {
            ActiveScreen::Home(screen) => screen.on_mount(&self.services.session),
            ActiveScreen::Register(_) => Ok(Vec::new()),
            ActiveScreen::Tasks(screen) => screen.on_mount(&mut self.services),
        }
    }
}
