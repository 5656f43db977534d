//! Subcommand execution: each command replays the UI events a user would
//! produce on the corresponding screen.

use std::io::Write;

use anyhow::{bail, Context, Result};
use todoey_core::{
    Alert, Event, HomeEvent, Navigator, RegisterEvent, Screen, SessionStore, Task, TasksEvent,
    Transport,
};

use crate::Command;

pub fn run<T, S, W>(command: Command, nav: &mut Navigator<T, S>, out: &mut W) -> Result<()>
where
    T: Transport,
    S: SessionStore,
    W: Write,
{
    let alerts = nav.start().context("failed to read the stored session")?;
    print_alerts(out, &alerts)?;

    match command {
        Command::Login { email, password } => login(nav, out, email, password),
        Command::Register {
            email,
            password,
            confirm_password,
        } => register(nav, out, email, password, confirm_password),
        Command::List => {
            require_tasks(nav)?;
            print_tasks(out, nav)
        }
        Command::Add { text } => {
            require_tasks(nav)?;
            dispatch(nav, out, Event::Tasks(TasksEvent::DraftChanged(text)))?;
            dispatch(nav, out, Event::Tasks(TasksEvent::Add))?;
            print_tasks(out, nav)
        }
        Command::Toggle { id } => {
            find_row(nav, &id)?;
            dispatch(nav, out, Event::Tasks(TasksEvent::Toggle(id)))?;
            print_tasks(out, nav)
        }
        Command::Delete { id } => {
            find_row(nav, &id)?;
            dispatch(nav, out, Event::Tasks(TasksEvent::Delete(id)))?;
            print_tasks(out, nav)
        }
        Command::Edit { id, text } => {
            let index = find_row(nav, &id)?;
            dispatch(nav, out, Event::Tasks(TasksEvent::FocusRow(index)))?;
            dispatch(nav, out, Event::Tasks(TasksEvent::EditChanged(text)))?;
            dispatch(nav, out, Event::Tasks(TasksEvent::EditSubmitted))?;
            print_tasks(out, nav)
        }
    }
}

fn login<T: Transport, S: SessionStore, W: Write>(
    nav: &mut Navigator<T, S>,
    out: &mut W,
    email: String,
    password: String,
) -> Result<()> {
    if nav.screen() == Screen::Tasks {
        writeln!(out, "Already signed in.")?;
        return print_tasks(out, nav);
    }
    for event in [
        HomeEvent::EmailChanged(email),
        HomeEvent::EmailBlurred,
        HomeEvent::PasswordChanged(password),
        HomeEvent::PasswordBlurred,
    ] {
        dispatch(nav, out, Event::Home(event))?;
    }
    if let Some(form) = nav.login() {
        if !form.is_email_valid() {
            bail!("enter a valid email address");
        }
        if !form.is_password_valid() {
            bail!("password must be at least 6 characters");
        }
    }
    dispatch(nav, out, Event::Home(HomeEvent::Submit))?;
    if nav.screen() != Screen::Tasks {
        bail!("login failed; check your email and password");
    }
    writeln!(out, "Signed in.")?;
    print_tasks(out, nav)
}

fn register<T: Transport, S: SessionStore, W: Write>(
    nav: &mut Navigator<T, S>,
    out: &mut W,
    email: String,
    password: String,
    confirm_password: String,
) -> Result<()> {
    nav.navigate(Screen::Register)
        .context("failed to open the registration screen")?;
    for event in [
        RegisterEvent::EmailChanged(email),
        RegisterEvent::PasswordChanged(password),
        RegisterEvent::ConfirmPasswordChanged(confirm_password),
    ] {
        dispatch(nav, out, Event::Register(event))?;
    }
    let alerts = dispatch(nav, out, Event::Register(RegisterEvent::Submit))?;
    if !alerts.contains(&Alert::Registered) {
        bail!("registration failed");
    }
    writeln!(out, "Run `todoey login` to sign in.")?;
    Ok(())
}

fn dispatch<T: Transport, S: SessionStore, W: Write>(
    nav: &mut Navigator<T, S>,
    out: &mut W,
    event: Event,
) -> Result<Vec<Alert>> {
    let alerts = nav.handle(event).context("session storage failed")?;
    print_alerts(out, &alerts)?;
    Ok(alerts)
}

fn require_tasks<T: Transport, S: SessionStore>(nav: &Navigator<T, S>) -> Result<()> {
    if nav.screen() != Screen::Tasks {
        bail!("not signed in; run `todoey login` first");
    }
    Ok(())
}

/// Position of task `id` in the list currently shown.
fn find_row<T: Transport, S: SessionStore>(nav: &Navigator<T, S>, id: &str) -> Result<usize> {
    require_tasks(nav)?;
    let tasks = nav.tasks().map(|screen| screen.tasks()).unwrap_or_default();
    match tasks.iter().position(|task| task.id == id) {
        Some(index) => Ok(index),
        None => bail!("no task with id {id}"),
    }
}

fn print_alerts<W: Write>(out: &mut W, alerts: &[Alert]) -> Result<()> {
    for alert in alerts {
        writeln!(out, "{alert}")?;
    }
    Ok(())
}

fn print_tasks<T: Transport, S: SessionStore, W: Write>(
    out: &mut W,
    nav: &Navigator<T, S>,
) -> Result<()> {
    let tasks = nav.tasks().map(|screen| screen.tasks()).unwrap_or_default();
    if tasks.is_empty() {
        writeln!(out, "No tasks yet.")?;
        return Ok(());
    }
    for task in tasks {
        writeln!(out, "{}", format_task(task))?;
    }
    Ok(())
}

fn format_task(task: &Task) -> String {
    let mark = if task.is_done { "x" } else { " " };
    format!("[{mark}] {}  ({})", task.text, task.id)
}
