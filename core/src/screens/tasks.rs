//! Task list screen.
//!
//! # Design
//! The local list is a read-only mirror of the server: every successful
//! mutation is followed by a full refetch that replaces it wholesale. The only
//! local write is the append after `add`, which the refetch immediately
//! supersedes.
//!
//! List fetches carry a `ListToken`. A completion is applied only if its token
//! is newer than the last one applied, so a slow response can never overwrite
//! fresher data. Hosts that run requests concurrently use `begin_refresh` and
//! `finish_refresh` directly; `refresh` does both in one blocking call.

use crate::client::TodoeyClient;
use crate::error::{ApiError, SessionError};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::session::SessionStore;
use crate::types::{SessionId, Task};

use super::{Alert, Effect, Screen, Services};

/// Monotonic sequence number of a list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ListToken(u64);

/// A list fetch that has been issued but not yet applied.
#[derive(Debug, Clone)]
pub struct PendingList {
    pub token: ListToken,
    pub request: HttpRequest,
}

/// Edit state of the task rows. At most one row is edited at a time.
///
/// `index` follows the task across refetches; `task_id` is what the edit is
/// sent to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RowState {
    #[default]
    Idle,
    Editing {
        index: usize,
        task_id: String,
        text: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct TasksScreen {
    draft: String,
    tasks: Vec<Task>,
    row: RowState,
    issued: u64,
    applied: u64,
}

impl TasksScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn row_state(&self) -> &RowState {
        &self.row
    }

    pub fn on_mount<T: Transport, S: SessionStore>(
        &mut self,
        services: &mut Services<T, S>,
    ) -> Result<Vec<Effect>, SessionError> {
        self.refresh(services)
    }

    /// Fetch the full list and replace the local mirror.
    pub fn refresh<T: Transport, S: SessionStore>(
        &mut self,
        services: &mut Services<T, S>,
    ) -> Result<Vec<Effect>, SessionError> {
        let Some(user) = current_user(&services.session)? else {
            return Ok(vec![Effect::Navigate(Screen::Home)]);
        };
        let pending = match self.begin_refresh(services.gateway.client(), &user) {
            Ok(pending) => pending,
            Err(e) => {
                tracing::warn!(error = %e, "could not build task list request");
                return Ok(Vec::new());
            }
        };
        let outcome = services.gateway.send(pending.request);
        Ok(self.finish_refresh(services.gateway.client(), pending.token, outcome))
    }

    pub fn begin_refresh(
        &mut self,
        client: &TodoeyClient,
        user: &SessionId,
    ) -> Result<PendingList, ApiError> {
        let request = client.build_list_tasks(user)?;
        self.issued += 1;
        Ok(PendingList {
            token: ListToken(self.issued),
            request,
        })
    }

    pub fn finish_refresh(
        &mut self,
        client: &TodoeyClient,
        token: ListToken,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Vec<Effect> {
        if token.0 <= self.applied {
            tracing::debug!(token = token.0, applied = self.applied, "discarding stale task list");
            return Vec::new();
        }
        match outcome.and_then(|response| client.parse_list_tasks(response)) {
            Ok(tasks) => {
                self.applied = token.0;
                self.tasks = tasks;
                self.follow_edited_row();
                Vec::new()
            }
            Err(ApiError::Transport(e)) => {
                tracing::warn!(error = %e, "loading tasks failed");
                vec![Effect::Alert(Alert::LoadFailed)]
            }
            Err(e) => {
                tracing::warn!(error = %e, "loading tasks rejected");
                Vec::new()
            }
        }
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Create a task from the draft. An empty draft does nothing.
    pub fn add<T: Transport, S: SessionStore>(
        &mut self,
        services: &mut Services<T, S>,
    ) -> Result<Vec<Effect>, SessionError> {
        if self.draft.is_empty() {
            return Ok(Vec::new());
        }
        let Some(user) = current_user(&services.session)? else {
            return Ok(vec![Effect::Navigate(Screen::Home)]);
        };
        match services.gateway.add_task(&user, &self.draft) {
            Ok(created) => {
                self.tasks.push(created.into());
                self.draft.clear();
                self.refresh(services)
            }
            Err(ApiError::Status { status, .. }) => {
                tracing::debug!(status, "add task rejected");
                Ok(Vec::new())
            }
            Err(e) => {
                tracing::warn!(error = %e, "add task failed");
                Ok(Vec::new())
            }
        }
    }

    /// Flip the done flag of a task on the server.
    pub fn toggle<T: Transport, S: SessionStore>(
        &mut self,
        services: &mut Services<T, S>,
        task_id: &str,
    ) -> Result<Vec<Effect>, SessionError> {
        match services.gateway.toggle_task(task_id) {
            Ok(()) => self.refresh(services),
            Err(e) => {
                tracing::warn!(task_id, error = %e, "toggle task failed");
                Ok(Vec::new())
            }
        }
    }

    pub fn delete<T: Transport, S: SessionStore>(
        &mut self,
        services: &mut Services<T, S>,
        task_id: &str,
    ) -> Result<Vec<Effect>, SessionError> {
        match services.gateway.delete_task(task_id) {
            Ok(()) => self.refresh(services),
            Err(e) => {
                tracing::warn!(task_id, error = %e, "delete task failed");
                Ok(Vec::new())
            }
        }
    }

    /// Focus a row for inline editing, seeded with its current text.
    pub fn begin_edit(&mut self, index: usize) {
        match self.tasks.get(index) {
            Some(task) => {
                self.row = RowState::Editing {
                    index,
                    task_id: task.id.clone(),
                    text: task.text.clone(),
                };
            }
            None => tracing::debug!(index, "edit requested for missing row"),
        }
    }

    pub fn set_edit_text(&mut self, new_text: impl Into<String>) {
        if let RowState::Editing { text, .. } = &mut self.row {
            *text = new_text.into();
        }
    }

    /// Leave edit mode without saving.
    pub fn blur_edit(&mut self) {
        self.row = RowState::Idle;
    }

    /// Leave edit mode and send the edited text to the server.
    pub fn submit_edit<T: Transport, S: SessionStore>(
        &mut self,
        services: &mut Services<T, S>,
    ) -> Result<Vec<Effect>, SessionError> {
        let RowState::Editing { task_id, text, .. } = std::mem::take(&mut self.row) else {
            return Ok(Vec::new());
        };
        if !self.tasks.iter().any(|task| task.id == task_id) {
            tracing::debug!(task_id = %task_id, "edited task is gone");
            return Ok(Vec::new());
        }
        match services.gateway.edit_task(&task_id, &text) {
            Ok(()) => self.refresh(services),
            Err(e) => {
                tracing::warn!(task_id = %task_id, error = %e, "edit task failed");
                Ok(Vec::new())
            }
        }
    }

    /// Re-point the edited row at its task after the list changed, or drop
    /// the edit when the task is gone.
    fn follow_edited_row(&mut self) {
        let RowState::Editing { index, task_id, .. } = &mut self.row else {
            return;
        };
        match self.tasks.iter().position(|task| task.id == *task_id) {
            Some(position) => *index = position,
            None => self.row = RowState::Idle,
        }
    }
}

fn current_user<S: SessionStore>(session: &S) -> Result<Option<SessionId>, SessionError> {
    let user = session.get()?;
    if user.is_none() {
        tracing::warn!("no stored session on the task screen");
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::{services, signed_in};
    use crate::testing::ScriptedTransport;

    const ONE_TASK: &str = r#"[{"id":"t1","text":"Walk dog","isDone":false,"userId":"u1"}]"#;

    fn task(id: &str, text: &str, is_done: bool) -> Task {
        Task {
            id: id.to_string(),
            text: text.to_string(),
            is_done,
            user_id: "u1".to_string(),
        }
    }

    fn loaded(transport: &ScriptedTransport) -> TasksScreen {
        transport.respond(200, ONE_TASK);
        let mut screen = TasksScreen::new();
        screen.on_mount(&mut signed_in(transport, "u1")).unwrap();
        screen
    }

    #[test]
    fn mount_loads_list_for_current_user() {
        let transport = ScriptedTransport::new();
        let screen = loaded(&transport);
        assert_eq!(screen.tasks(), &[task("t1", "Walk dog", false)]);
        assert_eq!(transport.endpoints(), vec!["/tasksById"]);
        assert_eq!(transport.body(0), serde_json::json!({ "userId": "u1" }));
    }

    #[test]
    fn mount_without_session_returns_home() {
        let transport = ScriptedTransport::new();
        let effects = TasksScreen::new().on_mount(&mut services(&transport)).unwrap();
        assert_eq!(effects, vec![Effect::Navigate(Screen::Home)]);
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn load_failure_over_network_alerts_and_keeps_list() {
        let transport = ScriptedTransport::new();
        let mut screen = loaded(&transport);
        transport.fail("offline");
        let effects = screen.refresh(&mut signed_in(&transport, "u1")).unwrap();
        assert_eq!(effects, vec![Effect::Alert(Alert::LoadFailed)]);
        assert_eq!(screen.tasks().len(), 1);
    }

    #[test]
    fn load_rejection_is_silent() {
        let transport = ScriptedTransport::new();
        let mut screen = loaded(&transport);
        transport.respond(500, "boom");
        assert!(screen.refresh(&mut signed_in(&transport, "u1")).unwrap().is_empty());
        assert_eq!(screen.tasks().len(), 1);
    }

    #[test]
    fn add_is_superseded_by_refetch() {
        let transport = ScriptedTransport::new();
        let mut screen = loaded(&transport);
        transport.respond(200, r#"{"id":"t2","task":"Buy milk","userId":"u1"}"#);
        transport.respond(
            200,
            r#"[{"id":"t1","text":"Walk dog","isDone":false,"userId":"u1"},
                {"id":"t2","text":"Buy milk","isDone":false,"userId":"u1"}]"#,
        );

        screen.set_draft("Buy milk");
        let effects = screen.add(&mut signed_in(&transport, "u1")).unwrap();

        assert!(effects.is_empty());
        assert_eq!(
            screen.tasks(),
            &[task("t1", "Walk dog", false), task("t2", "Buy milk", false)]
        );
        assert_eq!(screen.draft(), "");
        assert_eq!(
            transport.endpoints(),
            vec!["/tasksById", "/addTaskById", "/tasksById"]
        );
        assert_eq!(transport.body(1), serde_json::json!({ "userId": "u1", "text": "Buy milk" }));
    }

    #[test]
    fn empty_draft_is_ignored() {
        let transport = ScriptedTransport::new();
        let mut screen = loaded(&transport);
        assert!(screen.add(&mut signed_in(&transport, "u1")).unwrap().is_empty());
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn rejected_add_keeps_draft() {
        let transport = ScriptedTransport::new();
        let mut screen = loaded(&transport);
        transport.respond(500, "");
        screen.set_draft("Buy milk");
        assert!(screen.add(&mut signed_in(&transport, "u1")).unwrap().is_empty());
        assert_eq!(screen.draft(), "Buy milk");
        assert_eq!(screen.tasks().len(), 1);
    }

    #[test]
    fn toggle_and_delete_refetch() {
        let transport = ScriptedTransport::new();
        let mut screen = loaded(&transport);
        let mut services = signed_in(&transport, "u1");

        transport.respond(200, "{}");
        transport.respond(200, r#"[{"id":"t1","text":"Walk dog","isDone":true,"userId":"u1"}]"#);
        screen.toggle(&mut services, "t1").unwrap();
        assert!(screen.tasks()[0].is_done);

        transport.respond(200, "{}");
        transport.respond(200, "[]");
        screen.delete(&mut services, "t1").unwrap();
        assert!(screen.tasks().is_empty());

        assert_eq!(transport.body(1), serde_json::json!({ "taskId": "t1" }));
        assert_eq!(transport.requests()[3].method, crate::http::HttpMethod::Delete);
    }

    #[test]
    fn failed_mutation_skips_refetch() {
        let transport = ScriptedTransport::new();
        let mut screen = loaded(&transport);
        transport.respond(404, "");
        assert!(screen
            .toggle(&mut signed_in(&transport, "u1"), "missing")
            .unwrap()
            .is_empty());
        assert_eq!(transport.endpoints(), vec!["/tasksById", "/toggleTaskStatusById"]);
    }

    #[test]
    fn submitted_edit_is_sent_and_refetched() {
        let transport = ScriptedTransport::new();
        let mut screen = loaded(&transport);
        screen.begin_edit(0);
        assert_eq!(
            screen.row_state(),
            &RowState::Editing {
                index: 0,
                task_id: "t1".to_string(),
                text: "Walk dog".to_string()
            }
        );
        screen.set_edit_text("Walk cat");

        transport.respond(200, "{}");
        transport.respond(200, r#"[{"id":"t1","text":"Walk cat","isDone":false,"userId":"u1"}]"#);
        screen.submit_edit(&mut signed_in(&transport, "u1")).unwrap();

        assert_eq!(screen.row_state(), &RowState::Idle);
        assert_eq!(screen.tasks()[0].text, "Walk cat");
        assert_eq!(transport.body(1), serde_json::json!({ "taskId": "t1", "text": "Walk cat" }));
    }

    #[test]
    fn blurred_edit_is_discarded() {
        let transport = ScriptedTransport::new();
        let mut screen = loaded(&transport);
        screen.begin_edit(0);
        screen.set_edit_text("Never sent");
        screen.blur_edit();
        assert_eq!(screen.row_state(), &RowState::Idle);
        assert!(screen.submit_edit(&mut signed_in(&transport, "u1")).unwrap().is_empty());
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(screen.tasks()[0].text, "Walk dog");
    }

    #[test]
    fn edit_of_missing_row_is_ignored() {
        let transport = ScriptedTransport::new();
        let mut screen = loaded(&transport);
        screen.begin_edit(5);
        assert_eq!(screen.row_state(), &RowState::Idle);
    }

    #[test]
    fn stale_list_response_is_discarded() {
        let client = TodoeyClient::new("http://api.test");
        let user = SessionId::new("u1");
        let mut screen = TasksScreen::new();

        let older = screen.begin_refresh(&client, &user).unwrap();
        let newer = screen.begin_refresh(&client, &user).unwrap();
        assert!(older.token < newer.token);

        screen.finish_refresh(&client, newer.token, Ok(HttpResponse::new(200, "[]")));
        screen.finish_refresh(&client, older.token, Ok(HttpResponse::new(200, ONE_TASK)));
        assert!(screen.tasks().is_empty());
    }

    #[test]
    fn failed_newer_fetch_does_not_block_older_success() {
        let client = TodoeyClient::new("http://api.test");
        let user = SessionId::new("u1");
        let mut screen = TasksScreen::new();

        let older = screen.begin_refresh(&client, &user).unwrap();
        let newer = screen.begin_refresh(&client, &user).unwrap();

        screen.finish_refresh(&client, newer.token, Ok(HttpResponse::new(500, "")));
        screen.finish_refresh(&client, older.token, Ok(HttpResponse::new(200, ONE_TASK)));
        assert_eq!(screen.tasks().len(), 1);
    }

    #[test]
    fn shrinking_list_ends_edit_of_vanished_row() {
        let transport = ScriptedTransport::new();
        let mut screen = loaded(&transport);
        screen.begin_edit(0);
        transport.respond(200, "[]");
        screen.refresh(&mut signed_in(&transport, "u1")).unwrap();
        assert_eq!(screen.row_state(), &RowState::Idle);
    }

    #[test]
    fn edit_follows_its_task_when_rows_shift() {
        let transport = ScriptedTransport::new();
        transport.respond(
            200,
            r#"[{"id":"t1","text":"one","isDone":false,"userId":"u1"},
                {"id":"t2","text":"two","isDone":false,"userId":"u1"},
                {"id":"t3","text":"three","isDone":false,"userId":"u1"}]"#,
        );
        let mut services = signed_in(&transport, "u1");
        let mut screen = TasksScreen::new();
        screen.on_mount(&mut services).unwrap();

        screen.begin_edit(1);
        screen.set_edit_text("two edited");

        transport.respond(200, "{}");
        transport.respond(
            200,
            r#"[{"id":"t2","text":"two","isDone":false,"userId":"u1"},
                {"id":"t3","text":"three","isDone":false,"userId":"u1"}]"#,
        );
        screen.delete(&mut services, "t1").unwrap();
        assert_eq!(
            screen.row_state(),
            &RowState::Editing {
                index: 0,
                task_id: "t2".to_string(),
                text: "two edited".to_string()
            }
        );

        transport.respond(200, "{}");
        transport.respond(200, "[]");
        screen.submit_edit(&mut services).unwrap();
        assert_eq!(
            transport.body(3),
            serde_json::json!({ "taskId": "t2", "text": "two edited" })
        );
    }

    #[test]
    fn edit_ends_when_its_task_is_deleted_elsewhere() {
        let transport = ScriptedTransport::new();
        transport.respond(
            200,
            r#"[{"id":"t1","text":"one","isDone":false,"userId":"u1"},
                {"id":"t2","text":"two","isDone":false,"userId":"u1"}]"#,
        );
        let mut services = signed_in(&transport, "u1");
        let mut screen = TasksScreen::new();
        screen.on_mount(&mut services).unwrap();
        screen.begin_edit(0);

        transport.respond(200, r#"[{"id":"t2","text":"two","isDone":false,"userId":"u1"}]"#);
        screen.refresh(&mut services).unwrap();

        assert_eq!(screen.row_state(), &RowState::Idle);
        assert!(screen.submit_edit(&mut services).unwrap().is_empty());
        assert_eq!(transport.endpoints(), vec!["/tasksById", "/tasksById"]);
    }
}
