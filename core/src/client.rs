//! Stateless HTTP request builder and response parser for the Todoey API.
//!
//! # Design
//! `TodoeyClient` holds only a `base_url`. Each endpoint is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. The backend only promises "200 means success",
//! so every parser checks for exactly 200 and treats everything else alike.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    CreatedTask, Credentials, LoginResponse, NewTask, SessionId, Task, TaskEdit, TaskRef, UserRef,
};

const OK: u16 = 200;

/// Synchronous, stateless client for the Todoey API.
#[derive(Debug, Clone)]
pub struct TodoeyClient {
    base_url: String,
}

impl TodoeyClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_login(&self, credentials: &Credentials) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/login", credentials)
    }

    pub fn build_register(&self, credentials: &Credentials) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/register", credentials)
    }

    pub fn build_list_tasks(&self, user: &SessionId) -> Result<HttpRequest, ApiError> {
        self.json_request(
            HttpMethod::Post,
            "/tasksById",
            &UserRef {
                user_id: user.as_str(),
            },
        )
    }

    pub fn build_add_task(&self, user: &SessionId, text: &str) -> Result<HttpRequest, ApiError> {
        self.json_request(
            HttpMethod::Post,
            "/addTaskById",
            &NewTask {
                user_id: user.as_str(),
                text,
            },
        )
    }

    pub fn build_delete_task(&self, task_id: &str) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Delete, "/deleteTaskById", &TaskRef { task_id })
    }

    pub fn build_toggle_task(&self, task_id: &str) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, "/toggleTaskStatusById", &TaskRef { task_id })
    }

    pub fn build_edit_task(&self, task_id: &str, text: &str) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, "/editTaskById", &TaskEdit { task_id, text })
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<SessionId, ApiError> {
        let body: LoginResponse = parse_json(response)?;
        Ok(body.id)
    }

    /// Registration carries no payload the client uses.
    pub fn parse_register(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, ApiError> {
        parse_json(response)
    }

    pub fn parse_add_task(&self, response: HttpResponse) -> Result<CreatedTask, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_toggle_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_edit_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn json_request<B: Serialize>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: format!("{}{endpoint}", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![
        ("accept".to_string(), "application/json".to_string()),
        ("content-type".to_string(), "application/json".to_string()),
    ]
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.status == OK {
        return Ok(());
    }
    Err(ApiError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoeyClient {
        TodoeyClient::new("http://localhost:3000")
    }

    fn body_of(req: &HttpRequest) -> serde_json::Value {
        serde_json::from_str(req.body.as_deref().unwrap()).unwrap()
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "user@example.com".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[test]
    fn build_login_posts_credentials() {
        let req = client().build_login(&credentials()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/login");
        assert_eq!(req.headers, json_headers());
        let body = body_of(&req);
        assert_eq!(body["email"], "user@example.com");
        assert_eq!(body["password"], "secret1");
    }

    #[test]
    fn build_register_posts_credentials() {
        let req = client().build_register(&credentials()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/register");
        assert_eq!(req.headers, json_headers());
    }

    #[test]
    fn build_list_tasks_sends_user_id() {
        let req = client().build_list_tasks(&SessionId::new("u1")).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/tasksById");
        assert_eq!(body_of(&req), serde_json::json!({ "userId": "u1" }));
    }

    #[test]
    fn build_add_task_sends_user_and_text() {
        let req = client().build_add_task(&SessionId::new("u1"), "Buy milk").unwrap();
        assert_eq!(req.path, "http://localhost:3000/addTaskById");
        assert_eq!(body_of(&req), serde_json::json!({ "userId": "u1", "text": "Buy milk" }));
    }

    #[test]
    fn mutations_use_expected_methods() {
        let c = client();
        let delete = c.build_delete_task("t1").unwrap();
        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.path, "http://localhost:3000/deleteTaskById");
        assert_eq!(body_of(&delete), serde_json::json!({ "taskId": "t1" }));

        let toggle = c.build_toggle_task("t1").unwrap();
        assert_eq!(toggle.method, HttpMethod::Put);
        assert_eq!(toggle.path, "http://localhost:3000/toggleTaskStatusById");

        let edit = c.build_edit_task("t1", "Walk cat").unwrap();
        assert_eq!(edit.method, HttpMethod::Put);
        assert_eq!(edit.path, "http://localhost:3000/editTaskById");
        assert_eq!(body_of(&edit), serde_json::json!({ "taskId": "t1", "text": "Walk cat" }));
    }

    #[test]
    fn parse_login_extracts_session_id() {
        let id = client()
            .parse_login(HttpResponse::new(200, r#"{"id":"abc123"}"#))
            .unwrap();
        assert_eq!(id, SessionId::new("abc123"));
    }

    #[test]
    fn parse_login_rejects_any_non_200() {
        for status in [201, 401, 404, 500] {
            let err = client()
                .parse_login(HttpResponse::new(status, r#"{"id":"abc123"}"#))
                .unwrap_err();
            assert_eq!(err.status(), Some(status));
        }
    }

    #[test]
    fn parse_list_tasks_reads_camel_case_fields() {
        let body = r#"[{"id":"t1","text":"Test","isDone":true,"userId":"u1"}]"#;
        let tasks = client().parse_list_tasks(HttpResponse::new(200, body)).unwrap();
        assert_eq!(
            tasks,
            vec![Task {
                id: "t1".to_string(),
                text: "Test".to_string(),
                is_done: true,
                user_id: "u1".to_string(),
            }]
        );
    }

    #[test]
    fn parse_list_tasks_bad_json() {
        let err = client()
            .parse_list_tasks(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_add_task_converts_to_pending_task() {
        let created = client()
            .parse_add_task(HttpResponse::new(200, r#"{"id":"t9","task":"New","userId":"u1"}"#))
            .unwrap();
        let task = Task::from(created);
        assert_eq!(task.text, "New");
        assert!(!task.is_done);
    }

    #[test]
    fn mutation_parsers_ignore_body() {
        let c = client();
        assert!(c.parse_delete_task(HttpResponse::new(200, "")).is_ok());
        assert!(c.parse_toggle_task(HttpResponse::new(200, "whatever")).is_ok());
        assert!(c.parse_edit_task(HttpResponse::new(200, "{}")).is_ok());
        let err = c.parse_edit_task(HttpResponse::new(404, "missing")).unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
    }

    #[test]
    fn parse_register_failure_keeps_body() {
        let err = client()
            .parse_register(HttpResponse::new(400, "Email already exists"))
            .unwrap_err();
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "Email already exists");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoeyClient::new("http://localhost:3000/");
        let req = client.build_toggle_task("t1").unwrap();
        assert_eq!(req.path, "http://localhost:3000/toggleTaskStatusById");
    }
}
