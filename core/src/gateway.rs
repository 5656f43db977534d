//! One-call-per-endpoint facade over `TodoeyClient` and a `Transport`.
//!
//! Screen controllers talk to the backend only through `Gateway`. Each method
//! builds the request, executes it, and parses the response.

use crate::client::TodoeyClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{CreatedTask, Credentials, SessionId, Task};

#[derive(Debug, Clone)]
pub struct Gateway<T> {
    client: TodoeyClient,
    transport: T,
}

impl<T: Transport> Gateway<T> {
    pub fn new(client: TodoeyClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TodoeyClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute a prebuilt request.
    pub fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let response = self.transport.execute(request)?;
        tracing::debug!(status = response.status, "received response");
        Ok(response)
    }

    pub fn login(&self, credentials: &Credentials) -> Result<SessionId, ApiError> {
        let response = self.send(self.client.build_login(credentials)?)?;
        self.client.parse_login(response)
    }

    pub fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let response = self.send(self.client.build_register(credentials)?)?;
        self.client.parse_register(response)
    }

    pub fn list_tasks(&self, user: &SessionId) -> Result<Vec<Task>, ApiError> {
        let response = self.send(self.client.build_list_tasks(user)?)?;
        self.client.parse_list_tasks(response)
    }

    pub fn add_task(&self, user: &SessionId, text: &str) -> Result<CreatedTask, ApiError> {
        let response = self.send(self.client.build_add_task(user, text)?)?;
        self.client.parse_add_task(response)
    }

    pub fn delete_task(&self, task_id: &str) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_task(task_id)?)?;
        self.client.parse_delete_task(response)
    }

    pub fn toggle_task(&self, task_id: &str) -> Result<(), ApiError> {
        let response = self.send(self.client.build_toggle_task(task_id)?)?;
        self.client.parse_toggle_task(response)
    }

    pub fn edit_task(&self, task_id: &str, text: &str) -> Result<(), ApiError> {
        let response = self.send(self.client.build_edit_task(task_id, text)?)?;
        self.client.parse_edit_task(response)
    }
}
