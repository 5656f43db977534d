//! Scripted `Transport` used by unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse, Transport};

/// Replays queued outcomes in order and records every request it receives.
/// Running out of outcomes is reported as a transport failure.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    outcomes: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, status: u16, body: &str) {
        self.outcomes
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub(crate) fn fail(&self, message: &str) {
        self.outcomes
            .borrow_mut()
            .push_back(Err(TransportError::new(message)));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    /// Paths of every request seen so far, without the base URL.
    pub(crate) fn endpoints(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|r| {
                r.path
                    .rsplit_once('/')
                    .map(|(_, endpoint)| format!("/{endpoint}"))
                    .unwrap_or_default()
            })
            .collect()
    }

    pub(crate) fn body(&self, index: usize) -> serde_json::Value {
        let requests = self.requests.borrow();
        serde_json::from_str(requests[index].body.as_deref().unwrap_or("null")).unwrap()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no scripted response")))
    }
}
