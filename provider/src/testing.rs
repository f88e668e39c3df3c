//! Scripted transport for adapter tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use taskmate_core::{ApiError, HttpRequest, HttpResponse, HttpTransport, TaskApi, TaskClient};

use crate::resource::ProviderData;

pub const TASK_JSON: &str = r#"{"id":12,"title":"Deploy","description":"","due_date":"2024-12-31","priority":"high","status":"pending","created_at":"2024-06-01T10:00:00Z","updated_at":"2024-06-01T10:00:00Z"}"#;

/// Answers requests with queued `(status, body)` pairs, in order, and
/// records every request it sees.
pub struct Scripted {
    responses: Mutex<VecDeque<(u16, String)>>,
    seen: Mutex<Vec<HttpRequest>>,
}

impl Scripted {
    pub fn new(responses: Vec<(u16, &str)>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|(status, body)| (status, body.to_string()))
                    .collect(),
            ),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl HttpTransport for Scripted {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.seen.lock().unwrap().push(request);
        let (status, body) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted transport ran out of responses");
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

/// Provider data wrapping a client that talks to `transport`.
pub fn configured(transport: Arc<Scripted>) -> ProviderData {
    Arc::new(TaskClient::with_transport(
        TaskApi::new("http://api.test", None),
        transport,
    ))
}
