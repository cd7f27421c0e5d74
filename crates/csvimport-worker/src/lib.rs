//! Request/response transport running `parse`/`validate`/`parseAndValidate`
//! on a single background thread, so a host thread never blocks on the
//! engine. Synchronous underneath — `std::thread` plus `std::sync::mpsc`
//! is the minimal equivalent of the transport's message-channel framing,
//! not an async runtime.

#![deny(unsafe_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use csvimport_locale::LocaleRegistry;
use csvimport_model::{ParsedMatrix, Schema};
use csvimport_parser::ParserOptions;
use csvimport_validate::ValidationOutcome;

/// Per-request timeout enforced on the client side.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct ParseRequest {
    pub text: String,
    pub options: ParserOptions,
}

#[derive(Debug, Clone)]
pub struct ValidateRequest {
    pub rows: Vec<Vec<String>>,
    pub schema: Schema,
}

#[derive(Debug, Clone)]
pub struct ParseAndValidateRequest {
    pub text: String,
    pub options: ParserOptions,
    pub schema: Schema,
}

/// A request's payload; the `type` discriminant the spec names is this
/// enum's variant tag.
#[derive(Debug, Clone)]
pub enum RequestPayload {
    Parse(ParseRequest),
    Validate(ValidateRequest),
    ParseAndValidate(ParseAndValidateRequest),
}

#[derive(Debug, Clone)]
pub struct Request {
    pub id: u64,
    pub payload: RequestPayload,
}

#[derive(Debug, Clone)]
pub enum ResponsePayload {
    Parsed(ParsedMatrix),
    Validated(ValidationOutcome),
    ParsedAndValidated {
        matrix: ParsedMatrix,
        validation: ValidationOutcome,
    },
}

#[derive(Debug, Clone)]
pub struct Response {
    pub id: u64,
    pub result: Result<ResponsePayload, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("worker thread is no longer reachable")]
    Disconnected,
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("worker request failed: {0}")]
    Failed(String),
}

fn dispatch(request: Request, registry: &LocaleRegistry) -> Response {
    let result = match request.payload {
        RequestPayload::Parse(req) => {
            let matrix = csvimport_parser::parse(&req.text, &req.options);
            Ok(ResponsePayload::Parsed(matrix))
        }
        RequestPayload::Validate(req) => {
            let result = csvimport_validate::validate_auto(&req.rows, &req.schema, registry);
            Ok(ResponsePayload::Validated(result))
        }
        RequestPayload::ParseAndValidate(req) => {
            let matrix = csvimport_parser::parse(&req.text, &req.options);
            let validation = csvimport_validate::validate_auto(&matrix.rows, &req.schema, registry);
            Ok(ResponsePayload::ParsedAndValidated { matrix, validation })
        }
    };
    Response { id: request.id, result }
}

/// A handle to the one background worker thread. Cloning is not supported;
/// share a handle across callers behind an `Arc` if more than one thread
/// dispatches requests.
pub struct WorkerHandle {
    request_tx: mpsc::Sender<Request>,
    response_rx: Mutex<mpsc::Receiver<Response>>,
    next_id: AtomicU64,
}

impl WorkerHandle {
    /// Spawns the background thread and returns a handle to it.
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = mpsc::channel::<Request>();
        let (response_tx, response_rx) = mpsc::channel::<Response>();

        thread::spawn(move || {
            let registry = csvimport_locale::global();
            for request in request_rx {
                tracing::debug!(id = request.id, "dispatching worker request");
                let response = dispatch(request, registry);
                if response_tx.send(response).is_err() {
                    break;
                }
            }
        });

        Self {
            request_tx,
            response_rx: Mutex::new(response_rx),
            next_id: AtomicU64::new(0),
        }
    }

    /// Sends one request and blocks for its matching response, rejecting
    /// after [`REQUEST_TIMEOUT`].
    pub fn send(&self, payload: RequestPayload) -> Result<ResponsePayload, WorkerError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.request_tx
            .send(Request { id, payload })
            .map_err(|_| WorkerError::Disconnected)?;

        let response_rx = self.response_rx.lock().expect("lock poisoned");
        loop {
            let response = response_rx
                .recv_timeout(REQUEST_TIMEOUT)
                .map_err(|_| WorkerError::Timeout(REQUEST_TIMEOUT))?;
            if response.id != id {
                continue;
            }
            return response.result.map_err(WorkerError::Failed);
        }
    }
}
