//! In-memory backend speaking the REST contract, for driving clients and
//! editors without a network.

use serde_json::Value;
use shared::client::{ApiRequest, ApiResponse, ClientError, Method, ResourceClient, Transport};
use shared::editor::{Editable, Editor};
use shared::lookup::fetch_lookup;
use shared::{ApiConfig, Resource, ResourceKind};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub const BASE_URL: &str = "http://backend.test/api";

pub fn config() -> ApiConfig {
    ApiConfig::new(BASE_URL)
}

#[derive(Default)]
struct State {
    tables: HashMap<String, Vec<Value>>,
    next_id: i64,
    requests: Vec<ApiRequest>,
    failures: HashMap<(Method, String), ApiResponse>,
    offline: bool,
}

/// Records every request and assigns ids 1, 2, 3... to created records.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Rc<RefCell<State>>,
}

#[allow(dead_code)]
impl FakeBackend {
    pub fn new() -> Self {
        let backend = FakeBackend::default();
        backend.state.borrow_mut().next_id = 1;
        backend
    }

    /// Stores records as-is; ids must already be present.
    pub fn seed(&self, kind: ResourceKind, records: Vec<Value>) {
        let mut state = self.state.borrow_mut();
        for record in &records {
            if let Some(id) = record.get(kind.key()).and_then(Value::as_i64) {
                state.next_id = state.next_id.max(id + 1);
            }
        }
        state.tables.insert(kind.path().to_string(), records);
    }

    /// Answers `method` on `path` (e.g. "personas" or "personas/3") with an error status.
    pub fn fail(&self, method: Method, path: &str, status: u16, status_text: &str, body: &str) {
        self.state.borrow_mut().failures.insert(
            (method, path.to_string()),
            ApiResponse {
                status,
                status_text: status_text.to_string(),
                body: body.to_string(),
            },
        );
    }

    pub fn go_offline(&self) {
        self.state.borrow_mut().offline = true;
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.borrow().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.borrow().requests.len()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.state
            .borrow()
            .requests
            .last()
            .cloned()
            .expect("no request was sent")
    }

    pub fn table(&self, kind: ResourceKind) -> Vec<Value> {
        self.state
            .borrow()
            .tables
            .get(kind.path())
            .cloned()
            .unwrap_or_default()
    }

    pub fn client<R: Resource>(&self) -> ResourceClient<R, FakeBackend> {
        ResourceClient::new(config(), self.clone())
    }
}

impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let mut state = self.state.borrow_mut();
        state.requests.push(request.clone());
        if state.offline {
            return Err(ClientError::Transport("connection refused".to_string()));
        }

        let path = request
            .url
            .strip_prefix(BASE_URL)
            .unwrap_or(&request.url)
            .trim_start_matches('/')
            .to_string();
        if let Some(failure) = state.failures.get(&(request.method, path.clone())) {
            return Ok(failure.clone());
        }

        let mut parts = path.splitn(2, '/');
        let resource = parts.next().unwrap_or_default().to_string();
        let id = parts.next().map(str::to_string);
        let key = match ResourceKind::from_path(&resource) {
            Some(kind) => kind.key(),
            None => return Ok(not_found()),
        };

        match (request.method, id) {
            (Method::Get, None) => {
                let rows = state.tables.get(&resource).cloned().unwrap_or_default();
                Ok(ok(200, Value::Array(rows)))
            }
            (Method::Get, Some(id)) => {
                let table = state.tables.get(&resource).cloned().unwrap_or_default();
                match table.into_iter().find(|row| id_text(&row[key]) == id) {
                    Some(row) => Ok(ok(200, row)),
                    None => Ok(not_found()),
                }
            }
            (Method::Post, None) => {
                let assigned = state.next_id;
                state.next_id += 1;
                let mut record = request.body.unwrap_or(Value::Null);
                record[key] = Value::from(assigned);
                state
                    .tables
                    .entry(resource)
                    .or_default()
                    .push(record.clone());
                Ok(ok(201, record))
            }
            (Method::Put, Some(id)) => {
                let table = state.tables.entry(resource).or_default();
                match table.iter_mut().find(|row| id_text(&row[key]) == id) {
                    Some(row) => {
                        let stored_id = row[key].clone();
                        let mut record = request.body.unwrap_or(Value::Null);
                        record[key] = stored_id;
                        *row = record.clone();
                        Ok(ok(200, record))
                    }
                    None => Ok(not_found()),
                }
            }
            (Method::Delete, Some(id)) => {
                let table = state.tables.entry(resource).or_default();
                let before = table.len();
                table.retain(|row| id_text(&row[key]) != id);
                if table.len() < before {
                    Ok(ApiResponse {
                        status: 204,
                        status_text: "No Content".to_string(),
                        body: String::new(),
                    })
                } else {
                    Ok(not_found())
                }
            }
            _ => Ok(ApiResponse {
                status: 405,
                status_text: "Method Not Allowed".to_string(),
                body: String::new(),
            }),
        }
    }
}

fn id_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn ok(status: u16, body: Value) -> ApiResponse {
    ApiResponse {
        status,
        status_text: if status == 201 { "Created" } else { "OK" }.to_string(),
        body: body.to_string(),
    }
}

fn not_found() -> ApiResponse {
    ApiResponse {
        status: 404,
        status_text: "Not Found".to_string(),
        body: r#"{"error":"not found"}"#.to_string(),
    }
}

/// Mounts an editor the way the client does: primary list plus every
/// dependency list.
#[allow(dead_code)]
pub async fn mount<R: Editable>(backend: &FakeBackend) -> Editor<R> {
    let mut editor = Editor::<R>::new();
    editor.loaded(backend.client::<R>().list_all().await);
    for dependency in R::DEPENDENCIES {
        let result = fetch_lookup(&config(), backend.clone(), *dependency).await;
        editor.lookup_loaded(*dependency, result);
    }
    editor
}

/// Submits the open form and applies the outcome. `None` when nothing was
/// sent or the save failed.
#[allow(dead_code)]
pub async fn submit<R: Editable>(editor: &mut Editor<R>, backend: &FakeBackend) -> Option<&'static str> {
    let submission = editor.submit()?;
    let result = backend.client::<R>().submit(&submission).await;
    editor.saved(submission.is_update(), result)
}

/// Confirms the pending delete and applies the outcome.
#[allow(dead_code)]
pub async fn confirm_delete<R: Editable>(editor: &mut Editor<R>, backend: &FakeBackend) -> Option<&'static str> {
    let id = editor.confirm_delete()?;
    let result = backend.client::<R>().delete(&id).await;
    editor.deleted(&id, result)
}
