//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`. A
//! `Transport` executes the round-trip in between.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, DeletedCount, Todo, UpdateTodo};

/// Where the server listens unless configured otherwise.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Static segment the server routes to delete-completed; never a todo id.
const COMPLETED_SEGMENT: &str = "completed";

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl Default for TodoClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    /// URL of a single todo. The id is percent-encoded as exactly one path
    /// segment; ids that could address anything but one record are refused.
    fn item(&self, id: &str) -> Result<String, ApiError> {
        if matches!(id, "" | "." | ".." | COMPLETED_SEGMENT) {
            return Err(ApiError::InvalidId(id.to_string()));
        }
        let mut url = reqwest::Url::parse(&self.collection())
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.base_url.clone()))?
            .push(id);
        Ok(url.into())
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        bodyless(HttpMethod::Get, self.collection())
    }

    pub fn build_get_todo(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(bodyless(HttpMethod::Get, self.item(id)?))
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Post, self.collection(), input)
    }

    pub fn build_update_todo(&self, id: &str, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Put, self.item(id)?, input)
    }

    pub fn build_delete_todo(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(bodyless(HttpMethod::Delete, self.item(id)?))
    }

    pub fn build_delete_completed(&self) -> HttpRequest {
        bodyless(HttpMethod::Delete, format!("{}/{COMPLETED_SEGMENT}", self.collection()))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 201)?;
        decode(&response)
    }

    /// The server answers with a confirmation message; only the status matters.
    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }

    pub fn parse_delete_completed(&self, response: HttpResponse) -> Result<u64, ApiError> {
        check_status(&response, 200)?;
        decode::<DeletedCount>(&response).map(|d| d.deleted_count)
    }
}

fn bodyless(method: HttpMethod, path: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn with_json<T: serde::Serialize>(method: HttpMethod, path: String, input: &T) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    if response.status == expected {
        return Ok(());
    }
    match response.status {
        404 => Err(ApiError::NotFound),
        400 => {
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .map(|b| b.message)
                .unwrap_or_else(|_| response.body.clone());
            Err(ApiError::BadRequest { message })
        }
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
