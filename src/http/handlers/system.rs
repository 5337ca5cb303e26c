//! Service health and discovery endpoints.

use crate::http::middleware::API_VERSION;
use axum::Json;
use chrono::Utc;
use serde_json::{Value, json};

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "API is running",
        "timestamp": Utc::now().to_rfc3339(),
        "version": API_VERSION,
    }))
}

/// `GET /info`
pub async fn info() -> Json<Value> {
    Json(json!({
        "name": "Task Management API",
        "version": API_VERSION,
        "description": "Task CRUD with an append-only audit trail",
        "endpoints": {
            "tasks": {
                "GET /tasks": "List tasks",
                "GET /tasks/statistics": "Count tasks by status",
                "POST /tasks": "Create a task",
                "GET /tasks/{id}": "Show a task",
                "PUT /tasks/{id}": "Update a task",
                "DELETE /tasks/{id}": "Delete a task",
            },
            "logs": {
                "GET /logs": "List recent logs",
                "GET /logs?id={id}": "Show a log",
                "GET /logs?entity_type={type}&entity_id={id}": "List logs for an entity",
            },
        },
        "authentication": {
            "type": "API Key",
            "header": "X-API-KEY",
            "required_for": ["POST", "PUT", "PATCH", "DELETE"],
        },
    }))
}
