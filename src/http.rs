use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tracing::error;

use crate::errors::{AppError, AppResult};
use crate::models::{CreateTaskPayload, Task, UpdateTaskPayload};
use crate::service::TaskService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TaskService>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/tasks",
            get(list_tasks)
                .post(create_task)
                .fallback(tasks_method_not_allowed),
        )
        .route(
            "/tasks/{id}",
            get(get_task)
                .put(update_task)
                .delete(delete_task)
                .fallback(task_method_not_allowed),
        )
        .with_state(state)
}

async fn list_tasks(State(state): State<AppState>) -> AppResult<Json<Vec<Task>>> {
    Ok(Json(state.service.list_tasks().await?))
}

async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let Json(payload) = payload.map_err(|_| AppError::Validation("text required".to_string()))?;
    let task = state.service.create_task(&payload.text).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Task>> {
    Ok(Json(state.service.get_task(&id).await?))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskPayload>, JsonRejection>,
) -> AppResult<Json<Task>> {
    let Json(payload) =
        payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    Ok(Json(state.service.update_task(&id, payload).await?))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Task>> {
    Ok(Json(state.service.delete_task(&id).await?))
}

async fn tasks_method_not_allowed() -> AppError {
    AppError::MethodNotAllowed { allow: "GET, POST" }
}

async fn task_method_not_allowed() -> AppError {
    AppError::MethodNotAllowed {
        allow: "GET, PUT, DELETE",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(message) => error_response(StatusCode::BAD_REQUEST, &message),
            AppError::NotFound(message) => error_response(StatusCode::NOT_FOUND, &message),
            AppError::MethodNotAllowed { allow } => {
                let mut response =
                    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response();
                response
                    .headers_mut()
                    .insert(header::ALLOW, HeaderValue::from_static(allow));
                response
            }
            AppError::CorruptStore(_) | AppError::StoreWrite(_) | AppError::Io(_) => {
                // Store-level failures have no repair policy; log the detail
                // and keep the response body generic.
                error!("store failure: {self}");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
