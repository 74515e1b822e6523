use axum::{Json, extract::State, http::StatusCode};

use crate::db::{Client, Project};
use crate::types::{AdminDashboard, ClientForm, ProjectForm};
use crate::{VitrineError, router::VitrineState};

/// GET /admin -> contact messages and subscribers.
pub async fn dashboard(
    State(state): State<VitrineState>,
) -> Result<Json<AdminDashboard>, VitrineError> {
    Ok(Json(state.content.admin_dashboard().await?))
}

/// POST /admin/add_project (multipart: name, description, image)
pub async fn add_project(
    State(state): State<VitrineState>,
    form: ProjectForm,
) -> Result<(StatusCode, Json<Project>), VitrineError> {
    let project = state.content.add_project(form).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// POST /admin/add_client (multipart: name, designation, description, image)
pub async fn add_client(
    State(state): State<VitrineState>,
    form: ClientForm,
) -> Result<(StatusCode, Json<Client>), VitrineError> {
    let client = state.content.add_client(form).await?;
    Ok((StatusCode::CREATED, Json(client)))
}
