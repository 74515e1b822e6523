use axum::body::Bytes;
use serde::Deserialize;

/// A file part from a multipart upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Name the browser sent; only its extension is used.
    pub file_name: String,
    pub bytes: Bytes,
}

/// `POST /admin/add_project`
#[derive(Debug, Clone)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
    pub image: ImageUpload,
}

/// `POST /admin/add_client`
#[derive(Debug, Clone)]
pub struct ClientForm {
    pub name: String,
    pub designation: String,
    pub description: String,
    pub image: ImageUpload,
}

/// `POST /subscribe`
#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeForm {
    pub email: String,
}
