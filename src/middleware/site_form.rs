use axum::Form;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::VitrineError;

/// Urlencoded form whose failures come back as [`VitrineError`] JSON
/// instead of axum's plain-text rejection.
#[derive(Debug, Clone)]
pub struct SiteForm<T>(pub T);

impl<S, T> FromRequest<S> for SiteForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = VitrineError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state).await?;
        Ok(SiteForm(value))
    }
}
