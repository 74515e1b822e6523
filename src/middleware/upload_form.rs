use axum::extract::{FromRequest, Multipart, Request};
use std::collections::HashMap;

use crate::error::VitrineError;
use crate::types::{ClientForm, ImageUpload, ProjectForm};

/// Multipart field carrying the uploaded picture.
pub const IMAGE_FIELD: &str = "image";

/// Text parts plus the single image part of an admin upload form.
///
/// When a name repeats, the first part wins.
#[derive(Debug, Default)]
pub struct UploadFields {
    texts: HashMap<String, String>,
    image: Option<ImageUpload>,
}

impl UploadFields {
    pub async fn read(mut multipart: Multipart) -> Result<Self, VitrineError> {
        let mut fields = UploadFields::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == IMAGE_FIELD {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                if fields.image.is_none() {
                    fields.image = Some(ImageUpload { file_name, bytes });
                }
            } else {
                let value = field.text().await?;
                fields.texts.entry(name).or_insert(value);
            }
        }
        Ok(fields)
    }

    pub fn take_text(&mut self, name: &'static str) -> Result<String, VitrineError> {
        self.texts
            .remove(name)
            .ok_or(VitrineError::MissingField(name))
    }

    pub fn take_image(&mut self) -> Result<ImageUpload, VitrineError> {
        self.image
            .take()
            .ok_or(VitrineError::MissingField(IMAGE_FIELD))
    }
}

impl<S> FromRequest<S> for ProjectForm
where
    S: Send + Sync,
{
    type Rejection = VitrineError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state).await?;
        let mut fields = UploadFields::read(multipart).await?;

        Ok(ProjectForm {
            name: fields.take_text("name")?,
            description: fields.take_text("description")?,
            image: fields.take_image()?,
        })
    }
}

impl<S> FromRequest<S> for ClientForm
where
    S: Send + Sync,
{
    type Rejection = VitrineError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state).await?;
        let mut fields = UploadFields::read(multipart).await?;

        Ok(ClientForm {
            name: fields.take_text("name")?,
            designation: fields.take_text("designation")?,
            description: fields.take_text("description")?,
            image: fields.take_image()?,
        })
    }
}
