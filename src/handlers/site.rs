use axum::{Json, extract::State, http::StatusCode};

use crate::db::NewContact;
use crate::middleware::SiteForm;
use crate::service::SubscribeOutcome;
use crate::types::{ContactAccepted, LandingPage, SubscribeForm, SubscribeResponse};
use crate::{VitrineError, router::VitrineState};

/// GET / -> projects and clients for the landing page.
pub async fn landing_page(
    State(state): State<VitrineState>,
) -> Result<Json<LandingPage>, VitrineError> {
    Ok(Json(state.content.landing_page().await?))
}

/// POST /contact -> stores a visitor message.
pub async fn contact(
    State(state): State<VitrineState>,
    SiteForm(contact): SiteForm<NewContact>,
) -> Result<(StatusCode, Json<ContactAccepted>), VitrineError> {
    let id = state.content.submit_contact(contact).await?;
    Ok((
        StatusCode::CREATED,
        Json(ContactAccepted {
            message: "Message sent successfully!",
            id,
        }),
    ))
}

/// POST /subscribe -> adds the email to the newsletter unless it is blank or known.
pub async fn subscribe(
    State(state): State<VitrineState>,
    SiteForm(form): SiteForm<SubscribeForm>,
) -> Result<(StatusCode, Json<SubscribeResponse>), VitrineError> {
    let (status, body) = match state.content.subscribe(&form.email).await? {
        SubscribeOutcome::Subscribed(id) => (
            StatusCode::CREATED,
            SubscribeResponse {
                message: Some("Subscribed successfully!"),
                subscribed: true,
                id: Some(id),
            },
        ),
        SubscribeOutcome::AlreadySubscribed => (
            StatusCode::OK,
            SubscribeResponse {
                message: Some("Already subscribed."),
                subscribed: false,
                id: None,
            },
        ),
        SubscribeOutcome::Skipped => (
            StatusCode::OK,
            SubscribeResponse {
                message: None,
                subscribed: false,
                id: None,
            },
        ),
    };
    Ok((status, Json(body)))
}
