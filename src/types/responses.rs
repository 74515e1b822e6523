use crate::db::{Client, Contact, Project, Subscriber};
use serde::Serialize;

/// Everything the public landing page shows.
#[derive(Debug, Clone, Serialize)]
pub struct LandingPage {
    pub projects: Vec<Project>,
    pub clients: Vec<Client>,
}

/// Admin listing of visitor submissions.
#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub contacts: Vec<Contact>,
    pub subscribers: Vec<Subscriber>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactAccepted {
    pub message: &'static str,
    pub id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscribeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub subscribed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}
