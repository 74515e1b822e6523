//! Request and response shapes for the HTTP layer.

pub mod forms;
pub mod responses;

pub use forms::{ClientForm, ImageUpload, ProjectForm, SubscribeForm};
pub use responses::{AdminDashboard, ContactAccepted, LandingPage, SubscribeResponse};
