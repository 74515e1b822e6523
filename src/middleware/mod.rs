pub mod site_form;
pub mod upload_form;

pub use site_form::SiteForm;
