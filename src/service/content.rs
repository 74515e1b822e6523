use crate::db::{
    Client, Contact, ContentStore, NewClient, NewContact, NewProject, NewRecord, NewSubscriber,
    Project, Subscriber,
};
use crate::error::VitrineError;
use crate::imaging::{ImageNormalizer, TargetSize};
use crate::types::{AdminDashboard, ClientForm, ImageUpload, LandingPage, ProjectForm};
use tracing::{info, warn};

/// Result of a newsletter subscription attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Subscribed(i64),
    AlreadySubscribed,
    /// Blank email; nothing stored.
    Skipped,
}

/// Site operations: normalizes uploads and writes the records that reference them.
#[derive(Clone)]
pub struct ContentService {
    store: ContentStore,
    normalizer: ImageNormalizer,
}

impl ContentService {
    pub fn new(store: ContentStore, normalizer: ImageNormalizer) -> Self {
        Self { store, normalizer }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn normalizer(&self) -> &ImageNormalizer {
        &self.normalizer
    }

    pub async fn landing_page(&self) -> Result<LandingPage, VitrineError> {
        Ok(LandingPage {
            projects: self.store.query_all::<Project>().await?,
            clients: self.store.query_all::<Client>().await?,
        })
    }

    pub async fn admin_dashboard(&self) -> Result<AdminDashboard, VitrineError> {
        Ok(AdminDashboard {
            contacts: self.store.query_all::<Contact>().await?,
            subscribers: self.store.query_all::<Subscriber>().await?,
        })
    }

    pub async fn submit_contact(&self, contact: NewContact) -> Result<i64, VitrineError> {
        let id = self.store.insert(&contact).await?;
        info!(id, city = %contact.city, "contact message stored");
        Ok(id)
    }

    /// Subscribe `email` unless it is blank or already present.
    ///
    /// The lookup only short-circuits the common case; the UNIQUE constraint
    /// decides when two requests race, and the loser reports `AlreadySubscribed`.
    pub async fn subscribe(&self, email: &str) -> Result<SubscribeOutcome, VitrineError> {
        let email = email.trim();
        if email.is_empty() {
            return Ok(SubscribeOutcome::Skipped);
        }

        if self
            .store
            .find_by_field::<Subscriber>("email", email)
            .await?
            .is_some()
        {
            return Ok(SubscribeOutcome::AlreadySubscribed);
        }

        let new_sub = NewSubscriber {
            email: email.to_string(),
        };
        match self.store.insert(&new_sub).await {
            Ok(id) => {
                info!(id, "new subscriber");
                Ok(SubscribeOutcome::Subscribed(id))
            }
            Err(VitrineError::DuplicateKey { .. }) => Ok(SubscribeOutcome::AlreadySubscribed),
            Err(e) => Err(e),
        }
    }

    /// Normalize the upload to the project card size and store the project.
    pub async fn add_project(&self, form: ProjectForm) -> Result<Project, VitrineError> {
        let image_file = self.store_image(form.image, TargetSize::PROJECT).await?;
        let project = NewProject {
            name: form.name,
            description: form.description,
            image_file,
        };
        let saved = self.insert_with_image(&project, &project.image_file).await?;
        info!(id = saved.id, image_file = %saved.image_file, "project added");
        Ok(saved)
    }

    /// Normalize the upload to the client portrait size and store the client.
    pub async fn add_client(&self, form: ClientForm) -> Result<Client, VitrineError> {
        let image_file = self.store_image(form.image, TargetSize::CLIENT).await?;
        let client = NewClient {
            name: form.name,
            designation: form.designation,
            description: form.description,
            image_file,
        };
        let saved = self.insert_with_image(&client, &client.image_file).await?;
        info!(id = saved.id, image_file = %saved.image_file, "client added");
        Ok(saved)
    }

    /// Decoding and resampling are CPU-bound, so they run off the async workers.
    async fn store_image(
        &self,
        upload: ImageUpload,
        target: TargetSize,
    ) -> Result<String, VitrineError> {
        let normalizer = self.normalizer.clone();
        let filename = tokio::task::spawn_blocking(move || {
            normalizer.normalize(&upload.bytes, &upload.file_name, target)
        })
        .await??;
        Ok(filename)
    }

    /// Insert a record that owns `image_file`; the file goes away if the insert fails.
    async fn insert_with_image<N: NewRecord>(
        &self,
        record: &N,
        image_file: &str,
    ) -> Result<N::Saved, VitrineError> {
        let inserted = match self.store.insert(record).await {
            Ok(id) => self.store.get_by_id::<N::Saved>(id).await,
            Err(e) => Err(e),
        };

        match inserted {
            Ok(Some(saved)) => Ok(saved),
            Ok(None) => {
                self.discard_image(image_file);
                Err(VitrineError::DatabaseError(sqlx::Error::RowNotFound))
            }
            Err(e) => {
                self.discard_image(image_file);
                Err(e)
            }
        }
    }

    fn discard_image(&self, image_file: &str) {
        if let Err(e) = self.normalizer.remove(image_file) {
            warn!(image_file, error = %e, "failed to remove orphaned upload");
        }
    }
}
