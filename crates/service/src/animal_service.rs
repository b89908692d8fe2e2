use std::sync::Arc;

use fauna_core::validation::{common_name_slug, page_offset, validate_new_animal, validate_patch};
use fauna_core::{
    Animal, AnimalDraft, AnimalPatchDraft, FieldError, PAGE_SIZE, ValidationErrors,
    format_common_name,
};
use fauna_storage::{AnimalStore, StorageError};

use crate::ServiceError;

pub struct AnimalService {
    store: Arc<dyn AnimalStore>,
}

impl AnimalService {
    #[must_use]
    pub fn new(store: Arc<dyn AnimalStore>) -> Self {
        Self { store }
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        Ok(self.store.count().await?)
    }

    /// One page of [`PAGE_SIZE`] animals in id order. Pages start at 1.
    pub async fn list_page(&self, page: u64) -> Result<Vec<Animal>, ServiceError> {
        if page == 0 {
            return Err(ValidationErrors::single("page", "must be a positive integer").into());
        }
        let offset = page_offset(page, PAGE_SIZE);
        Ok(self.store.find_all(offset, PAGE_SIZE).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Animal, ServiceError> {
        self.store.find_by_id(id).await?.ok_or_else(|| ServiceError::animal_not_found(id))
    }

    /// Looks an animal up by any spelling of its common name.
    pub async fn get_by_name(&self, name: &str) -> Result<Animal, ServiceError> {
        let slug = format_common_name(name);
        if slug.is_empty() {
            return Err(ValidationErrors::single(
                "commonName",
                "must contain at least one letter or digit",
            )
            .into());
        }
        self.store.find_by_slug(&slug).await?.ok_or_else(|| ServiceError::animal_not_found(slug))
    }

    /// Validates `draft`, checks slug uniqueness and inserts.
    ///
    /// A slug taken by an existing record is reported as [`ServiceError::Conflict`]
    /// when it is the only problem, and folded into the validation errors
    /// otherwise. A collision that slips past the pre-check is caught by the
    /// store's unique index and reported the same way. When fields fail and the
    /// store cannot be reached, the field errors are returned on their own.
    pub async fn create(&self, draft: &AnimalDraft) -> Result<Animal, ServiceError> {
        let validated = validate_new_animal(draft);

        let taken = match common_name_slug(draft) {
            Some(slug) => match self.store.find_by_slug(&slug).await {
                Ok(found) => found.map(|_| slug),
                // The field errors alone already decide the response.
                Err(e) if validated.is_err() => {
                    tracing::warn!(error = %e, "slug lookup failed, reporting field errors only");
                    None
                },
                Err(e) => return Err(e.into()),
            },
            None => None,
        };

        let new_animal = match (validated, taken) {
            (Ok(_), Some(slug)) => return Err(ServiceError::Conflict { slug }),
            (Ok(animal), None) => animal,
            (Err(mut errors), taken) => {
                if let Some(slug) = taken {
                    errors.push(conflict_error(&slug));
                }
                tracing::debug!(errors = errors.len(), "rejected animal create");
                return Err(errors.into());
            },
        };

        match self.store.insert(&new_animal).await {
            Ok(animal) => {
                tracing::info!(id = animal.id, slug = %animal.formatted_common_name, "created animal");
                Ok(animal)
            },
            Err(e) if e.is_duplicate() => {
                Err(ServiceError::Conflict { slug: new_animal.formatted_common_name })
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Applies a partial update to an existing animal.
    pub async fn update(&self, draft: &AnimalPatchDraft) -> Result<Animal, ServiceError> {
        let patch = validate_patch(draft)?;

        let mut animal = self.get_by_id(patch.id).await?;
        animal.apply(&patch);

        match self.store.update(&animal).await {
            Ok(updated) => {
                tracing::info!(id = updated.id, "updated animal");
                Ok(updated)
            },
            // Deleted between the lookup and the write.
            Err(StorageError::NotFound { .. }) => Err(ServiceError::animal_not_found(patch.id)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if self.store.delete(id).await? {
            tracing::info!(id, "deleted animal");
            Ok(())
        } else {
            Err(ServiceError::animal_not_found(id))
        }
    }
}

/// Field error reported for a slug that is already taken.
pub(crate) fn conflict_error(slug: &str) -> FieldError {
    FieldError::new("commonName", format!("an animal with name slug '{slug}' already exists"))
}
