//! Animal record and its create/update payloads.

use serde::{Deserialize, Serialize};

/// Stored animal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-types", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    /// Auto-incremented identifier assigned by the store.
    pub id: i64,
    pub photo_url: String,
    pub common_name: String,
    /// Slug of `common_name`, unique across all records.
    pub formatted_common_name: String,
    pub scientific_name: String,
    pub habitat: String,
}

impl Animal {
    /// Applies the present fields of `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &AnimalPatch) {
        if let Some(ref photo_url) = patch.photo_url {
            self.photo_url.clone_from(photo_url);
        }
        if let Some(ref scientific_name) = patch.scientific_name {
            self.scientific_name.clone_from(scientific_name);
        }
        if let Some(ref habitat) = patch.habitat {
            self.habitat.clone_from(habitat);
        }
    }
}

/// Validated create payload. Produced only by [`crate::validation::validate_new_animal`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnimal {
    pub photo_url: String,
    pub common_name: String,
    pub formatted_common_name: String,
    pub scientific_name: String,
    pub habitat: String,
}

impl NewAnimal {
    /// Attaches the id assigned by the store.
    #[must_use]
    pub fn with_id(self, id: i64) -> Animal {
        Animal {
            id,
            photo_url: self.photo_url,
            common_name: self.common_name,
            formatted_common_name: self.formatted_common_name,
            scientific_name: self.scientific_name,
            habitat: self.habitat,
        }
    }
}

/// Validated partial update. `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnimalPatch {
    pub id: i64,
    pub photo_url: Option<String>,
    pub scientific_name: Option<String>,
    pub habitat: Option<String>,
}

/// Raw create request body, before validation.
///
/// Fields are kept as JSON values so that type errors can be reported per
/// field alongside every other failure. `formattedCommonName` is not read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalDraft {
    #[serde(default)]
    pub photo_url: Option<serde_json::Value>,
    #[serde(default)]
    pub common_name: Option<serde_json::Value>,
    #[serde(default)]
    pub scientific_name: Option<serde_json::Value>,
    #[serde(default)]
    pub habitat: Option<serde_json::Value>,
}

/// Raw partial-update request body, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalPatchDraft {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub photo_url: Option<serde_json::Value>,
    #[serde(default)]
    pub scientific_name: Option<serde_json::Value>,
    #[serde(default)]
    pub habitat: Option<serde_json::Value>,
}
