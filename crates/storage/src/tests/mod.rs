//! Test utilities and module declarations for storage tests.

use fauna_core::{NewAnimal, format_common_name};
use tempfile::TempDir;

use crate::{SqliteStorage, StorageBackend};

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (SqliteStorage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = SqliteStorage::new(&db_path).unwrap();
    (storage, temp_dir)
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_backend() -> (StorageBackend, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let backend = StorageBackend::new_sqlite(&db_path).unwrap();
    (backend, temp_dir)
}

pub fn create_test_animal(common_name: &str) -> NewAnimal {
    NewAnimal {
        photo_url: "https://example.com/animal.jpg".to_owned(),
        common_name: common_name.to_owned(),
        formatted_common_name: format_common_name(common_name),
        scientific_name: "Testus animalis".to_owned(),
        habitat: "Somewhere with plenty of room to roam".to_owned(),
    }
}

mod backend_tests;
