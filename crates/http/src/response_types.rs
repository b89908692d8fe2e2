//! Response types (Serialize)

use serde::Serialize;

use fauna_core::{Animal, FieldError};

/// `{ "payload": ... }` wrapper used by every JSON response.
#[derive(Debug, Serialize)]
pub struct Payload<T> {
    pub payload: T,
}

impl<T> Payload<T> {
    pub fn new(payload: T) -> Self {
        Self { payload }
    }
}

#[derive(Debug, Serialize)]
pub struct AnimalsBody {
    pub animals: Vec<Animal>,
}

#[derive(Debug, Serialize)]
pub struct AnimalBody {
    pub animal: Animal,
}

#[derive(Debug, Serialize)]
pub struct CountBody {
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct DeletedBody {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct ErrorsBody {
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
#[non_exhaustive]
pub struct VersionResponse {
    pub version: &'static str,
}
