use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};

use fauna_core::validation::{parse_id, parse_page};
use fauna_core::{AnimalDraft, AnimalPatchDraft};

use crate::AppState;
use crate::api_error::ApiError;
use crate::response_types::{AnimalBody, AnimalsBody, CountBody, DeletedBody, Payload};

type ApiResult<T> = Result<Json<Payload<T>>, ApiError>;

fn ok<T>(body: T) -> ApiResult<T> {
    Ok(Json(Payload::new(body)))
}

pub async fn get_animals(
    State(state): State<Arc<AppState>>,
    page: Result<Path<String>, PathRejection>,
) -> ApiResult<AnimalsBody> {
    let Path(page) = page?;
    let page = parse_page(&page)?;
    let animals = state.animal_service.list_page(page).await?;
    ok(AnimalsBody { animals })
}

pub async fn get_animal_details(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<AnimalBody> {
    let Path(id) = id?;
    let id = parse_id(&id)?;
    let animal = state.animal_service.get_by_id(id).await?;
    ok(AnimalBody { animal })
}

pub async fn get_animal_by_name(
    State(state): State<Arc<AppState>>,
    common_name: Result<Path<String>, PathRejection>,
) -> ApiResult<AnimalBody> {
    let Path(common_name) = common_name?;
    let animal = state.animal_service.get_by_name(&common_name).await?;
    ok(AnimalBody { animal })
}

pub async fn get_count(State(state): State<Arc<AppState>>) -> ApiResult<CountBody> {
    let count = state.animal_service.count().await?;
    ok(CountBody { count })
}

pub async fn create_animal(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AnimalDraft>, JsonRejection>,
) -> ApiResult<AnimalBody> {
    let Json(draft) = body?;
    let animal = state.animal_service.create(&draft).await?;
    ok(AnimalBody { animal })
}

pub async fn update_animal(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AnimalPatchDraft>, JsonRejection>,
) -> ApiResult<AnimalBody> {
    let Json(draft) = body?;
    let animal = state.animal_service.update(&draft).await?;
    ok(AnimalBody { animal })
}

pub async fn delete_animal(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<DeletedBody> {
    let Path(id) = id?;
    let id = parse_id(&id)?;
    state.animal_service.delete(id).await?;
    ok(DeletedBody { id })
}
