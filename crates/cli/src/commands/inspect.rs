//! Read-only commands that print JSON to stdout.

use anyhow::Result;
use fauna_core::validation::{parse_id, parse_page};

use crate::open_service;

pub(crate) async fn run_count() -> Result<()> {
    let count = open_service().await?.count().await?;
    println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "count": count }))?);
    Ok(())
}

pub(crate) async fn run_list(page: &str) -> Result<()> {
    let page = parse_page(page)?;
    let animals = open_service().await?.list_page(page).await?;
    println!("{}", serde_json::to_string_pretty(&animals)?);
    Ok(())
}

pub(crate) async fn run_get(id: &str) -> Result<()> {
    let id = parse_id(id)?;
    let service = open_service().await?;
    match service.get_by_id(id).await {
        Ok(animal) => println!("{}", serde_json::to_string_pretty(&animal)?),
        Err(e) if e.is_not_found() => println!("Animal not found: {id}"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
