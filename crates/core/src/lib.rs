//! Core types for fauna
//!
//! Domain model, slug function and validation rules shared by every other crate.

mod animal;
mod constants;
mod env_config;
mod error;
mod slug;
pub mod validation;

pub use animal::*;
pub use constants::*;
pub use env_config::{fauna_setting, fauna_var};
pub use error::*;
pub use slug::format_common_name;
