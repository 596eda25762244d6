mod json_file_repository;
mod persisted;

pub use json_file_repository::{JsonFileRoleButtonConfigRepository, LoadError};
