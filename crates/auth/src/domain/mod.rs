//! Auth Domain Layer

pub mod repository;
pub mod user;
pub mod value_object;
