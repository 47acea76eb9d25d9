//! Auth Infrastructure Layer

pub mod mock;
pub mod postgres;
