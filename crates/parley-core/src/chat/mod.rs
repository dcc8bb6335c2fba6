//! Chat: conversation persistence port, inference client port, and the
//! send / delete / history use cases.

pub mod inference;
pub mod repository;
pub mod service;
