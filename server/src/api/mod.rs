//! JSON API endpoints.

pub mod todos;
