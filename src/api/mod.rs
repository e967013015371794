//! Axum handlers, wire models and router setup used by the server binary.
pub mod handlers;
pub mod models;
pub mod routes;
