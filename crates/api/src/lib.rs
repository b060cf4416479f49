//! HTTP API for the hotel dashboard: configuration, middleware pipeline,
//! routing and the error-to-response translation.

pub mod app;
pub mod config;
pub mod context;
pub mod cors;
pub mod middleware;
