//! myFlix API Service Library
//!
//! This library provides a movie catalog REST API with credential-based
//! authentication and bearer-token session management.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `crypto` - Cryptographic operations (JWT signing, password hashing)
//! - `errors` - Error types
//! - `handlers` - HTTP request handlers
//! - `middleware` - Authentication and metrics middleware
//! - `models` - Data models
//! - `observability` - Metrics and log-correlation helpers
//! - `routes` - Router assembly and application state
//! - `services` - Business logic layer
//! - `store` - Storage access layer

pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod routes;
pub mod services;
pub mod store;
