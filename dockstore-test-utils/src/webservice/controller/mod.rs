//! Axum handlers of the webservice stand-in.
//!
//! Handlers extract the caller and request data, call a service and wrap the
//! result in JSON. They hold no business rules of their own.

pub mod auth;
pub mod tool;
pub mod trs;
pub mod user;
pub mod workflow;
