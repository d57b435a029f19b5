//! Unidirectional state core for a recipe-book client.
//!
//! Actions flow into a [`store::Store`], reducers derive the next
//! [`store::AppState`], and effects turn actions into backend calls whose
//! results come back as further actions.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod effects;
pub mod error;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod records;
pub mod shutdown;
pub mod storage;
pub mod store;
