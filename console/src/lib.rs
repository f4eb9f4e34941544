//! Nimbus Console Library
//!
//! Backend modules for the environments section of the Nimbus cloud admin
//! console.

pub mod api;
pub mod app;
pub mod errors;
pub mod forms;
pub mod logs;
pub mod models;
pub mod server;
pub mod session;
pub mod settings;
pub mod utils;
pub mod workers;
