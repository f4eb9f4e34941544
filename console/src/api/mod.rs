//! Remote environment-management API client

pub mod actions;
pub mod client;
pub mod deployments;
pub mod environments;
pub mod networks;
