//! Console HTTP server

pub mod actions;
pub mod handlers;
pub mod serve;
pub mod state;
