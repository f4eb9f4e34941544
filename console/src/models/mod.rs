//! Wire and data types shared between the remote API client and handlers

pub mod action;
pub mod deployment;
pub mod environment;
pub mod network;
