//! Form validation and submission handling

pub mod environment;
