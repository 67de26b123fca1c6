//! STAFFDESK - Terminal Employee Registry Library
//!
//! A terminal-based employee registry with email notifications, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
