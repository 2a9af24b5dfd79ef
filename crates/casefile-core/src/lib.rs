//! Core types and trait definitions for the Casefile intake service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod case;
pub mod chat;
pub mod error;
pub mod evidence;
pub mod message;
pub mod screening;
pub mod staff;
pub mod store;

pub use error::{Error, Result};
