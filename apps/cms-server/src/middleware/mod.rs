//! Middleware modules.

pub mod error;
pub mod guard;
pub mod session;
