//! # Pharmacy Core
//!
//! The domain layer of the pharmacy CMS.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the admin route guard, the post editor model and the image asset rules.

pub mod access;
pub mod domain;
pub mod editor;
pub mod error;
pub mod images;
pub mod ports;

pub use error::RepoError;
