//! SeaORM entities, one per table.

pub mod category;
pub mod credential;
pub mod post;
pub mod profile;
