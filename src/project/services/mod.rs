//! Services for the project-management backend boundary.

mod cache;

pub use cache::ProjectCache;
