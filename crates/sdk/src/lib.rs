//! permhub SDK - Identity types
//!
//! This crate contains the identity types exchanged between the permission
//! core and its collaborators (subject collection backends, command hosts).
//! It has no dependencies and compiles quickly, so backends can depend on it
//! without pulling in the async runtime.
//!
//! # Modules
//!
//! - [`subject`] - Subject references and loaded subject snapshots
//! - [`owner`] - Owner identity attached to permission descriptions

pub mod owner;
pub mod subject;

pub use owner::OwnerRef;
pub use subject::{Subject, SubjectRef};
