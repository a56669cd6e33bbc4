//! Core domain library for the school physical-education portal.
//!
//! The portal backend replaces the ambient Firebase/OpenRouter handles of the
//! original site with explicitly constructed clients and repository traits so
//! every collaborator can be swapped out in tests. The fitness scoring engine
//! itself is pure and lives in [`portal::fitness::evaluation`].

pub mod config;
pub mod error;
pub mod portal;
pub mod telemetry;
