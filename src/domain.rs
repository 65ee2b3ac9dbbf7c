//! Domain models for course requisites.
//!
//! This module contains the requisite expression tree, the subject directory
//! used to resolve subject names, and configuration.

/// Requisite expression tree and its stored document shape.
pub mod requisite;
pub use requisite::{Course, Group, Operator, Requisite, ShapeError, TestScore};

mod config;
pub use config::Config;

/// Subject name resolution.
pub mod subject;
pub use subject::{resolve, Subject, SubjectDirectory, UNKNOWN_SUBJECT};
