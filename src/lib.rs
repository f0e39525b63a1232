//! Memoria - photo memory uploader
//!
//! This library crate exposes the workflow and its collaborators for the
//! binary and for integration testing.

pub mod backend;
pub mod compose;
pub mod config;
pub mod images;
pub mod notice;
pub mod workflow;
