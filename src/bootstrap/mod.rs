//! Tracker application bootstrapping.
//!
//! This module includes all the functions to build the application, its
//! dependencies, and run the jobs.
//!
//! Jobs are tasks executed concurrently. Right now the only job is the HTTP
//! tracker server.
pub mod app;
pub mod config;
pub mod jobs;
pub mod logging;
