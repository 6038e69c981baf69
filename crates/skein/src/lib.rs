//! Skein - work-item dependency graph and critical-path engine.
//!
//! This crate provides both a CLI application and a library. The library
//! core is the [`engine`] module: a typed relationship graph with cycle
//! validation, critical path analysis, and neighborhood extraction. The
//! CLI layers a clap interface and JSONL snapshot persistence on top.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod app;
pub mod domain;
pub mod engine;
pub mod error;
pub mod resolver;
pub mod snapshot;

// Public CLI module (needed by binary)
pub mod cli;

// Command implementations
pub mod commands;

// Output rendering shared by CLI commands
pub mod output;
