//! Taskdeck - project and task tracking with a kanban board.
//!
//! This crate provides both a CLI application and a library: the record
//! model, a metrics engine, the board state machine, a project store over
//! a pluggable key-value backend, and the view selection state machine.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod board;
pub mod domain;
pub mod error;
pub mod export;
pub mod id_generation;
pub mod metrics;
pub mod storage;
pub mod view;

// Public CLI module (needed by binary)
pub mod cli;

// Command implementations
pub mod commands;

// Application context and rendering
pub mod app;
pub mod output;
