//! HTTP API for Prompt Grader
//!
//! A stateless JSON front end over `grader-core`. Every request is graded
//! against one shared, immutable [`PromptGrader`](grader_core::PromptGrader).

pub mod config;
pub mod routes;
pub mod server;


pub use config::ServerConfig;
pub use server::{router, run, AppState};
