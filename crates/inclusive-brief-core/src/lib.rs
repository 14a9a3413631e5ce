#![deny(missing_docs)]
//! Inclusive Brief core library.
//!
//! Shared logic for configuration, the generative-AI client, prompt
//! templates and attachment download/decoding.

/// Configuration management.
pub mod config;
/// LLM providers and client.
pub mod llm;
/// Image download and decoding.
pub mod media;
/// Prompt templates for the bot commands.
pub mod prompt;
/// Utility functions.
pub mod utils;

/// Mock constructors and fixtures for tests.
#[cfg(any(test, feature = "testing"))]
pub mod testing;
