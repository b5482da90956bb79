//! Headless client for the MediScribe AI transcription backend: audio
//! upload, entity normalization, SOAP note rendering, and a bounded local
//! history of past results.

pub mod cli;
pub mod core;
pub mod error;
pub mod output;
pub mod settings;
pub mod types;
