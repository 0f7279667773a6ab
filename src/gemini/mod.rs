//! Gemini gateway — the generative model boundary.
//!
//! DESIGN
//! ======
//! Three stateless request/response operations against the Gemini
//! `generateContent` API: text → screen, screenshot → screen, and image edit.
//! Each is a single round trip with no retry or streaming; failures are total
//! (no partial screen is ever produced). The `UiModel` trait keeps the rest
//! of the app independent of the concrete client so tests can substitute a
//! mock model.

pub mod client;
pub mod config;
pub mod types;

pub use client::GeminiClient;
pub use types::{GeminiError, UiModel};
