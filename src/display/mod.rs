//! Presentation layer
//!
//! Turns controller notices into what the user sees: plain or coloured text
//! lines, or one JSON object per line for machine consumers.

pub mod renderer;

pub use renderer::{message_for, stdout_renderer, JsonRenderer, OutputFormat, Renderer, TextRenderer};
