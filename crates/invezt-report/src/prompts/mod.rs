//! Prompt templates
//!
//! There is exactly one prompt: the equity research brief in [`analysis`].

mod analysis;

pub use analysis::{ANALYSIS_TEMPLATE, render_analysis_prompt};
