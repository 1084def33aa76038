#![deny(warnings)]

pub mod capture;
pub mod config;
pub mod emotion;
pub mod fusion;
pub mod pipeline;
pub mod transcript;
pub mod util;
pub mod voice;

pub use pipeline::{analyze, Analysis, Pipeline, PipelineError};
