//! Rendering module for writing outlines.

mod json;

pub use json::{to_json, to_json_features, JsonFormat};
