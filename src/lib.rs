//! Scene-driven text output.
//!
//! Loads a TOML scene (font, device context, draw requests), renders it
//! through [`textout_core`] onto a software raster, and writes the result
//! as PNG.

#![deny(unsafe_code)]

pub mod config;
pub mod raster;
pub mod scene;
