//! Generate images with an asynchronous generation service and deliver them
//!
//! A prompt is submitted as a generation job and polled until it finishes.
//! The caller then picks one of the resulting images, which is pinned to a
//! board on a best-effort basis before its bytes are handed back.

pub mod app;
pub mod delivery;
pub mod error;
pub mod generation;
pub mod mime;
pub mod models;
pub mod pinning;
pub mod remote;

pub use error::{Error, Result};
