pub mod app;
pub mod cli;
pub mod controller;
pub mod errors;
pub mod helpers;
pub mod loader;
pub mod models;
pub mod polygon;
pub mod render;

pub use errors::{Error, Result};
