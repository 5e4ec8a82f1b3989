pub mod calculator;
pub mod cli;
pub mod collector;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod factors;
pub mod interface;
pub mod models;

pub use error::{FootprintError, Result};
pub use models::{CropActivity, EmissionFactor, FootprintResult, Report};
