//! EcoScan API Library
//!
//! HTTP surface of the upload service: handlers, application state and setup.

mod api_doc;
mod handlers;
mod services;
mod telemetry;
mod utils;

pub mod error;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use services::eco_score::EcoScoreClient;
