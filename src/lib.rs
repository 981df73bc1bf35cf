//! cimatrix - CI build-matrix generator and end-to-end smoke checker
//!
//! Expands a language/version document and an addons document into the
//! `{"include": [...]}` matrix a CI system fans jobs out over, one entry per
//! (language, version) pair.
//!
//! # Example
//!
//! ```
//! use cimatrix::{AddonsMap, LanguageVersionMap, MatrixBuilder};
//!
//! let languages = LanguageVersionMap::new()
//!     .with_language("python", &["3.11"])
//!     .with_language("java", &["17"]);
//! let addons = AddonsMap::new().with_packages("python", &["pip"]);
//!
//! let matrix = MatrixBuilder::new(languages, addons).build();
//! assert_eq!(matrix.include[0].base_image, "python:3.11");
//! assert_eq!(matrix.include[1].base_image, "openjdk:17-jdk-bullseye");
//! assert_eq!(matrix.include[1].packages, "");
//! ```
//!
//! # Project Structure
//!
//! - [`matrix`]: document loading, matrix expansion and output sinks
//! - [`validation`]: rule checks on a built matrix
//! - [`smoke`]: HTTP smoke checks against a deployed service
//! - [`cli`]: command-line front-end
//! - [`config`]: environment-driven configuration

pub mod cli;
pub mod config;
pub mod matrix;
pub mod smoke;
pub mod util;
pub mod validation;

pub use config::{CimatrixConfig, ConfigError};
pub use matrix::{
    base_image_for, AddonsMap, LanguageVersionMap, MatrixBuilder, MatrixDocument, MatrixEntry,
    MatrixError,
};
pub use smoke::{CheckOutcome, SmokeChecker, SmokeError, SmokeReport};
pub use util::{init_from_env, init_logging, LoggingConfig};
pub use validation::Validator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
