//! Build-matrix generation
//!
//! Turns a language/version document and an addons document into the
//! `{"include": [...]}` matrix consumed by CI job fan-out.
//!
//! - [`source`]: loading and shape-checking the two YAML documents
//! - [`builder`]: the (language, version) expansion
//! - [`sink`]: stdout, JSON file and `GITHUB_ENV` destinations

pub mod builder;
pub mod error;
pub mod sink;
pub mod source;
pub mod types;

pub use builder::{base_image_for, MatrixBuilder, DEFAULT_BASE_PACKAGES};
pub use error::MatrixError;
pub use sink::{
    append_github_env, github_env_line, github_env_path, stage_json_file, write_json_file,
    StagedJsonFile,
};
pub use source::{AddonsMap, LanguageVersionMap, BASE_PACKAGES_KEY};
pub use types::{MatrixDocument, MatrixEntry};
