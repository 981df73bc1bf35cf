//! End-to-end smoke checks against a deployed `app` service
//!
//! Two checks are run, in order:
//! - `health`: `GET /health` must answer HTTP 200
//! - `database`: `GET /api/test-db` must answer JSON with `"status": "success"`

pub mod checker;
pub mod report;

pub use checker::{SmokeChecker, SmokeError, DB_CHECK_PATH, DEFAULT_BASE_URL, HEALTH_CHECK_PATH};
pub use report::{CheckOutcome, SmokeReport};
