pub mod artifact;
pub mod build;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod note;
pub mod process;
pub mod release;
pub mod ui;
pub mod validator;

pub use error::{ReleaseCheckError, Result};
pub use validator::{ReleaseValidator, ValidationState};
