//! Attendance and leave tracking core: domain records, status classifiers,
//! collection aggregators and per-screen state containers over an injectable
//! data source.

pub mod aggregate;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod session;
pub mod state;
pub mod utils;

pub use error::{DomainError, DomainResult};
pub use session::{Session, Workspace};
