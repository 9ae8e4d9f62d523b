//! Learner progress from an xAPI statement store: follow the store's
//! `more` cursor across every page, then reduce the statements to one
//! checkpoint summary per module.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod locker;

pub use catalog::{ModuleCatalog, ModuleCatalogEntry};
pub use config::{Config, Credentials};
pub use engine::{LearnerReport, MentorReport, ProgressSummary};
pub use error::{LockerError, Result};
pub use locker::LockerClient;
