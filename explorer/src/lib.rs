//! Wordvec Explorer Library
//!
//! Interactive console for querying a pre-trained word-embedding model:
//! term similarity, nearest neighbours, vector analogies and odd one out.

pub mod config;
pub mod error;
pub mod gateway;
pub mod menu;
pub mod report;
pub mod session;

pub use config::{FormatChoice, InvalidSelectionPolicy, SessionConfig};
pub use error::ExplorerError;
pub use gateway::open_model;
pub use session::{Query, Session, SessionState};
