//! # sessionizer-types
//!
//! Shared domain types for sessionizer.
//!
//! This crate defines the core data structures used throughout the system:
//! - Events: Immutable, timestamped user activity records
//! - Sessions: Summaries of one user's contiguous run of events
//! - Settings: Layered configuration
//!
//! ## Usage
//!
//! ```rust
//! use sessionizer_types::{Event, Session};
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod session;

pub use crate::config::{OutputFormat, Settings, DEFAULT_GAP_THRESHOLD_SECS};
pub use crate::error::SessionError;
pub use crate::event::{parse_events, Event, Meta};
pub use crate::session::{Session, TypeCount};
