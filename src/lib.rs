//! Concurrency-safe, multi-format export pipeline for polls.
//!
//! Given a poll with options and per-option voter lists, this crate takes a
//! consistent snapshot under the poll's own lock and renders it as CSV,
//! JSON, YAML, or a pie/bar chart PNG, with the CPU-bound encoding pushed
//! off the async path. It also ships the fuzzy title matching behind the
//! poll-picker autocomplete.
//!
//! Storage, user lookup, permissions, and the actual file transport stay
//! outside: they plug in through the [`store::PollStore`],
//! [`identity::IdentityResolver`], and [`export::Delivery`] traits.

pub mod autocomplete;
pub mod error;
pub mod export;
pub mod fuzzy;
pub mod identity;
pub mod models;
pub mod store;

pub use autocomplete::{poll_autocomplete, PollChoice, RankedCandidate};
pub use error::{BoxError, EncodingError, ExportError};
pub use export::{export_poll, Delivery, ExportFile, ExportFormat, Snapshot};
pub use identity::IdentityResolver;
pub use models::{GuildId, Poll, PollId, PollOption, UserId};
pub use store::PollStore;
