//! # Scuttle Testkit
//!
//! Testing utilities for the Scuttle chat log.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Generators**: proptest strategies for messages, identities and
//!   timestamped batches
//! - **Fixtures**: helpers for seeding logs with pinned-clock messages,
//!   bypassing the wall clock so tests are deterministic
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use scuttle_testkit::generators;
//!
//! proptest! {
//!     #[test]
//!     fn snapshot_is_sorted(msgs in generators::message_batch(32)) {
//!         let log = scuttle_log::MessageLog::new(16).unwrap();
//!         log.extend(msgs);
//!         let snap = log.snapshot();
//!         prop_assert!(snap.windows(2).all(|w| w[0].created_at <= w[1].created_at));
//!     }
//! }
//! ```
//!
//! ## Fixtures
//!
//! ```rust
//! use scuttle_testkit::fixtures::LogFixture;
//!
//! let fixture = LogFixture::with_capacity(8);
//! fixture.seed(&[1, 2, 3]);
//! assert_eq!(fixture.log.len(), 3);
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{message_at, LogFixture};
