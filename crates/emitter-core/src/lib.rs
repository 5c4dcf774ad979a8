//! Untyped name-keyed event registry with pub/sub.
//!
//! This crate provides the [`Emitter`]: a string-keyed registry of listener
//! callbacks with:
//! - Set semantics per event name (a handler registers at most once)
//! - Synchronous, insertion-order dispatch on the caller's stack
//! - Unsubscribe handles ([`Subscription`]) returned by every registration
//! - One-shot listeners that remove themselves before running
//!
//! The registry is deliberately untyped: payloads cross it as `&dyn Any`
//! borrows and event names are plain strings. The `emitter-typed` crate
//! layers a compile-time contract over this surface without adding any
//! runtime behavior.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use emitter_core::{Emitter, Handler};
//!
//! let emitter = Emitter::new();
//!
//! let handler: Handler = Arc::new(|payload| {
//!     if let Some(n) = payload.and_then(|p| p.downcast_ref::<u32>()) {
//!         println!("ping {n}");
//!     }
//! });
//!
//! let sub = emitter.on("ping", handler).unwrap();
//! emitter.fire("ping", Some(&1_u32));
//! assert_eq!(emitter.event_count("ping"), 1);
//!
//! sub.unsubscribe();
//! assert_eq!(emitter.event_count("ping"), 0);
//! ```

pub mod emitter;
pub mod error;
pub mod subscription;

pub use emitter::{Emitter, Handler};
pub use error::{EmitterError, Result};
pub use subscription::Subscription;
