//! Compile-time event contracts over the `emitter-core` registry.
//!
//! This crate narrows the untyped [`Emitter`] surface to a caller-declared
//! vocabulary: a [`Contract`] lists which events exist and what payload
//! shape each carries, and [`TypedEmitter`] only compiles `on`/`once`/
//! `off`/`fire` calls for declared events. The narrowing is erased before
//! execution — a typed view *is* its underlying registry, and nothing is
//! validated at runtime.
//!
//! Contracts are usually declared with the [`events!`] macro:
//!
//! ```
//! use emitter_typed::{events, TypedEmitter};
//!
//! pub struct Connected {
//!     pub peer: String,
//! }
//!
//! events! {
//!     pub contract NetEvents {
//!         PeerConnected("peer-connected") => Connected,
//!         Shutdown("shutdown") => (),
//!     }
//! }
//!
//! let emitter = TypedEmitter::<NetEvents>::new();
//!
//! let sub = emitter
//!     .on::<PeerConnected, _>(|c| println!("connected: {}", c.peer))
//!     .unwrap();
//!
//! emitter.fire::<PeerConnected>(&Connected {
//!     peer: "10.0.0.1".to_string(),
//! });
//!
//! sub.unsubscribe();
//! ```

pub mod contract;
mod macros;

pub use contract::{Contract, Declares, Event, TypedEmitter};

// The untyped surface, re-exported so downstream crates need only one
// dependency.
pub use emitter_core::{Emitter, EmitterError, Handler, Result, Subscription};
