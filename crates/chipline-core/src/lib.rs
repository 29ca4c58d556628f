//! Core systems for Chipline.
//!
//! This crate provides the foundational pieces the chip-row behavior is
//! built on:
//!
//! - **Signal/Slot System**: type-safe notifications between components
//! - **Deferred Invocation**: a next-tick closure queue for two-phase
//!   "mutate now, notify later" updates
//! - **Logging**: `tracing` target conventions
//!
//! The concurrency model is a single-threaded cooperative event loop:
//! signal emission is synchronous, and anything that must wait for the
//! next turn of the loop goes through the [`DeferQueue`].
//!
//! # Signal Example
//!
//! ```
//! use chipline_core::Signal;
//!
//! let hidden_count_changed = Signal::<usize>::new();
//!
//! let conn = hidden_count_changed.connect(|count| {
//!     println!("+{count} badge");
//! });
//!
//! hidden_count_changed.emit(3);
//! hidden_count_changed.disconnect(conn);
//! ```
//!
//! # Deferred Invocation Example
//!
//! ```
//! use chipline_core::{DeferGuard, DeferQueue};
//!
//! let queue = DeferQueue::new();
//! let guard = DeferGuard::new();
//!
//! queue.push_guarded(&guard, || println!("runs on the next tick"));
//!
//! // ... later, once per turn of the host loop:
//! queue.run_pending();
//! ```

mod defer;
pub mod logging;
mod signal;

pub use defer::{DeferGuard, DeferQueue};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
