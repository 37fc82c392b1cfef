// crates/resilience/src/lib.rs
//! Retry with exponential backoff for calls to the external stores
//!
//! # Example
//!
//! ```rust
//! use leadsync_resilience::{with_retry_if, RetryPolicy};
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::new(3)
//!     .with_initial_delay(Duration::from_millis(1));
//!
//! let mut calls = 0;
//! let result: Result<u32, &str> = with_retry_if(
//!     &policy,
//!     || {
//!         calls += 1;
//!         if calls < 2 { Err("busy") } else { Ok(7) }
//!     },
//!     |e| *e == "busy",
//! );
//! assert_eq!(result, Ok(7));
//! ```

mod retry;

pub use retry::{with_retry_if, RetryPolicy};
