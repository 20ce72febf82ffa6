//! # tokenkit Resilience
//!
//! Retry support for the one wait in tokenkit that is allowed to retry: the
//! confirmation of a contract-creation transaction.
//!
//! ```rust
//! use tokenkit_resilience::{with_retry, FixedDelayRetry};
//! use std::time::Duration;
//!
//! # async fn example() {
//! let policy = FixedDelayRetry::new(3, Duration::from_millis(10));
//! let result = with_retry(&policy, "confirmation", |attempt| async move {
//!     if attempt < 2 { Err("not mined yet") } else { Ok(attempt) }
//! })
//! .await;
//! assert_eq!(result.unwrap(), 2);
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod retry;

pub use retry::{
    with_retry, FixedDelayRetry, RetryError, DEPLOYMENT_CONFIRMATION_ATTEMPTS,
    DEPLOYMENT_CONFIRMATION_DELAY,
};
