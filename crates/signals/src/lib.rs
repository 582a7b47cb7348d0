//! # Signal Evaluation
//!
//! This crate contains the pure decision logic of the bot: computing an RSI
//! reading for a symbol and deciding whether that reading warrants an alert.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** The policy in [`policy::decide`] is a pure function
//!   of its inputs. It performs no I/O and holds no state, which is what
//!   makes the alerting rules trivially testable.
//! - **Injected I/O:** The [`RsiEvaluator`] reaches the exchange only
//!   through the `ExchangeClient` trait, so tests can feed it canned candle
//!   series.

// Declare all the modules that constitute this crate.
pub mod error;
pub mod evaluator;
pub mod policy;

// Re-export the key components to create a clean, public-facing API.
pub use error::SignalError;
pub use evaluator::RsiEvaluator;
pub use policy::decide;
