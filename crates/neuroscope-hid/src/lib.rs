//! `hidapi` backend for Neuroscope.
//!
//! [`HidApiLocator`] enumerates and opens devices; [`HidSession`] turns the
//! blocking `read_timeout` API into the callback-driven transport the report
//! loop expects.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod locator;
pub mod session;

pub use locator::HidApiLocator;
pub use session::{HidSession, InputReader};
