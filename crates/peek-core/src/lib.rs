//! Core of the peek user-agent.
//!
//! Parse a locator, fetch it, and reduce HTML markup to text:
//!
//! ```no_run
//! use peek_core::{fetch, locator};
//!
//! let loc = locator::parse("http://example.com")?;
//! let text = fetch::fetch(loc)?.into_text();
//! println!("{}", text);
//! # Ok::<(), peek_core::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod locator;
pub mod logging;

pub use error::{Error, Result};
