//! # exceptional-guard - Checked primitives for Rust
//!
//! exceptional-guard wraps string, parsing and math primitives whose failure
//! signal is a sentinel (`-1`, `NaN`, `None`, `""`) and turns that signal into
//! a typed error. It also grafts the checked versions onto host namespaces
//! under a derived name (`charAt` → `charAtEx`) and removes them again.
//!
//! ## Quick Start
//!
//! ```rust
//! use exceptional_guard::prelude::*;
//!
//! # fn example() -> Result<()> {
//! // Call the checked operations directly...
//! assert_eq!(StringOps::index_of("exceptional", "cep")?, 2);
//! assert!(StringOps::index_of("exceptional", "not").unwrap_err().is_not_found());
//! assert!(MathOps::pow(1000.0, 1000.0).unwrap_err().is_out_of_range());
//!
//! // ...or graft them onto a host and call them dynamically.
//! let mut host = Host::new();
//! let manager = GraftManager::new();
//! manager.augment_all(&mut host)?;
//!
//! let global = host.namespace("global").unwrap();
//! let parsed = global.invoke("parseFloatEx", None, &[Value::from("12.34")])?;
//! assert_eq!(parsed, Value::Number(12.34));
//!
//! manager.unaugment_all(&mut host)?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Failure kinds
//!
//! | Kind | Raised when |
//! |---|---|
//! | [`InvalidArgument`](error::GuardError::InvalidArgument) | an argument has the wrong type or shape |
//! | [`OutOfRange`](error::GuardError::OutOfRange) | a number is not finite or falls outside its bounds |
//! | [`NotFound`](error::GuardError::NotFound) | a search or extraction produced nothing |
//! | [`ConfigurationConflict`](error::GuardError::ConfigurationConflict) | a graft would overwrite an existing member |
//!
//! Messages follow a fixed template so they can be matched exactly:
//!
//! ```text
//! charAtEx() index argument <-1> must be between 0 and 10
//! ```
//!
//! ## Logging
//!
//! Rejections are emitted through `tracing` at `debug`; see [`logging`] for
//! subscriber setup.

pub mod core;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod primitives;
pub mod rules;
pub mod value;
