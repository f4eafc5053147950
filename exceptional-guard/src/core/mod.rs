//! Core graft types: the rule catalog, host namespaces and the graft manager.
//!
//! ## Architecture
//!
//! ```text
//! RULE_GROUPS (static catalog)
//!     ├── Math        ──▶ Namespace "Math"        (static)
//!     ├── RangeError  ──▶ Namespace "RangeError"  (static)
//!     ├── String      ──▶ Namespace "String"      (instance, receiver prepended)
//!     ├── TypeError   ──▶ Namespace "TypeError"   (static)
//!     └── global      ──▶ Namespace "global"
//!
//! GraftManager::augment   installs  <rule>Ex members
//! GraftManager::unaugment removes   <rule>Ex members
//! ```
//!
//! ## Example
//!
//! ```rust
//! use exceptional_guard::core::{GraftManager, Host};
//! use exceptional_guard::value::Value;
//!
//! # fn example() -> exceptional_guard::error::Result<()> {
//! let mut host = Host::new();
//! let manager = GraftManager::new();
//!
//! let string = manager.augment(&mut host, "String")?;
//! let x = string.invoke("charAtEx", Some(&Value::from("exceptional")), &[Value::from(1)])?;
//! assert_eq!(x, Value::from("x"));
//!
//! manager.unaugment(&mut host, "String")?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod catalog;
mod graft;
mod namespace;

pub use catalog::{domains, resolve, RuleFn, RuleGroup, RULE_GROUPS};
pub use graft::{install, remove, wrapper_name, GraftConfig, GraftManager, WRAPPER_SUFFIX};
pub use namespace::{Host, Member, Namespace, TargetKind};
