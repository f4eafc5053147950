//! Prelude for commonly used types in exceptional-guard.

pub use crate::core::{GraftConfig, GraftManager, Host, Namespace, TargetKind};
pub use crate::error::{FailureKind, GuardError, Result};
pub use crate::logging::LogConfig;
pub use crate::rules::{Arg, Bounds, GlobalOps, MathOps, RangeValidation, StringOps};
pub use crate::value::{Pattern, Value};
