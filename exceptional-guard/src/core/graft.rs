//! Installing and removing checked wrappers on host namespaces.

use super::catalog::{resolve, RuleGroup, RULE_GROUPS};
use super::namespace::{member_from_rule, Host, Member, Namespace};
use crate::error::{GuardError, Result};
use crate::logging::{truncate_field, LogConfig};
use crate::value::Value;
use crate::{log_graft, perf_debug};
use std::sync::Arc;
use tracing::{info, instrument};

/// Suffix appended to a rule name to form its member name.
pub const WRAPPER_SUFFIX: &str = "Ex";

/// The member name a rule is installed under, e.g. `charAt` → `charAtEx`.
pub fn wrapper_name(rule: &str) -> String {
    format!("{rule}{WRAPPER_SUFFIX}")
}

/// Installs the wrappers of `group` on `target` with default settings.
///
/// Nothing is installed if any derived name is already defined. Returns the
/// number of members installed.
pub fn install(group: &RuleGroup, target: &mut Namespace) -> Result<usize> {
    let manager = GraftManager::new();
    manager.check_conflicts(Some(&*target), group)?;
    Ok(manager.install(target, group))
}

/// Removes the wrappers of `group` from `target`, returning how many were
/// present.
pub fn remove(group: &RuleGroup, target: &mut Namespace) -> usize {
    GraftManager::new().remove(target, group)
}

/// Configuration for a [`GraftManager`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraftConfig {
    /// Logging behaviour
    pub log: LogConfig,
}

impl GraftConfig {
    /// Sets the logging configuration.
    pub fn with_log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }
}

/// Installs (`augment`) and removes (`unaugment`) the checked rule groups.
///
/// Every call is all-or-nothing: all derived member names are checked for
/// collisions before anything is installed, so a failed augment leaves the
/// host untouched.
///
/// # Examples
///
/// ```rust
/// use exceptional_guard::core::{GraftManager, Host};
/// use exceptional_guard::error::FailureKind;
/// use exceptional_guard::value::Value;
///
/// let mut host = Host::new();
/// let manager = GraftManager::new();
///
/// let math = manager.augment(&mut host, "Math").unwrap();
/// let err = math.invoke("sqrtEx", None, &[Value::from(-1)]).unwrap_err();
/// assert_eq!(err.kind(), FailureKind::OutOfRange);
///
/// // A second augment would overwrite the installed wrappers.
/// let err = manager.augment(&mut host, "Math").unwrap_err();
/// assert_eq!(err.kind(), FailureKind::ConfigurationConflict);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraftManager {
    config: GraftConfig,
}

impl GraftManager {
    /// Creates a manager with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager with a custom configuration.
    pub fn with_config(config: GraftConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GraftConfig {
        &self.config
    }

    /// Installs the rules of `domain` on their namespace and returns it.
    ///
    /// Fails with [`GuardError::InvalidArgument`] for an unknown domain and
    /// with [`GuardError::ConfigurationConflict`] when a derived name is
    /// already defined.
    #[instrument(skip(self, host))]
    pub fn augment<'h>(&self, host: &'h mut Host, domain: &str) -> Result<&'h Namespace> {
        let group = resolve(domain, "augment")?;
        self.check_conflicts(host.target(group.target), group)?;
        let target = host.target_mut(group.target);
        let installed = self.install(target, group);
        info!(domain = group.domain, installed, "augmented domain");
        Ok(target)
    }

    /// Installs every catalog domain, or none of them.
    #[instrument(skip(self, host))]
    pub fn augment_all(&self, host: &mut Host) -> Result<()> {
        for group in RULE_GROUPS {
            self.check_conflicts(host.target(group.target), group)?;
        }
        let installed: usize = RULE_GROUPS
            .iter()
            .map(|group| self.install(host.target_mut(group.target), group))
            .sum();
        info!(domains = RULE_GROUPS.len(), installed, "augmented all domains");
        Ok(())
    }

    /// Removes the rules of `domain` from their namespace and returns it.
    ///
    /// Members that are already absent are skipped, so unaugmenting twice is
    /// not an error.
    #[instrument(skip(self, host))]
    pub fn unaugment<'h>(&self, host: &'h mut Host, domain: &str) -> Result<&'h Namespace> {
        let group = resolve(domain, "unaugment")?;
        let target = host.target_mut(group.target);
        let removed = self.remove(target, group);
        info!(domain = group.domain, removed, "unaugmented domain");
        Ok(target)
    }

    /// Removes every catalog domain.
    #[instrument(skip(self, host))]
    pub fn unaugment_all(&self, host: &mut Host) -> Result<()> {
        let removed: usize = RULE_GROUPS
            .iter()
            .map(|group| self.remove(host.target_mut(group.target), group))
            .sum();
        info!(domains = RULE_GROUPS.len(), removed, "unaugmented all domains");
        Ok(())
    }

    fn check_conflicts(&self, target: Option<&Namespace>, group: &RuleGroup) -> Result<()> {
        let Some(target) = target else {
            return Ok(());
        };
        for name in group.names().map(wrapper_name) {
            if target.contains(&name) {
                perf_debug!(
                    self.config.log,
                    domain = group.domain,
                    member = %name,
                    "graft conflict"
                );
                return Err(GuardError::configuration_conflict(group.domain, name));
            }
        }
        Ok(())
    }

    fn install(&self, target: &mut Namespace, group: &RuleGroup) -> usize {
        for (rule_name, rule) in group.rules {
            let name = wrapper_name(rule_name);
            let member = member_from_rule(group.target, *rule);
            let member = if self.config.log.log_rule_failures {
                self.logged(name.clone(), member)
            } else {
                member
            };
            log_graft!(self.config.log, namespace = %target.kind(), member = %name, "installed member");
            target.define(name, member);
        }
        group.rules.len()
    }

    fn remove(&self, target: &mut Namespace, group: &RuleGroup) -> usize {
        let mut removed = 0;
        for name in group.names().map(wrapper_name) {
            if target.remove(&name).is_some() {
                log_graft!(self.config.log, namespace = %target.kind(), member = %name, "removed member");
                removed += 1;
            }
        }
        removed
    }

    /// Wraps `member` so that every failure it returns is logged.
    fn logged(&self, name: String, member: Member) -> Member {
        let max_field_length = self.config.log.max_field_length;
        Arc::new(move |receiver: Option<&Value>, args: &[Value]| {
            let result = member(receiver, args);
            if let Err(err) = &result {
                tracing::debug!(
                    member = %name,
                    kind = %err.kind(),
                    error = %truncate_field(&err.to_string(), max_field_length),
                    "grafted member failed"
                );
            }
            result
        })
    }
}
