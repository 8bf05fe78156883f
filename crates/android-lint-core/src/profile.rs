//! Quality profile backed by configuration.

use std::collections::BTreeMap;

use crate::config::{Config, RuleConfig};
use crate::host::{ActiveRule, RuleActivation};
use crate::types::Severity;

/// The set of Android Lint rules enabled for an analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualityProfile {
    rules: BTreeMap<String, RuleConfig>,
}

impl QualityProfile {
    /// Creates an empty profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the profile from the `[rules]` tables of a config.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            rules: config
                .rules
                .iter()
                .map(|(id, rule)| (id.clone(), rule.clone()))
                .collect(),
        }
    }

    /// Enables a rule.
    #[must_use]
    pub fn activate(mut self, rule_id: impl Into<String>) -> Self {
        self.rules.insert(
            rule_id.into(),
            RuleConfig {
                enabled: Some(true),
                severity: None,
            },
        );
        self
    }

    /// Enables a rule with a severity override.
    #[must_use]
    pub fn activate_with(mut self, rule_id: impl Into<String>, severity: Severity) -> Self {
        self.rules.insert(
            rule_id.into(),
            RuleConfig {
                enabled: Some(true),
                severity: Some(severity),
            },
        );
        self
    }

    /// Lists the enabled rules, ordered by id.
    #[must_use]
    pub fn active_rules(&self) -> Vec<ActiveRule> {
        self.rules
            .iter()
            .filter(|(_, rule)| rule.is_active())
            .map(|(id, rule)| ActiveRule {
                rule_id: id.clone(),
                severity: rule.severity,
            })
            .collect()
    }
}

impl RuleActivation for QualityProfile {
    fn active_rule(&self, rule_id: &str) -> Option<ActiveRule> {
        let rule = self.rules.get(rule_id)?;
        if !rule.is_active() {
            return None;
        }
        Some(ActiveRule {
            rule_id: rule_id.to_string(),
            severity: rule.severity,
        })
    }

    fn active_count(&self) -> usize {
        self.rules
            .values()
            .filter(|rule| rule.is_active())
            .count()
    }
}
