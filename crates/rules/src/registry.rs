//! Ordered collection of rules the engine evaluates.

use std::fmt;

use crate::builtin::{
    DatasetNotBoundRule, FuseUnschedulableRule, PvcUnboundRule, RuntimePartiallyReadyRule,
    WorkerPendingMemoryRule,
};
use crate::rule::Rule;

/// Rules in registration order. Order has no effect on engine output.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed set of built-in rules.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register(FuseUnschedulableRule)
            .register(WorkerPendingMemoryRule)
            .register(RuntimePartiallyReadyRule)
            .register(PvcUnboundRule)
            .register(DatasetNotBoundRule);
        registry
    }

    pub fn register(&mut self, rule: impl Rule + 'static) -> &mut Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.ids())
            .finish()
    }
}
