//! Per-rule fault isolation.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use diagnoser_core::{Hypothesis, Snapshot};
use tracing::{debug, error};

use crate::rule::Rule;

/// Run one rule against the snapshot.
///
/// Returns `None` when the rule does not match or when it panics; a panic is
/// logged and swallowed so the remaining rules still contribute.
pub(crate) fn run_rule(rule: &dyn Rule, snapshot: &Snapshot) -> Option<Hypothesis> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        if rule.matches(snapshot) {
            Some(rule.hypothesis(snapshot))
        } else {
            None
        }
    }));

    match outcome {
        Ok(Some(h)) => {
            debug!(
                rule = rule.id(),
                confidence = h.confidence,
                evidence = h.evidence.len(),
                "rule matched"
            );
            Some(h)
        }
        Ok(None) => {
            debug!(rule = rule.id(), "rule did not match");
            None
        }
        Err(payload) => {
            error!(
                rule = rule.id(),
                panic = %panic_message(payload.as_ref()),
                "rule faulted, skipping its contribution"
            );
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Exploding;

    impl Rule for Exploding {
        fn id(&self) -> &'static str {
            "exploding"
        }
        fn component(&self) -> &'static str {
            "Test"
        }
        fn matches(&self, _snapshot: &Snapshot) -> bool {
            true
        }
        fn hypothesis(&self, _snapshot: &Snapshot) -> Hypothesis {
            panic!("boom");
        }
    }

    struct Never;

    impl Rule for Never {
        fn id(&self) -> &'static str {
            "never"
        }
        fn component(&self) -> &'static str {
            "Test"
        }
        fn matches(&self, _snapshot: &Snapshot) -> bool {
            false
        }
        fn hypothesis(&self, _snapshot: &Snapshot) -> Hypothesis {
            unreachable!("hypothesis called without a match")
        }
    }

    #[test]
    fn panicking_rule_yields_none() {
        assert!(run_rule(&Exploding, &Snapshot::default()).is_none());
    }

    #[test]
    fn non_matching_rule_never_generates() {
        assert!(run_rule(&Never, &Snapshot::default()).is_none());
    }

    #[test]
    fn panic_payloads_are_readable() {
        let static_str: Box<dyn Any + Send> = Box::new("static");
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let other: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(static_str.as_ref()), "static");
        assert_eq!(panic_message(owned.as_ref()), "owned");
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }
}
