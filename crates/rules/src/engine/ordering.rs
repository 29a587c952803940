//! Deterministic ordering and rank assignment.

use std::cmp::Ordering;

use diagnoser_core::Hypothesis;

/// Confidence descending, then component ascending, then issue ascending.
///
/// `total_cmp` keeps the order total even if a confidence were NaN.
pub(crate) fn compare(a: &Hypothesis, b: &Hypothesis) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| a.component.cmp(&b.component))
        .then_with(|| a.issue.cmp(&b.issue))
}

/// Stable-sort `hypotheses` and overwrite each rank with its 1-based position.
pub(crate) fn sort_and_rank(hypotheses: &mut [Hypothesis]) {
    hypotheses.sort_by(compare);
    for (i, h) in hypotheses.iter_mut().enumerate() {
        h.rank = i + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(confidence: f64, component: &str, issue: &str) -> Hypothesis {
        Hypothesis {
            rank: 0,
            confidence,
            component: component.to_string(),
            issue: issue.to_string(),
            evidence: Vec::new(),
            suggestion: String::new(),
        }
    }

    fn keys(hs: &[Hypothesis]) -> Vec<(usize, &str, &str)> {
        hs.iter()
            .map(|h| (h.rank, h.component.as_str(), h.issue.as_str()))
            .collect()
    }

    #[test]
    fn confidence_descending_first() {
        let mut hs = vec![h(0.5, "A", "x"), h(0.8, "Z", "x"), h(0.6, "M", "x")];
        sort_and_rank(&mut hs);
        assert_eq!(keys(&hs), vec![(1, "Z", "x"), (2, "M", "x"), (3, "A", "x")]);
    }

    #[test]
    fn component_breaks_confidence_ties() {
        let mut hs = vec![
            h(0.6, "Storage", "x"),
            h(0.6, "Dataset", "x"),
            h(0.6, "Runtime", "x"),
        ];
        sort_and_rank(&mut hs);
        assert_eq!(
            keys(&hs),
            vec![(1, "Dataset", "x"), (2, "Runtime", "x"), (3, "Storage", "x")]
        );
    }

    #[test]
    fn issue_breaks_component_ties() {
        let mut hs = vec![h(0.5, "Fuse", "b issue"), h(0.5, "Fuse", "a issue")];
        sort_and_rank(&mut hs);
        assert_eq!(keys(&hs), vec![(1, "Fuse", "a issue"), (2, "Fuse", "b issue")]);
    }

    #[test]
    fn stale_ranks_are_overwritten() {
        let mut a = h(0.3, "A", "x");
        a.rank = 7;
        let mut b = h(0.8, "B", "x");
        b.rank = 7;
        let mut hs = vec![a, b];
        sort_and_rank(&mut hs);
        assert_eq!(hs[0].rank, 1);
        assert_eq!(hs[1].rank, 2);
    }

    #[test]
    fn input_order_does_not_matter() {
        let base = vec![
            h(0.8, "Fuse", "f"),
            h(0.6, "Runtime", "r"),
            h(0.6, "Dataset", "d"),
            h(0.5, "Worker", "w"),
        ];
        let mut forward = base.clone();
        let mut reversed: Vec<_> = base.into_iter().rev().collect();
        sort_and_rank(&mut forward);
        sort_and_rank(&mut reversed);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn empty_is_fine() {
        let mut hs: Vec<Hypothesis> = Vec::new();
        sort_and_rank(&mut hs);
        assert!(hs.is_empty());
    }
}
