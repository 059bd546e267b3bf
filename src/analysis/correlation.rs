use crate::protocols::{BasisLabel, BasisPair, Outcome};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Outcome counts for one basis pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    counts: [usize; 4],
}

impl Tally {
    fn slot(outcome: Outcome) -> usize {
        usize::from(outcome.alice) | (usize::from(outcome.bob) << 1)
    }

    pub fn record(&mut self, outcome: Outcome) {
        self.add(outcome, 1);
    }

    pub fn add(&mut self, outcome: Outcome, n: usize) {
        self.counts[Self::slot(outcome)] += n;
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.counts[Self::slot(outcome)]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// $E = (N_{00} + N_{11} - N_{01} - N_{10}) / N$, or exactly 0 with no data.
    pub fn correlation(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }

        let (agree, disagree) = Outcome::ALL
            .into_iter()
            .fold((0usize, 0usize), |(a, d), o| {
                if o.agrees() {
                    (a + self.count(o), d)
                } else {
                    (a, d + self.count(o))
                }
            });

        (agree as f64 - disagree as f64) / total as f64
    }
}

/// Outcome tallies keyed by `(alice, bob)` basis pair.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CorrelationTable {
    entries: BTreeMap<BasisPair, Tally>,
}

impl CorrelationTable {
    /// Tally for `pair`, created empty if absent.
    pub fn entry(&mut self, pair: BasisPair) -> &mut Tally {
        self.entries.entry(pair).or_default()
    }

    pub fn record(&mut self, pair: BasisPair, outcome: Outcome) {
        self.entry(pair).record(outcome);
    }

    pub fn get(&self, pair: BasisPair) -> Option<&Tally> {
        self.entries.get(&pair)
    }

    /// Correlation for `pair`, if the table has an entry for it.
    pub fn correlation(&self, pair: BasisPair) -> Option<f64> {
        self.get(pair).map(Tally::correlation)
    }

    /// Correlation of every entry.
    pub fn correlations(&self) -> BTreeMap<BasisPair, f64> {
        self.entries
            .iter()
            .map(|(&pair, tally)| (pair, tally.correlation()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BasisPair, &Tally)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Groups basis-tagged outcomes into a `CorrelationTable`.
///
/// Every combination of an Alice basis and a Bob basis seen in the input gets
/// an entry, even if that exact combination never occurred; such entries
/// have a total of zero.
pub fn correlate(results: &[(BasisPair, Outcome)]) -> CorrelationTable {
    let alice: BTreeSet<BasisLabel> = results.iter().map(|((a, _), _)| *a).collect();
    let bob: BTreeSet<BasisLabel> = results.iter().map(|((_, b), _)| *b).collect();

    let mut table = CorrelationTable::default();
    for &a in &alice {
        for &b in &bob {
            table.entry((a, b));
        }
    }

    for &(pair, outcome) in results {
        table.record(pair, outcome);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocols::BasisLabel::*;

    #[test]
    fn empty_tally_correlates_to_zero() {
        let tally = Tally::default();
        assert_eq!(tally.total(), 0);
        assert_eq!(tally.correlation(), 0.0);
    }

    #[test]
    fn correlation_counts_agreement_minus_disagreement() {
        let mut tally = Tally::default();
        tally.add(Outcome::new(false, false), 3);
        tally.add(Outcome::new(true, true), 1);
        tally.add(Outcome::new(true, false), 2);
        tally.add(Outcome::new(false, true), 2);
        assert_eq!(tally.total(), 8);
        assert!((tally.correlation() - 0.0).abs() < 1e-12);

        let mut anti = Tally::default();
        anti.add(Outcome::new(true, false), 5);
        assert_eq!(anti.correlation(), -1.0);
    }

    #[test]
    fn correlate_fills_unseen_combinations_with_zero() {
        let results = vec![
            ((Deg0, Deg45), Outcome::new(true, false)),
            ((Deg90, Deg135), Outcome::new(true, true)),
        ];
        let table = correlate(&results);

        assert_eq!(table.len(), 4);
        assert_eq!(table.get((Deg0, Deg135)).map(Tally::total), Some(0));
        assert_eq!(table.correlation((Deg0, Deg135)), Some(0.0));
        assert_eq!(table.correlation((Deg0, Deg45)), Some(-1.0));
        assert_eq!(table.correlation((Deg90, Deg135)), Some(1.0));
        assert_eq!(table.correlation((Deg45, Deg45)), None);
    }

    #[test]
    fn correlate_of_nothing_is_empty() {
        assert!(correlate(&[]).is_empty());
    }
}
