//! Vote counting over committed blocks.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::Block;

/// Committed votes per candidate id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    counts: BTreeMap<String, u64>,
    total: u64,
}

impl Tally {
    pub fn from_blocks<'a>(blocks: impl IntoIterator<Item = &'a Block>) -> Self {
        let mut tally = Self::default();
        for tx in blocks.into_iter().flat_map(|b| &b.transactions) {
            tally.record(&tx.candidate_id);
        }
        tally
    }

    pub fn record(&mut self, candidate_id: &str) {
        *self.counts.entry(candidate_id.to_owned()).or_default() += 1;
        self.total += 1;
    }

    /// Votes for `candidate_id` (zero when it has none).
    pub fn get(&self, candidate_id: &str) -> u64 {
        self.counts.get(candidate_id).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(id, n)| (id.as_str(), *n))
    }

    /// Number of distinct candidates with at least one vote.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Transaction;
    use votechain_types::Timestamp;

    fn block(candidates: &[&str]) -> Block {
        let txs = candidates
            .iter()
            .enumerate()
            .map(|(i, c)| Transaction::new(format!("V{i}"), *c, "s", "k", Timestamp::EPOCH))
            .collect();
        Block::seal(1, Timestamp::EPOCH, txs, 0, "x".into())
    }

    #[test]
    fn counts_across_blocks() {
        let blocks = [block(&["C1", "C2"]), block(&["C1"])];
        let tally = Tally::from_blocks(&blocks);
        assert_eq!(tally.get("C1"), 2);
        assert_eq!(tally.get("C2"), 1);
        assert_eq!(tally.get("C3"), 0);
        assert_eq!(tally.total(), 3);
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn empty_chain_tallies_nothing() {
        let tally = Tally::from_blocks(&[block(&[])]);
        assert!(tally.is_empty());
        assert_eq!(tally.total(), 0);
    }
}
