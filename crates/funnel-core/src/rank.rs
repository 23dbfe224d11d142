//! Positional ranking of funnel nodes.
//!
//! A node's score is its frequency-weighted mean position over every
//! occurrence in every path:
//!
//! ```text
//! mean(n) = Σ count(p) · pos(n, p) / Σ count(p)
//! ```
//!
//! where `pos` is the 0-based index inside path `p` and repeated occurrences
//! in one path all count. Negative counts are clamped to zero; a node whose
//! paths all have zero weight falls back to the unweighted mean of its
//! occurrences. The rank is the mean rounded half away from zero, so entry
//! states get small ranks and exit states large ones.
//!
//! Nodes with close means share a rank class. Where a total order is needed,
//! [`NodeRanks::ordered`] sorts by exact mean and then by name.

use std::collections::BTreeMap;

use crate::path::PathSequence;

/// Positional statistics for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeScore {
    pub mean_position: f64,
    /// Occurrences across all paths, repeats included.
    pub occurrences: u64,
    /// Sum of path counts over those occurrences.
    pub weight: u64,
    pub rank: u32,
}

/// Rank mapping produced by [`NodeRanker`].
#[derive(Debug, Clone, Default)]
pub struct NodeRanks {
    scores: BTreeMap<String, NodeScore>,
}

impl NodeRanks {
    /// Rank of `name`, or `None` when it never appeared in a path.
    pub fn rank_of(&self, name: &str) -> Option<u32> {
        self.scores.get(name).map(|score| score.rank)
    }

    pub fn score(&self, name: &str) -> Option<&NodeScore> {
        self.scores.get(name)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Nodes ordered by mean position; equal means fall back to name order.
    pub fn ordered(&self) -> Vec<(&str, &NodeScore)> {
        let mut out: Vec<(&str, &NodeScore)> = self
            .scores
            .iter()
            .map(|(name, score)| (name.as_str(), score))
            .collect();
        out.sort_by(|(ln, ls), (rn, rs)| {
            ls.mean_position
                .total_cmp(&rs.mean_position)
                .then_with(|| ln.cmp(rn))
        });
        out
    }
}

#[derive(Default)]
struct Accumulator {
    weighted_sum: f64,
    weight: u64,
    position_sum: f64,
    occurrences: u64,
}

impl Accumulator {
    fn add(&mut self, position: usize, count: u64) {
        self.weighted_sum += position as f64 * count as f64;
        self.weight = self.weight.saturating_add(count);
        self.position_sum += position as f64;
        self.occurrences += 1;
    }

    fn finish(self) -> NodeScore {
        let mean_position = if self.weight > 0 {
            self.weighted_sum / self.weight as f64
        } else {
            self.position_sum / self.occurrences as f64
        };
        NodeScore {
            mean_position,
            occurrences: self.occurrences,
            weight: self.weight,
            rank: mean_position.round() as u32,
        }
    }
}

/// Computes [`NodeRanks`] from decoded path sequences.
pub struct NodeRanker;

impl NodeRanker {
    pub fn rank(sequences: &[PathSequence]) -> NodeRanks {
        let mut acc: BTreeMap<&str, Accumulator> = BTreeMap::new();
        for sequence in sequences {
            let count = sequence.count.max(0) as u64;
            for (position, name) in sequence.nodes.iter().enumerate() {
                acc.entry(name.as_str()).or_default().add(position, count);
            }
        }

        let ranks = NodeRanks {
            scores: acc
                .into_iter()
                .map(|(name, acc)| (name.to_string(), acc.finish()))
                .collect(),
        };

        if tracing::enabled!(tracing::Level::TRACE) {
            for (name, score) in ranks.ordered() {
                tracing::trace!(
                    node = name,
                    mean = score.mean_position,
                    rank = score.rank,
                    "ranked node"
                );
            }
        }

        ranks
    }
}
