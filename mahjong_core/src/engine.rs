use crate::context::WinContext;
use crate::decompose::{enumerate_decompositions, Decomposition};
use crate::hand::HandState;
use crate::points::settle;
use crate::rules::{score_decomposition, ScoredCategory};
use crate::tile::Tile;
use tracing::{debug, trace};

/// Highest-scoring reading of a hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredHand {
    pub score: u32,
    pub categories: Vec<ScoredCategory>,
    pub decomposition: Decomposition,
}

/// Score every reading of `concealed` and keep the best. Ties keep the
/// earliest reading. `None` when the tiles do not form a winning shape.
pub fn best_score(concealed: &[Tile], hand: &HandState, ctx: &WinContext) -> Option<ScoredHand> {
    let candidates = enumerate_decompositions(concealed);
    trace!(count = candidates.len(), "scoring candidates");

    let mut best: Option<ScoredHand> = None;

    for d in candidates {
        let categories = score_decomposition(&d, hand, ctx);
        let score = settle(&categories);
        debug!(
            score,
            categories = categories.len(),
            special = d.is_special(),
            "scored decomposition"
        );

        best = match best {
            Some(b) if b.score >= score => Some(b),
            _ => Some(ScoredHand {
                score,
                categories,
                decomposition: d,
            }),
        };
    }

    best
}
