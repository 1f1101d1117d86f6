use crate::optimizer::allocation::Allocation;

/// Highest-damage candidate; the first one wins ties.
pub fn best_candidate(candidates: &[Allocation]) -> Option<Allocation> {
    candidates.iter().copied().fold(None, |best, candidate| match best {
        Some(b) if b.damage >= candidate.damage => Some(b),
        _ => Some(candidate),
    })
}
