use crate::tile::Tile;
use std::cmp::Ordering;

/// Ascending tile order inside one group.
pub fn sort_tiles(tiles: &mut [Tile]) {
    tiles.sort();
}

/// Larger groups first, then lexicographic by tile order.
pub fn compare_groups(a: &[Tile], b: &[Tile]) -> Ordering {
    b.len().cmp(&a.len()).then_with(|| a.cmp(b))
}

/// Sort each group, then the groups themselves.
pub fn sort_groups(groups: &mut [Vec<Tile>]) {
    for g in groups.iter_mut() {
        sort_tiles(g);
    }
    groups.sort_by(|a, b| compare_groups(a, b));
}

/// Starter rank first, then tile order. Only the three-suit run rules use this.
pub fn sort_by_rank(starters: &mut [Tile]) {
    starters.sort_by_key(|t| (t.num, *t));
}
