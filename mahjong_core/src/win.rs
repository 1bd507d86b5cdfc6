use crate::decompose::can_form_groups;
use crate::special::detect_special;
use crate::tile::{Tile, TileCounts};

/// Whether the concealed set is a finished hand, special shapes included.
pub fn is_winning_shape(tiles: &[Tile]) -> bool {
    if detect_special(tiles).is_some() {
        return true;
    }
    match TileCounts::from_tiles(tiles) {
        Some(c) => can_form_groups(c),
        None => false,
    }
}

/// Same check with a claimed discard added.
pub fn is_winning_shape_with_claim(tiles: &[Tile], claimed: Tile) -> bool {
    let mut all = tiles.to_vec();
    all.push(claimed);
    is_winning_shape(&all)
}
