use super::*;

// 52 cards, one terminator per column, four cells and four foundation heights.
const KEY_SIZE: usize = MAX_CARD as usize + TOTAL_TABLEAUS + TOTAL_FREECELLS + TOTAL_FOUNDATIONS;
// Smallest inline capacity smallvec provides that holds a full key.
const KEY_CAPACITY: usize = 96;
const _: () = assert!(KEY_SIZE <= KEY_CAPACITY);
const COLUMN_END: u8 = 0xff;
const EMPTY_CELL: u8 = 0xfe;

/// Exact byte encoding of a position, used as the visited-set key.
///
/// Columns and cells keep their positions, so two layouts that only differ
/// by the order of their columns get different keys.
pub type StateKey = SmallVec<[u8; KEY_CAPACITY]>;

pub fn get_state(board: &Board) -> StateKey {
    let mut state = StateKey::new();

    for column in &board.tableaus {
        state.extend(column.iter().map(Card::id));
        state.push(COLUMN_END);
    }

    state.extend(
        board
            .freecells
            .iter()
            .map(|cell| cell.map_or(EMPTY_CELL, |card| card.id())),
    );

    state.extend((0..TOTAL_FOUNDATIONS).map(|i| board.foundation_len(i)));

    state
}
