use super::*;

/// Appends every legal move of `board` in search priority order:
/// tableau to free cell, free cell to tableau, tableau to tableau,
/// tableau to foundation, free cell to foundation.
pub fn compute_possible_moves(board: &Board, possible_moves: &mut PossibleMoves) {
    compute_move_to_freecell(board, possible_moves);
    compute_move_from_freecell(board, possible_moves);
    compute_move_from_tableau(board, possible_moves);
    compute_move_to_foundation(board, possible_moves);
}

fn compute_move_to_freecell(board: &Board, possible_moves: &mut PossibleMoves) {
    let Some(cell_idx) = board.first_empty_freecell() else {
        return;
    };
    for (src_idx, column) in board.tableaus.iter().enumerate() {
        if let Some(&card) = column.last() {
            possible_moves.push(Move::TableauToFree(src_idx, cell_idx, card));
        }
    }
}

fn compute_move_from_freecell(board: &Board, possible_moves: &mut PossibleMoves) {
    for (cell_idx, cell) in board.freecells.iter().enumerate() {
        let Some(card) = *cell else {
            continue;
        };
        for (dest_idx, column) in board.tableaus.iter().enumerate() {
            if can_place(card, column) {
                possible_moves.push(Move::FreeToTableau(cell_idx, dest_idx, card));
            }
        }
    }
}

fn compute_move_from_tableau(board: &Board, possible_moves: &mut PossibleMoves) {
    for (src_idx, src_column) in board.tableaus.iter().enumerate() {
        let Some(&card) = src_column.last() else {
            continue;
        };
        for (dest_idx, dest_column) in board.tableaus.iter().enumerate() {
            if src_idx != dest_idx && can_place(card, dest_column) {
                possible_moves.push(Move::TableauToTableau(src_idx, dest_idx, card));
            }
        }
    }
}

fn compute_move_to_foundation(board: &Board, possible_moves: &mut PossibleMoves) {
    for (src_idx, column) in board.tableaus.iter().enumerate() {
        if let Some(&card) = column.last()
            && board.can_place_in_foundation(card)
        {
            possible_moves.push(Move::TableauToFoundation(src_idx, card));
        }
    }
    for (cell_idx, cell) in board.freecells.iter().enumerate() {
        if let Some(card) = *cell
            && board.can_place_in_foundation(card)
        {
            possible_moves.push(Move::FreeToFoundation(cell_idx, card));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn possible_moves(board: &Board) -> Vec<Move> {
        let mut moves = PossibleMoves::new();
        compute_possible_moves(board, &mut moves);
        moves.into_vec()
    }

    #[test]
    fn test_priority_order() {
        let board = Board::from_layout(
            &[vec!["10 of Spades"], vec!["9 of Hearts"], vec!["A of Clubs"]],
            &[None, Some("9 of Diamonds"), None, None],
            &[],
        )
        .unwrap();
        let (ten, nine, ace, diamond) = (
            card("10 of Spades"),
            card("9 of Hearts"),
            card("A of Clubs"),
            card("9 of Diamonds"),
        );

        let mut expected = vec![
            Move::TableauToFree(0, 0, ten),
            Move::TableauToFree(1, 0, nine),
            Move::TableauToFree(2, 0, ace),
            Move::FreeToTableau(1, 0, diamond),
        ];
        expected.extend((3..8).map(|to| Move::FreeToTableau(1, to, diamond)));
        expected.extend((3..8).map(|to| Move::TableauToTableau(0, to, ten)));
        expected.push(Move::TableauToTableau(1, 0, nine));
        expected.extend((3..8).map(|to| Move::TableauToTableau(1, to, nine)));
        expected.extend((3..8).map(|to| Move::TableauToTableau(2, to, ace)));
        expected.push(Move::TableauToFoundation(2, ace));

        assert_eq!(possible_moves(&board), expected);
    }

    #[test]
    fn test_lowest_empty_freecell() {
        let board = Board::from_layout(
            &[vec!["4 of Clubs"]],
            &[Some("K of Hearts"), Some("K of Spades"), None, None],
            &[],
        )
        .unwrap();
        let moves = possible_moves(&board);
        assert_eq!(moves[0], Move::TableauToFree(0, 2, card("4 of Clubs")));
        assert_eq!(
            moves
                .iter()
                .filter(|m| matches!(m, Move::TableauToFree(..)))
                .count(),
            1
        );
    }

    #[test]
    fn test_no_freecell_moves_when_full() {
        let board = Board::from_layout(
            &[vec!["Q of Hearts"]],
            &[
                Some("K of Hearts"),
                Some("K of Diamonds"),
                Some("K of Clubs"),
                Some("K of Spades"),
            ],
            &[],
        )
        .unwrap();
        let moves = possible_moves(&board);
        assert!(!moves.iter().any(|m| matches!(m, Move::TableauToFree(..))));
        assert!(!moves.iter().any(Move::is_to_foundation));
        // Every card can only move to one of the seven empty columns.
        assert_eq!(moves.len(), 4 * 7 + 7);
    }

    #[test]
    fn test_lone_two_goes_to_foundation() {
        let board = Board::from_layout(
            &[vec!["2 of Spades"]],
            &[],
            &[vec![], vec![], vec![], vec!["A of Spades"]],
        )
        .unwrap();
        let two = card("2 of Spades");
        let mut expected = vec![Move::TableauToFree(0, 0, two)];
        expected.extend((1..8).map(|to| Move::TableauToTableau(0, to, two)));
        expected.push(Move::TableauToFoundation(0, two));
        assert_eq!(possible_moves(&board), expected);

        let mut cells_full = board.clone();
        cells_full.freecells = [
            Some(card("K of Hearts")),
            Some(card("K of Diamonds")),
            Some(card("K of Clubs")),
            Some(card("Q of Hearts")),
        ];
        cells_full.tableaus[1].push(card("K of Spades"));
        cells_full.tableaus[2].push(card("J of Hearts"));
        cells_full.tableaus[3].push(card("J of Diamonds"));
        cells_full.tableaus[4].push(card("Q of Diamonds"));
        cells_full.tableaus[5].push(card("J of Clubs"));
        cells_full.tableaus[6].push(card("J of Spades"));
        cells_full.tableaus[7].push(card("Q of Clubs"));
        // No red three and no empty column: the foundation is the only way out.
        let moves = possible_moves(&cells_full);
        assert_eq!(
            moves.iter().filter(|m| m.card() == two).collect::<Vec<_>>(),
            vec![&Move::TableauToFoundation(0, two)]
        );
    }

    #[test]
    fn test_foundation_moves() {
        let board = Board::from_layout(
            &[vec!["3 of Hearts"], vec!["A of Diamonds"]],
            &[Some("A of Spades"), None, Some("4 of Hearts"), None],
            &[vec!["A of Hearts", "2 of Hearts"]],
        )
        .unwrap();
        let moves = possible_moves(&board);
        let foundation_moves: Vec<Move> =
            moves.into_iter().filter(Move::is_to_foundation).collect();
        assert_eq!(
            foundation_moves,
            vec![
                Move::TableauToFoundation(0, card("3 of Hearts")),
                Move::TableauToFoundation(1, card("A of Diamonds")),
                Move::FreeToFoundation(0, card("A of Spades")),
            ]
        );
    }
}
