//! The interactive game: a position plus the player's current selection.
//!
//! [`Game`] is the surface a presentation shell drives. The shell reports
//! activations (a board square or a hand slot the user clicked) and then
//! re-reads the board, hands and selection to redraw. Every activation is
//! total: it either commits a move or drop, changes the selection, or is
//! silently ignored.

use tracing::{debug, trace};

use crate::color::Color;
use crate::moves::Move;
use crate::piece::Piece;
use crate::piece_type::PieceType;
use crate::position::{can_promote, Position};
use crate::square::Square;

/// What the player currently has selected.
///
/// At most one selection is active at a time; committing a move or drop, or
/// activating anything invalid, resets it to `Idle`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing is selected.
    #[default]
    Idle,
    /// A board square holding one of the current player's pieces, together
    /// with the destinations it can reach.
    Square { from: Square, moves: Vec<Square> },
    /// A piece kind from the current player's hand, awaiting a drop target.
    Hand { piece_type: PieceType },
}

/// An interactive two-player game.
///
/// # Examples
///
/// ```
/// use shogiban::{Color, Game};
/// use shogiban::square::consts::*;
///
/// let mut game = Game::new();
///
/// // Black selects the pawn on 7g, then commits it to 7f.
/// game.activate_square(SQ_7G);
/// assert!(game.legal_moves().contains(&SQ_7F));
/// game.activate_square(SQ_7F);
///
/// assert_eq!(Color::White, game.side_to_move());
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    selection: Selection,
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

impl Game {
    /// Creates a game with the standard starting setup, Black to move and
    /// nothing selected.
    pub fn new() -> Game {
        Game {
            position: Position::startpos(),
            selection: Selection::Idle,
        }
    }

    /// Creates a game over an arbitrary position with nothing selected.
    pub fn from_position(position: Position) -> Game {
        Game {
            position,
            selection: Selection::Idle,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the underlying position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns the destinations of the selected piece, for highlighting.
    ///
    /// Empty unless a board square is selected.
    pub fn legal_moves(&self) -> &[Square] {
        match self.selection {
            Selection::Square { ref moves, .. } => moves,
            _ => &[],
        }
    }

    /// Returns the current side to move.
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    /// Returns the piece at the given square.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.position.piece_at(sq)
    }

    /// Returns the number of the given piece in hand.
    pub fn hand(&self, p: Piece) -> u8 {
        self.position.hand(p)
    }

    /// Returns `(kind, count)` pairs for one player's hand in display order.
    pub fn hand_counts(&self, color: Color) -> impl Iterator<Item = (PieceType, u8)> + '_ {
        self.position.hand_counts(color)
    }

    // =========================================================================
    // Activation events
    // =========================================================================

    /// Handles the activation of a board square.
    ///
    /// Depending on the current selection this selects or re-selects a piece
    /// of the side to move, commits a move to one of its highlighted
    /// destinations, commits a drop of the selected hand piece onto an empty
    /// square, or deselects. Invalid activations leave the game unchanged.
    pub fn activate_square(&mut self, sq: Square) {
        match std::mem::take(&mut self.selection) {
            Selection::Idle => {
                self.select_square(sq);
            }
            Selection::Square { from, moves } => {
                if moves.contains(&sq) {
                    self.commit_move(from, sq);
                } else {
                    // Not a destination: re-select or deselect.
                    self.select_square(sq);
                }
            }
            Selection::Hand { piece_type } => {
                if self.piece_at(sq).is_none() {
                    self.commit_drop(sq, piece_type);
                } else {
                    // Occupied drop target; keep waiting for a valid one.
                    self.selection = Selection::Hand { piece_type };
                }
            }
        }
    }

    /// Handles the activation of a hand slot.
    ///
    /// Selects the piece kind for dropping when `color` is the side to move
    /// and at least one such piece is in hand; otherwise the activation is
    /// ignored. Either player's hand may be activated on their own turn.
    pub fn activate_hand_slot(&mut self, color: Color, piece_type: PieceType) {
        if color != self.side_to_move() {
            trace!("hand slot ignored: not {color}'s turn");
            return;
        }

        let stock = Piece { piece_type, color };
        if self.position.hand(stock) == 0 {
            trace!("hand slot ignored: no {piece_type:?} in hand");
            return;
        }

        trace!("hand selected: {piece_type:?}");
        self.selection = Selection::Hand { piece_type };
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn select_square(&mut self, sq: Square) {
        match self.piece_at(sq) {
            Some(piece) if piece.color == self.side_to_move() => {
                let moves = self.position.legal_destinations(sq);
                trace!("square selected: {sq} with {} destinations", moves.len());
                self.selection = Selection::Square { from: sq, moves };
            }
            _ => {
                self.selection = Selection::Idle;
            }
        }
    }

    fn commit_move(&mut self, from: Square, to: Square) {
        let Some(piece) = self.piece_at(from) else {
            return;
        };

        // Promotion is automatic whenever the move touches the zone.
        let m = Move::Normal {
            from,
            to,
            promote: can_promote(piece, from, to),
        };

        match self.position.make_move(m) {
            Ok(()) => {
                debug!(
                    "move committed: {}",
                    m.to_japanese(piece.piece_type, piece.color)
                );
            }
            Err(e) => {
                debug!("move rejected: {m} ({e})");
            }
        }
    }

    fn commit_drop(&mut self, to: Square, piece_type: PieceType) {
        let color = self.side_to_move();
        let m = Move::Drop { to, piece_type };

        match self.position.make_move(m) {
            Ok(()) => {
                debug!("drop committed: {}", m.to_japanese(piece_type, color));
            }
            Err(e) => {
                debug!("drop rejected: {m} ({e})");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::consts::*;

    fn game_from(sfen: &str) -> Game {
        let mut pos = Position::new();
        pos.set_sfen(sfen).expect("valid test SFEN");
        Game::from_position(pos)
    }

    #[test]
    fn new_game_is_idle() {
        let game = Game::new();

        assert_eq!(Selection::Idle, *game.selection());
        assert_eq!(Color::Black, game.side_to_move());
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn selecting_own_piece_highlights_destinations() {
        let mut game = Game::new();

        game.activate_square(SQ_7G);

        assert!(matches!(game.selection(), Selection::Square { from, .. } if *from == SQ_7G));
        assert_eq!(&[SQ_7F], game.legal_moves());
    }

    #[test]
    fn selecting_empty_or_opponent_square_is_ignored() {
        let mut game = Game::new();

        game.activate_square(SQ_5E);
        assert_eq!(Selection::Idle, *game.selection());

        game.activate_square(SQ_3C);
        assert_eq!(Selection::Idle, *game.selection());
    }

    #[test]
    fn committing_a_move_flips_the_turn() {
        let mut game = Game::new();

        game.activate_square(SQ_7G);
        game.activate_square(SQ_7F);

        assert_eq!(None, game.piece_at(SQ_7G));
        assert_eq!(PieceType::Pawn, game.piece_at(SQ_7F).unwrap().piece_type);
        assert_eq!(Color::White, game.side_to_move());
        assert_eq!(Selection::Idle, *game.selection());
    }

    #[test]
    fn reselecting_another_own_piece() {
        let mut game = Game::new();

        game.activate_square(SQ_7G);
        game.activate_square(SQ_2G);

        assert!(matches!(game.selection(), Selection::Square { from, .. } if *from == SQ_2G));
        assert_eq!(&[SQ_2F], game.legal_moves());
    }

    #[test]
    fn activating_a_non_destination_deselects() {
        let mut game = Game::new();

        game.activate_square(SQ_7G);
        game.activate_square(SQ_5E);

        assert_eq!(Selection::Idle, *game.selection());
        assert_eq!(Color::Black, game.side_to_move());
    }

    #[test]
    fn automatic_promotion_in_the_zone() {
        let mut game = game_from("9/9/9/4P4/9/9/9/9/9 b - 1");

        game.activate_square(SQ_5D);
        game.activate_square(SQ_5C);

        assert_eq!(PieceType::ProPawn, game.piece_at(SQ_5C).unwrap().piece_type);
        assert_eq!(Color::White, game.side_to_move());
    }

    #[test]
    fn no_promotion_outside_the_zone() {
        let mut game = game_from("9/9/9/9/4P4/9/9/9/9 b - 1");

        game.activate_square(SQ_5E);
        game.activate_square(SQ_5D);

        assert_eq!(PieceType::Pawn, game.piece_at(SQ_5D).unwrap().piece_type);
    }

    #[test]
    fn capture_moves_piece_to_hand() {
        let mut game = game_from("9/9/9/4p4/4P4/9/9/9/9 b - 1");

        game.activate_square(SQ_5E);
        game.activate_square(SQ_5D);

        assert_eq!(PieceType::Pawn, game.piece_at(SQ_5D).unwrap().piece_type);
        assert_eq!(Color::Black, game.piece_at(SQ_5D).unwrap().color);
        assert_eq!(
            1,
            game.hand(Piece {
                piece_type: PieceType::Pawn,
                color: Color::Black
            })
        );
    }

    #[test]
    fn hand_slot_selection_requires_stock_and_turn() {
        let mut game = game_from("9/9/9/9/9/9/9/9/9 b P 1");

        // White cannot select on Black's turn.
        game.activate_hand_slot(Color::White, PieceType::Pawn);
        assert_eq!(Selection::Idle, *game.selection());

        // Black has no silver in hand.
        game.activate_hand_slot(Color::Black, PieceType::Silver);
        assert_eq!(Selection::Idle, *game.selection());

        game.activate_hand_slot(Color::Black, PieceType::Pawn);
        assert_eq!(
            Selection::Hand {
                piece_type: PieceType::Pawn
            },
            *game.selection()
        );
    }

    #[test]
    fn hand_slot_clears_board_selection() {
        let mut game = game_from("9/9/9/9/9/9/4P4/9/9 b P 1");

        game.activate_square(SQ_5G);
        assert!(matches!(game.selection(), Selection::Square { .. }));

        game.activate_hand_slot(Color::Black, PieceType::Pawn);
        assert!(matches!(game.selection(), Selection::Hand { .. }));
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn drop_onto_empty_square_commits() {
        let mut game = game_from("9/9/9/9/9/9/9/9/9 b P 1");

        game.activate_hand_slot(Color::Black, PieceType::Pawn);
        game.activate_square(SQ_5E);

        assert_eq!(
            Some(Piece {
                piece_type: PieceType::Pawn,
                color: Color::Black
            }),
            game.piece_at(SQ_5E)
        );
        assert_eq!(
            0,
            game.hand(Piece {
                piece_type: PieceType::Pawn,
                color: Color::Black
            })
        );
        assert_eq!(Color::White, game.side_to_move());
        assert_eq!(Selection::Idle, *game.selection());
    }

    #[test]
    fn drop_onto_occupied_square_keeps_waiting() {
        let mut game = game_from("9/9/9/9/4p4/9/9/9/9 b P 1");

        game.activate_hand_slot(Color::Black, PieceType::Pawn);
        game.activate_square(SQ_5E);

        assert_eq!(PieceType::Pawn, game.piece_at(SQ_5E).unwrap().piece_type);
        assert_eq!(Color::White, game.piece_at(SQ_5E).unwrap().color);
        assert_eq!(
            Selection::Hand {
                piece_type: PieceType::Pawn
            },
            *game.selection()
        );
        assert_eq!(Color::Black, game.side_to_move());
    }

    #[test]
    fn white_can_drop_symmetrically() {
        let mut game = game_from("9/9/9/9/9/9/9/9/9 w g 1");

        game.activate_hand_slot(Color::White, PieceType::Gold);
        game.activate_square(SQ_5E);

        assert_eq!(
            Some(Piece {
                piece_type: PieceType::Gold,
                color: Color::White
            }),
            game.piece_at(SQ_5E)
        );
        assert_eq!(Color::Black, game.side_to_move());
    }

    #[test]
    fn turn_alternates_only_on_commits() {
        let mut game = Game::new();

        // A series of non-committing activations.
        game.activate_square(SQ_5E);
        game.activate_square(SQ_7G);
        game.activate_square(SQ_2G);
        game.activate_square(SQ_9A);
        assert_eq!(Color::Black, game.side_to_move());

        game.activate_square(SQ_2G);
        game.activate_square(SQ_2F);
        assert_eq!(Color::White, game.side_to_move());
    }
}
