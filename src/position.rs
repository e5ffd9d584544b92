//! Game position: the board, both hands and the side to move.

use itertools::Itertools;
use std::fmt;

use crate::color::Color;
use crate::error::{MoveError, SfenError};
use crate::hand::Hand;
use crate::moves::Move;
use crate::piece::Piece;
use crate::piece_type::PieceType;
use crate::square::Square;

/// Piece grid for the 9×9 board.
#[derive(Clone, Debug)]
struct PieceGrid([Option<Piece>; crate::NUM_SQUARES]);

impl PieceGrid {
    fn empty() -> PieceGrid {
        PieceGrid([None; crate::NUM_SQUARES])
    }

    fn get(&self, sq: Square) -> Option<Piece> {
        self.0[sq.index()]
    }

    fn set(&mut self, sq: Square, pc: Option<Piece>) {
        self.0[sq.index()] = pc;
    }
}

/// Returns true if moving the given piece between the given squares makes it
/// eligible for promotion: the piece kind must be promotable and the move has
/// to start or end inside the mover's promotion zone.
///
/// # Examples
///
/// ```
/// use shogiban::{can_promote, Color, Piece, PieceType};
/// use shogiban::square::consts::*;
///
/// let bishop = Piece {
///     piece_type: PieceType::Bishop,
///     color: Color::Black,
/// };
///
/// assert!(can_promote(bishop, SQ_7G, SQ_3C));
/// assert!(!can_promote(bishop, SQ_7G, SQ_5E));
/// ```
pub fn can_promote(piece: Piece, from: Square, to: Square) -> bool {
    piece.piece_type.is_promotable()
        && (from.in_promotion_zone(piece.color) || to.in_promotion_zone(piece.color))
}

/// Represents the game state: board, hands, side to move and ply count.
///
/// `Position` enforces only the movement rules themselves. There is no
/// check or checkmate detection and no drop restriction beyond "the target
/// square is empty and the piece is in hand"; a move that exposes or even
/// captures a king is applied like any other.
#[derive(Debug, Clone)]
pub struct Position {
    board: PieceGrid,
    hand: Hand,
    side_to_move: Color,
    ply: u16,
}

impl Default for Position {
    fn default() -> Position {
        Position::new()
    }
}

impl Position {
    /// Creates a new position with an empty board.
    pub fn new() -> Position {
        Position {
            board: PieceGrid::empty(),
            hand: Hand::default(),
            side_to_move: Color::Black,
            ply: 1,
        }
    }

    /// Creates a position with the standard starting setup, Black to move.
    pub fn startpos() -> Position {
        let mut pos = Position::new();
        pos.set_sfen(crate::STARTING_SFEN)
            .expect("invalid starting SFEN");
        pos
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the piece at the given square.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.get(sq)
    }

    /// Returns the current side to move.
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the current ply count.
    pub fn ply(&self) -> u16 {
        self.ply
    }

    /// Returns the number of the given piece in hand.
    pub fn hand(&self, p: Piece) -> u8 {
        self.hand.get(p)
    }

    /// Returns `(kind, count)` pairs for one player's hand in display order.
    pub fn hand_counts(&self, color: Color) -> impl Iterator<Item = (PieceType, u8)> + '_ {
        self.hand.counts(color)
    }

    // =========================================================================
    // Move generation
    // =========================================================================

    /// Returns every square the piece on `from` can reach.
    ///
    /// A square is reachable when it is on the board and either empty or
    /// occupied by an opponent piece; sliding pieces stop at the first
    /// occupied square. Returns an empty vector for an empty source square.
    /// No king-safety filtering is applied.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        let mut moves = Vec::new();

        if let Some(piece) = self.board.get(from) {
            for (df, dr) in slide_directions(piece.piece_type, piece.color) {
                let mut current = from;
                while let Some(to) = current.shift(df, dr) {
                    match self.board.get(to) {
                        None => {
                            moves.push(to);
                            current = to;
                        }
                        Some(target) => {
                            if target.color != piece.color {
                                moves.push(to);
                            }
                            break;
                        }
                    }
                }
            }

            for (df, dr) in step_directions(piece.piece_type, piece.color) {
                if let Some(to) = from.shift(df, dr) {
                    match self.board.get(to) {
                        Some(target) if target.color == piece.color => {}
                        _ => moves.push(to),
                    }
                }
            }
        }

        moves
    }

    // =========================================================================
    // Move execution
    // =========================================================================

    /// Makes a move on the position.
    ///
    /// On success the board and hands are updated, the side to move flips
    /// and the ply count advances; on error the position is left untouched.
    pub fn make_move(&mut self, m: Move) -> Result<(), MoveError> {
        match m {
            Move::Normal { from, to, promote } => {
                self.make_normal_move(from, to, promote)?;
            }
            Move::Drop { to, piece_type } => {
                self.make_drop_move(to, piece_type)?;
            }
        }

        self.side_to_move = self.side_to_move.flip();
        self.ply += 1;

        Ok(())
    }

    fn make_normal_move(&mut self, from: Square, to: Square, promote: bool) -> Result<(), MoveError> {
        let piece = self
            .board
            .get(from)
            .ok_or(MoveError::Inconsistent("no piece at the source square"))?;

        if piece.color != self.side_to_move {
            return Err(MoveError::EnemysTurn);
        }

        if !self.legal_destinations(from).contains(&to) {
            return Err(MoveError::Inconsistent("the destination is not reachable"));
        }

        if promote && !can_promote(piece, from, to) {
            return Err(MoveError::Inconsistent("the piece cannot promote"));
        }

        // A captured piece goes to the capturer's hand in its base form.
        if let Some(captured) = self.board.get(to) {
            let banked = captured.unpromote().unwrap_or(captured).flip();
            self.hand.increment(banked);
        }

        let placed = if promote {
            piece
                .promote()
                .ok_or(MoveError::Inconsistent("the piece cannot promote"))?
        } else {
            piece
        };

        self.board.set(from, None);
        self.board.set(to, Some(placed));

        Ok(())
    }

    fn make_drop_move(&mut self, to: Square, piece_type: PieceType) -> Result<(), MoveError> {
        if self.board.get(to).is_some() {
            return Err(MoveError::Inconsistent("the square is occupied"));
        }

        if piece_type.unpromote().is_some() {
            return Err(MoveError::Inconsistent("promoted pieces cannot be dropped"));
        }

        let piece = Piece {
            piece_type,
            color: self.side_to_move,
        };

        if self.hand.get(piece) == 0 {
            return Err(MoveError::Inconsistent("the piece is not in hand"));
        }

        self.hand.decrement(piece);
        self.board.set(to, Some(piece));

        Ok(())
    }

    // =========================================================================
    // SFEN
    // =========================================================================

    /// Sets the position from a SFEN string.
    ///
    /// Format: `<board> <side to move> <hands> <ply>`, e.g.
    /// `lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1`.
    pub fn set_sfen(&mut self, sfen: &str) -> Result<(), SfenError> {
        let parts: Vec<&str> = sfen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(SfenError::MissingDataFields);
        }

        self.board = PieceGrid::empty();
        self.hand.clear();

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != crate::BOARD_HEIGHT as usize {
            return Err(SfenError::IllegalBoardState);
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file = 0u8;
            let mut chars = rank_str.chars();

            while let Some(c) = chars.next() {
                if file > crate::BOARD_WIDTH {
                    return Err(SfenError::IllegalBoardState);
                }

                if let Some(n) = c.to_digit(10) {
                    file += n as u8;
                } else if c == '+' {
                    let next_c = chars.next().ok_or(SfenError::IllegalPieceType)?;
                    let base = Piece::from_sfen(next_c).ok_or(SfenError::IllegalPieceType)?;
                    let promoted = base.promote().ok_or(SfenError::IllegalPieceType)?;
                    let sq =
                        Square::new(file, rank_idx as u8).ok_or(SfenError::IllegalBoardState)?;
                    self.board.set(sq, Some(promoted));
                    file += 1;
                } else {
                    let piece = Piece::from_sfen(c).ok_or(SfenError::IllegalPieceType)?;
                    let sq =
                        Square::new(file, rank_idx as u8).ok_or(SfenError::IllegalBoardState)?;
                    self.board.set(sq, Some(piece));
                    file += 1;
                }
            }
        }

        self.side_to_move = match parts[1] {
            "b" => Color::Black,
            "w" => Color::White,
            _ => return Err(SfenError::IllegalSideToMove),
        };

        if parts[2] != "-" {
            let mut count = 0u8;
            for c in parts[2].chars() {
                if let Some(n) = c.to_digit(10) {
                    count = count * 10 + n as u8;
                } else {
                    let piece = Piece::from_sfen(c).ok_or(SfenError::IllegalPieceType)?;
                    if piece.piece_type.unpromote().is_some() {
                        return Err(SfenError::IllegalPieceType);
                    }
                    let current = self.hand.get(piece);
                    self.hand.set(piece, current + count.max(1));
                    count = 0;
                }
            }
        }

        self.ply = parts[3].parse()?;

        Ok(())
    }

    /// Returns the SFEN representation of this position.
    pub fn to_sfen(&self) -> String {
        let board = (0..crate::BOARD_HEIGHT)
            .map(|rank| {
                let mut rank_str = String::new();
                let mut empty_count = 0;
                for file in 0..crate::BOARD_WIDTH {
                    let sq = Square::new(file, rank).expect("square in range");
                    match self.board.get(sq) {
                        Some(piece) => {
                            if empty_count > 0 {
                                rank_str.push_str(&empty_count.to_string());
                                empty_count = 0;
                            }
                            rank_str.push_str(&piece.to_string());
                        }
                        None => empty_count += 1,
                    }
                }
                if empty_count > 0 {
                    rank_str.push_str(&empty_count.to_string());
                }
                rank_str
            })
            .join("/");

        let side = if self.side_to_move == Color::Black {
            "b"
        } else {
            "w"
        };

        let hand = Color::iter()
            .flat_map(|color| {
                self.hand.counts(color).filter_map(move |(piece_type, n)| {
                    let pc = Piece { piece_type, color };
                    match n {
                        0 => None,
                        1 => Some(pc.to_string()),
                        _ => Some(format!("{n}{pc}")),
                    }
                })
            })
            .join("");
        let hand = if hand.is_empty() {
            "-".to_string()
        } else {
            hand
        };

        format!("{} {} {} {}", board, side, hand, self.ply)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "   9   8   7   6   5   4   3   2   1")?;
        writeln!(f, "+---+---+---+---+---+---+---+---+---+")?;

        for rank in 0..crate::BOARD_HEIGHT {
            write!(f, "|")?;
            for file in (0..crate::BOARD_WIDTH).rev() {
                let sq = Square::new(file, rank).expect("square in range");
                if let Some(piece) = self.board.get(sq) {
                    write!(f, "{:>3}|", piece.to_string())?;
                } else {
                    write!(f, "   |")?;
                }
            }

            writeln!(f, " {}", (b'a' + rank) as char)?;
            writeln!(f, "+---+---+---+---+---+---+---+---+---+")?;
        }

        writeln!(f, "Side to move: {}", self.side_to_move)?;

        for color in Color::iter() {
            let hand = self
                .hand
                .counts(color)
                .filter(|&(_, n)| n > 0)
                .map(|(piece_type, n)| format!("{}{}", Piece { piece_type, color }, n))
                .join(" ");
            writeln!(f, "Hand ({color}): {hand}")?;
        }

        write!(f, "Ply: {}", self.ply)
    }
}

/// Directions the given piece kind slides in, as `(file, rank)` deltas.
fn slide_directions(pt: PieceType, color: Color) -> Vec<(i8, i8)> {
    let forward = if color == Color::Black { -1 } else { 1 };

    match pt {
        PieceType::Lance => vec![(0, forward)],
        PieceType::Rook | PieceType::ProRook => vec![(0, -1), (0, 1), (-1, 0), (1, 0)],
        PieceType::Bishop | PieceType::ProBishop => vec![(-1, -1), (1, -1), (-1, 1), (1, 1)],
        _ => vec![],
    }
}

/// Directions the given piece kind steps in, as `(file, rank)` deltas.
fn step_directions(pt: PieceType, color: Color) -> Vec<(i8, i8)> {
    let forward = if color == Color::Black { -1 } else { 1 };

    match pt {
        PieceType::King => vec![
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ],
        PieceType::Gold
        | PieceType::ProSilver
        | PieceType::ProKnight
        | PieceType::ProLance
        | PieceType::ProPawn => vec![
            (-1, forward),
            (0, forward),
            (1, forward),
            (-1, 0),
            (1, 0),
            (0, -forward),
        ],
        PieceType::Silver => vec![
            (-1, forward),
            (0, forward),
            (1, forward),
            (-1, -forward),
            (1, -forward),
        ],
        PieceType::Knight => vec![(-1, 2 * forward), (1, 2 * forward)],
        PieceType::Pawn => vec![(0, forward)],
        // The dragon adds single diagonal steps to the rook's slides,
        // the horse single orthogonal steps to the bishop's.
        PieceType::ProRook => vec![(-1, -1), (1, -1), (-1, 1), (1, 1)],
        PieceType::ProBishop => vec![(0, -1), (0, 1), (-1, 0), (1, 0)],
        PieceType::Rook | PieceType::Bishop | PieceType::Lance => vec![],
    }
}
