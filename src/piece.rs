//! A piece on the board: a kind owned by a side.

use std::fmt;

use crate::color::Color;
use crate::piece_type::PieceType;

/// Represents a piece on the game board.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    /// Creates a new instance of `Piece` from SFEN formatted string.
    ///
    /// Upper-case letters are Black's pieces, lower-case White's.
    pub fn from_sfen(c: char) -> Option<Piece> {
        let color = if c.is_uppercase() {
            Color::Black
        } else {
            Color::White
        };

        c.to_lowercase()
            .next()
            .and_then(PieceType::from_sfen)
            .map(|piece_type| Piece { piece_type, color })
    }

    /// Returns an instance of `Piece` after promotion.
    ///
    /// # Examples
    ///
    /// ```
    /// use shogiban::{Color, Piece, PieceType};
    ///
    /// let pawn = Piece {
    ///     piece_type: PieceType::Pawn,
    ///     color: Color::Black,
    /// };
    /// let tokin = Piece {
    ///     piece_type: PieceType::ProPawn,
    ///     color: Color::Black,
    /// };
    ///
    /// assert_eq!(Some(tokin), pawn.promote());
    /// ```
    pub fn promote(self) -> Option<Piece> {
        self.piece_type.promote().map(|piece_type| Piece {
            piece_type,
            color: self.color,
        })
    }

    /// Returns an instance of `Piece` before promotion.
    pub fn unpromote(self) -> Option<Piece> {
        self.piece_type.unpromote().map(|piece_type| Piece {
            piece_type,
            color: self.color,
        })
    }

    /// Returns an instance of `Piece` with the reversed color.
    pub fn flip(self) -> Piece {
        Piece {
            piece_type: self.piece_type,
            color: self.color.flip(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.color == Color::Black {
            write!(f, "{}", self.piece_type.to_string().to_uppercase())
        } else {
            write!(f, "{}", self.piece_type)
        }
    }
}
