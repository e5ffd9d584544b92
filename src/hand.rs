//! A player's pool of captured pieces, available for dropping.

use crate::color::Color;
use crate::piece::Piece;
use crate::piece_type::PieceType;

/// Manages the number of each kind of pieces in each player's hand.
///
/// Only base (never-promoted) kinds are stored; a promoted piece is demoted
/// by the capturing code before it is banked here. Counts never go below
/// zero: decrementing an empty slot is a no-op.
///
/// # Examples
///
/// ```
/// use shogiban::{Color, Hand, Piece, PieceType};
///
/// let mut hand = Hand::default();
/// let pc = Piece {
///     piece_type: PieceType::Pawn,
///     color: Color::Black,
/// };
///
/// hand.increment(pc);
/// assert_eq!(1, hand.get(pc));
///
/// hand.decrement(pc);
/// assert_eq!(0, hand.get(pc));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    inner: [u8; 2 * crate::HAND_PIECE_ORDER.len()],
}

impl Hand {
    /// Returns the number of the given piece in hand.
    ///
    /// Promoted kinds are never stored, so querying one returns 0.
    pub fn get(&self, p: Piece) -> u8 {
        Hand::index(p).map(|i| self.inner[i]).unwrap_or(0)
    }

    /// Sets the number of the given piece in hand.
    pub fn set(&mut self, p: Piece, num: u8) {
        if let Some(i) = Hand::index(p) {
            self.inner[i] = num;
        }
    }

    /// Increments the number of the given piece in hand.
    pub fn increment(&mut self, p: Piece) {
        if let Some(i) = Hand::index(p) {
            self.inner[i] += 1;
        }
    }

    /// Decrements the number of the given piece in hand.
    ///
    /// Does nothing if the count is already zero.
    pub fn decrement(&mut self, p: Piece) {
        if let Some(i) = Hand::index(p) {
            self.inner[i] = self.inner[i].saturating_sub(1);
        }
    }

    /// Clears all pieces from both hands.
    pub fn clear(&mut self) {
        self.inner = Default::default();
    }

    /// Returns `(kind, count)` pairs for one player's hand in the fixed
    /// display order of [`HAND_PIECE_ORDER`](crate::HAND_PIECE_ORDER),
    /// including empty slots.
    pub fn counts(&self, color: Color) -> impl Iterator<Item = (PieceType, u8)> + '_ {
        crate::HAND_PIECE_ORDER.iter().map(move |&piece_type| {
            let count = self.get(Piece { piece_type, color });
            (piece_type, count)
        })
    }

    fn index(p: Piece) -> Option<usize> {
        let kind = crate::HAND_PIECE_ORDER
            .iter()
            .position(|&pt| pt == p.piece_type)?;

        Some(p.color.index() * crate::HAND_PIECE_ORDER.len() + kind)
    }
}
