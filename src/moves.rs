//! Move representation and notation formatting.

use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::piece_type::PieceType;
use crate::square::Square;

/// Represents a move which either is a normal move or a drop move.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Move {
    /// A normal move from one square to another, optionally promoting.
    Normal {
        from: Square,
        to: Square,
        promote: bool,
    },
    /// A drop move placing a piece from hand onto an empty square.
    Drop { to: Square, piece_type: PieceType },
}

impl Move {
    /// Creates a new instance of `Move` from SFEN formatted string.
    ///
    /// Format: `7g7f` for normal moves, `7c7b+` for promotion, `P*5e` for
    /// drops.
    pub fn from_sfen(s: &str) -> Option<Move> {
        if !s.is_ascii() {
            return None;
        }

        let chars: Vec<char> = s.chars().collect();

        // Drop move, e.g. "P*5e".
        if chars.len() == 4 && chars[1] == '*' {
            if !chars[0].is_uppercase() {
                return None;
            }
            let piece_type = chars[0]
                .to_lowercase()
                .next()
                .and_then(PieceType::from_sfen)?;
            let to = Square::from_sfen(&s[2..4])?;
            return Some(Move::Drop { to, piece_type });
        }

        if s.len() != 4 && (s.len() != 5 || chars[4] != '+') {
            return None;
        }

        let from = Square::from_sfen(&s[0..2])?;
        let to = Square::from_sfen(&s[2..4])?;
        let promote = s.len() == 5;

        Some(Move::Normal { from, to, promote })
    }

    /// Returns the destination square of this move.
    pub fn to(&self) -> Square {
        match *self {
            Move::Normal { to, .. } => to,
            Move::Drop { to, .. } => to,
        }
    }

    /// Returns true if this is a drop move.
    pub fn is_drop(&self) -> bool {
        matches!(self, Move::Drop { .. })
    }

    /// Returns true if this move includes promotion.
    pub fn is_promotion(&self) -> bool {
        matches!(self, Move::Normal { promote: true, .. })
    }

    /// Formats the move in Japanese notation.
    ///
    /// # Arguments
    /// * `piece_type` - The kind of the piece being moved or dropped
    /// * `color` - The color of the player making the move
    ///
    /// # Examples
    ///
    /// ```
    /// use shogiban::{Color, Move, PieceType};
    /// use shogiban::square::consts::*;
    ///
    /// let mv = Move::Normal { from: SQ_7G, to: SQ_7F, promote: false };
    /// assert_eq!("☗７六歩", mv.to_japanese(PieceType::Pawn, Color::Black));
    ///
    /// let drop = Move::Drop { to: SQ_5E, piece_type: PieceType::Silver };
    /// assert_eq!("☗５五銀打", drop.to_japanese(PieceType::Silver, Color::Black));
    /// ```
    pub fn to_japanese(&self, piece_type: PieceType, color: Color) -> String {
        let symbol = match color {
            Color::Black => "☗",
            Color::White => "☖",
        };

        match *self {
            Move::Normal { to, promote, .. } => {
                if promote {
                    format!("{}{}{}成", symbol, to.to_japanese(), piece_type.kanji())
                } else {
                    format!("{}{}{}", symbol, to.to_japanese(), piece_type.kanji())
                }
            }
            Move::Drop { to, piece_type: pt } => {
                format!("{}{}{}打", symbol, to.to_japanese(), pt.kanji())
            }
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match *self {
            Move::Normal { from, to, promote } => {
                write!(f, "{}{}{}", from, to, if promote { "+" } else { "" })
            }
            Move::Drop { to, piece_type } => {
                write!(f, "{}*{}", piece_type.to_string().to_uppercase(), to)
            }
        }
    }
}

/// Error type for parsing a move from SFEN notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMoveError;

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid move notation")
    }
}

impl std::error::Error for ParseMoveError {}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_sfen(s).ok_or(ParseMoveError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::consts::*;

    #[test]
    fn from_sfen() {
        let ok_cases = [
            (
                "9a1i",
                Move::Normal {
                    from: SQ_9A,
                    to: SQ_1I,
                    promote: false,
                },
            ),
            (
                "9a1i+",
                Move::Normal {
                    from: SQ_9A,
                    to: SQ_1I,
                    promote: true,
                },
            ),
            (
                "S*5e",
                Move::Drop {
                    to: SQ_5E,
                    piece_type: PieceType::Silver,
                },
            ),
        ];
        let ng_cases = [
            "", "9j1i", "9a1j", "9a1", "9aj", "j1i", "9a1i1", "9a1i-", "S+5e", "S 5e", "Z*5e",
            "s*5e", "S*9j",
        ];

        for (i, case) in ok_cases.iter().enumerate() {
            let m = Move::from_sfen(case.0);
            assert!(m.is_some(), "failed at #{i}");
            assert_eq!(case.1, m.unwrap(), "failed at #{i}");
        }

        for (i, case) in ng_cases.iter().enumerate() {
            assert!(Move::from_sfen(case).is_none(), "failed at #{i}");
        }
    }

    #[test]
    fn to_sfen() {
        let cases = [
            (
                "9a1i",
                Move::Normal {
                    from: SQ_9A,
                    to: SQ_1I,
                    promote: false,
                },
            ),
            (
                "9a1i+",
                Move::Normal {
                    from: SQ_9A,
                    to: SQ_1I,
                    promote: true,
                },
            ),
            (
                "S*5e",
                Move::Drop {
                    to: SQ_5E,
                    piece_type: PieceType::Silver,
                },
            ),
        ];

        for (i, case) in cases.iter().enumerate() {
            assert_eq!(case.0, case.1.to_string(), "failed at #{i}");
        }
    }

    #[test]
    fn parse_roundtrip() {
        for s in ["7g7f", "2b8h+", "N*4e"] {
            let mv: Move = s.parse().unwrap();
            assert_eq!(s, mv.to_string());
        }
    }

    #[test]
    fn to_japanese_normal_move() {
        let mv = Move::Normal {
            from: SQ_7G,
            to: SQ_7F,
            promote: false,
        };
        assert_eq!("☗７六歩", mv.to_japanese(PieceType::Pawn, Color::Black));

        let mv = Move::Normal {
            from: SQ_3C,
            to: SQ_3D,
            promote: false,
        };
        assert_eq!("☖３四歩", mv.to_japanese(PieceType::Pawn, Color::White));

        let mv = Move::Normal {
            from: SQ_7C,
            to: SQ_7B,
            promote: true,
        };
        assert_eq!("☗７二歩成", mv.to_japanese(PieceType::Pawn, Color::Black));
    }

    #[test]
    fn to_japanese_drop_move() {
        let mv = Move::Drop {
            to: SQ_5E,
            piece_type: PieceType::Silver,
        };
        assert_eq!("☗５五銀打", mv.to_japanese(PieceType::Silver, Color::Black));

        let mv = Move::Drop {
            to: SQ_7D,
            piece_type: PieceType::Pawn,
        };
        assert_eq!("☖７四歩打", mv.to_japanese(PieceType::Pawn, Color::White));
    }

    #[test]
    fn move_properties() {
        let normal = Move::Normal {
            from: SQ_1A,
            to: SQ_2B,
            promote: false,
        };
        assert_eq!(SQ_2B, normal.to());
        assert!(!normal.is_drop());
        assert!(!normal.is_promotion());

        let promo = Move::Normal {
            from: SQ_1A,
            to: SQ_2B,
            promote: true,
        };
        assert!(promo.is_promotion());

        let drop = Move::Drop {
            to: SQ_2B,
            piece_type: PieceType::Silver,
        };
        assert!(drop.is_drop());
        assert!(!drop.is_promotion());
    }
}
