//! Piece kinds and the promotion mapping.

use std::fmt;

/// Represents a kind of pieces.
///
/// The six promotable base kinds (`Rook`, `Bishop`, `Silver`, `Knight`,
/// `Lance`, `Pawn`) each have exactly one promoted counterpart; `King` and
/// `Gold` never promote.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PieceType {
    King,
    Rook,
    Bishop,
    Gold,
    Silver,
    Knight,
    Lance,
    Pawn,
    ProRook,
    ProBishop,
    ProSilver,
    ProKnight,
    ProLance,
    ProPawn,
}

impl PieceType {
    /// Returns an iterator over all piece kinds.
    pub fn iter() -> PieceTypeIter {
        PieceTypeIter { current: 0 }
    }

    /// Creates a new instance of `PieceType` from SFEN formatted string.
    pub fn from_sfen(c: char) -> Option<PieceType> {
        Some(match c {
            'k' => PieceType::King,
            'r' => PieceType::Rook,
            'b' => PieceType::Bishop,
            'g' => PieceType::Gold,
            's' => PieceType::Silver,
            'n' => PieceType::Knight,
            'l' => PieceType::Lance,
            'p' => PieceType::Pawn,
            _ => return None,
        })
    }

    /// Returns an instance of `PieceType` after promotion.
    ///
    /// # Examples
    ///
    /// ```
    /// use shogiban::PieceType;
    ///
    /// assert_eq!(Some(PieceType::ProPawn), PieceType::Pawn.promote());
    /// assert_eq!(None, PieceType::Gold.promote());
    /// ```
    pub fn promote(self) -> Option<PieceType> {
        Some(match self {
            PieceType::Rook => PieceType::ProRook,
            PieceType::Bishop => PieceType::ProBishop,
            PieceType::Silver => PieceType::ProSilver,
            PieceType::Knight => PieceType::ProKnight,
            PieceType::Lance => PieceType::ProLance,
            PieceType::Pawn => PieceType::ProPawn,
            _ => return None,
        })
    }

    /// Returns an instance of `PieceType` before promotion.
    ///
    /// # Examples
    ///
    /// ```
    /// use shogiban::PieceType;
    ///
    /// assert_eq!(Some(PieceType::Pawn), PieceType::ProPawn.unpromote());
    /// assert_eq!(None, PieceType::Pawn.unpromote());
    /// ```
    pub fn unpromote(self) -> Option<PieceType> {
        Some(match self {
            PieceType::ProRook => PieceType::Rook,
            PieceType::ProBishop => PieceType::Bishop,
            PieceType::ProSilver => PieceType::Silver,
            PieceType::ProKnight => PieceType::Knight,
            PieceType::ProLance => PieceType::Lance,
            PieceType::ProPawn => PieceType::Pawn,
            _ => return None,
        })
    }

    /// Returns true if this piece kind can promote.
    pub fn is_promotable(self) -> bool {
        self.promote().is_some()
    }

    /// Returns the base (never-promoted) kind: the unpromoted counterpart
    /// for promoted kinds, the kind itself otherwise.
    pub fn demote(self) -> PieceType {
        self.unpromote().unwrap_or(self)
    }

    /// Returns the kanji used for this piece kind on the board.
    pub fn kanji(self) -> &'static str {
        match self {
            PieceType::King => "玉",
            PieceType::Rook => "飛",
            PieceType::Bishop => "角",
            PieceType::Gold => "金",
            PieceType::Silver => "銀",
            PieceType::Knight => "桂",
            PieceType::Lance => "香",
            PieceType::Pawn => "歩",
            PieceType::ProRook => "龍",
            PieceType::ProBishop => "馬",
            PieceType::ProSilver => "成銀",
            PieceType::ProKnight => "成桂",
            PieceType::ProLance => "成香",
            PieceType::ProPawn => "と",
        }
    }

    /// Returns the unique index for this piece kind for array indexing purpose.
    #[inline(always)]
    pub fn index(self) -> usize {
        match self {
            PieceType::King => 0,
            PieceType::Rook => 1,
            PieceType::Bishop => 2,
            PieceType::Gold => 3,
            PieceType::Silver => 4,
            PieceType::Knight => 5,
            PieceType::Lance => 6,
            PieceType::Pawn => 7,
            PieceType::ProRook => 8,
            PieceType::ProBishop => 9,
            PieceType::ProSilver => 10,
            PieceType::ProKnight => 11,
            PieceType::ProLance => 12,
            PieceType::ProPawn => 13,
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                PieceType::King => "k",
                PieceType::Rook => "r",
                PieceType::Bishop => "b",
                PieceType::Gold => "g",
                PieceType::Silver => "s",
                PieceType::Knight => "n",
                PieceType::Lance => "l",
                PieceType::Pawn => "p",
                PieceType::ProRook => "+r",
                PieceType::ProBishop => "+b",
                PieceType::ProSilver => "+s",
                PieceType::ProKnight => "+n",
                PieceType::ProLance => "+l",
                PieceType::ProPawn => "+p",
            }
        )
    }
}

/// An iterator over all piece kinds.
pub struct PieceTypeIter {
    current: usize,
}

impl Iterator for PieceTypeIter {
    type Item = PieceType;

    fn next(&mut self) -> Option<PieceType> {
        let current = match self.current {
            0 => PieceType::King,
            1 => PieceType::Rook,
            2 => PieceType::Bishop,
            3 => PieceType::Gold,
            4 => PieceType::Silver,
            5 => PieceType::Knight,
            6 => PieceType::Lance,
            7 => PieceType::Pawn,
            8 => PieceType::ProRook,
            9 => PieceType::ProBishop,
            10 => PieceType::ProSilver,
            11 => PieceType::ProKnight,
            12 => PieceType::ProLance,
            13 => PieceType::ProPawn,
            _ => return None,
        };

        self.current += 1;

        Some(current)
    }
}
