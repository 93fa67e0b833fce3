//! Skirmish: a compact 5x5 two-player game used to exercise the engines.
//!
//! Each side fields one General, three Guards, and two Towers. Generals and
//! Guards step one square in any direction; Towers step one square
//! orthogonally. Capture is by displacement. A side whose General is
//! attacked is in check; a side with no legal move is checkmated if in
//! check, stalemated otherwise.
//!
//! The canonical position key is the 25 board squares in row-major order
//! (rank 1 first, uppercase = first player) followed by the side to move:
//! `TDGDT..D.........d..tdgdt f` is the starting position.

use game_core::{
    file_of, rank_of, square_at, Color, GamePosition, Move, PieceKind, PlacedPiece, PositionError,
    Square,
};

pub const BOARD_W: u8 = 5;
pub const BOARD_H: u8 = 5;
const SQUARES: usize = (BOARD_W as usize) * (BOARD_H as usize);

pub const GENERAL: PieceKind = PieceKind(0);
pub const GUARD: PieceKind = PieceKind(1);
pub const TOWER: PieceKind = PieceKind(2);

/// Canonical key of the starting position.
pub const START_KEY: &str = concat!("TDGDT", "..D..", ".....", "..d..", "tdgdt", " f");

/// Step directions as (file, rank) deltas. Orthogonal steps first; Towers
/// use only those four.
const DIRS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

fn steps_of(kind: PieceKind) -> &'static [(i8, i8)] {
    if kind == TOWER {
        &DIRS[..4]
    } else {
        &DIRS
    }
}

fn piece_char(color: Color, kind: PieceKind) -> char {
    let c = match kind {
        GENERAL => 'G',
        GUARD => 'D',
        _ => 'T',
    };
    match color {
        Color::First => c,
        Color::Second => c.to_ascii_lowercase(),
    }
}

fn char_piece(c: char) -> Option<(Color, PieceKind)> {
    let kind = match c.to_ascii_uppercase() {
        'G' => GENERAL,
        'D' => GUARD,
        'T' => TOWER,
        _ => return None,
    };
    let color = if c.is_ascii_uppercase() {
        Color::First
    } else {
        Color::Second
    };
    Some((color, kind))
}

/// One Skirmish position. Cloned per search branch; never mutated in place
/// once handed to the engine.
#[derive(Clone, PartialEq, Eq)]
pub struct Skirmish {
    board: [Option<(Color, PieceKind)>; SQUARES],
    side: Color,
}

impl Skirmish {
    /// The starting position.
    pub fn start() -> Self {
        Self::decode(START_KEY).expect("start key is valid")
    }

    fn offset(sq: Square, df: i8, dr: i8) -> Option<Square> {
        let file = file_of(sq, BOARD_W) as i8 + df;
        let rank = rank_of(sq, BOARD_W) as i8 + dr;
        if (0..BOARD_W as i8).contains(&file) && (0..BOARD_H as i8).contains(&rank) {
            Some(square_at(file as u8, rank as u8, BOARD_W))
        } else {
            None
        }
    }

    fn general_square(board: &[Option<(Color, PieceKind)>; SQUARES], color: Color) -> Option<Square> {
        board
            .iter()
            .position(|cell| *cell == Some((color, GENERAL)))
            .map(|i| i as Square)
    }

    /// True if any piece of `by` could step onto `target`.
    fn attacked_by(board: &[Option<(Color, PieceKind)>; SQUARES], target: Square, by: Color) -> bool {
        for sq in 0..SQUARES as Square {
            if let Some((color, kind)) = board[sq as usize] {
                if color == by {
                    for &(df, dr) in steps_of(kind) {
                        if Self::offset(sq, df, dr) == Some(target) {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }

    fn execute(&self, mv: &Move) -> Self {
        let mut board = self.board;
        board[mv.to as usize] = board[mv.from as usize];
        board[mv.from as usize] = None;
        Self {
            board,
            side: self.side.other(),
        }
    }

    /// Finds the legal move with the given from/to squares, if any. Handy
    /// for callers that parse moves from coordinates.
    pub fn find_move(&self, from: Square, to: Square) -> Option<Move> {
        let probe = Move::new(from, to, GUARD);
        self.legal_moves().into_iter().find(|m| *m == probe)
    }
}

impl GamePosition for Skirmish {
    fn decode(key: &str) -> Result<Self, PositionError> {
        let (board_part, side_part) = key
            .split_once(' ')
            .ok_or_else(|| PositionError::invalid_key(key, "missing side-to-move field"))?;
        if board_part.chars().count() != SQUARES {
            return Err(PositionError::invalid_key(
                key,
                format!("board field must be {SQUARES} squares"),
            ));
        }
        let mut board = [None; SQUARES];
        for (i, c) in board_part.chars().enumerate() {
            if c == '.' {
                continue;
            }
            board[i] = Some(
                char_piece(c)
                    .ok_or_else(|| PositionError::invalid_key(key, format!("unknown piece `{c}`")))?,
            );
        }
        let side = match side_part {
            "f" => Color::First,
            "s" => Color::Second,
            _ => {
                return Err(PositionError::invalid_key(
                    key,
                    "side to move must be `f` or `s`",
                ))
            }
        };
        for color in [Color::First, Color::Second] {
            let generals = board
                .iter()
                .filter(|cell| **cell == Some((color, GENERAL)))
                .count();
            if generals != 1 {
                return Err(PositionError::invalid_key(
                    key,
                    "each side must have exactly one general",
                ));
            }
        }
        Ok(Self { board, side })
    }

    fn key(&self) -> String {
        let mut out = String::with_capacity(SQUARES + 2);
        for cell in &self.board {
            match cell {
                Some((color, kind)) => out.push(piece_char(*color, *kind)),
                None => out.push('.'),
            }
        }
        out.push(' ');
        out.push(match self.side {
            Color::First => 'f',
            Color::Second => 's',
        });
        out
    }

    fn board_size(&self) -> (u8, u8) {
        (BOARD_W, BOARD_H)
    }

    fn side_to_move(&self) -> Color {
        self.side
    }

    fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(32);
        for from in 0..SQUARES as Square {
            let (color, kind) = match self.board[from as usize] {
                Some(p) if p.0 == self.side => p,
                _ => continue,
            };
            for &(df, dr) in steps_of(kind) {
                let to = match Self::offset(from, df, dr) {
                    Some(to) => to,
                    None => continue,
                };
                let capture = match self.board[to as usize] {
                    Some((c, _)) if c == color => continue,
                    Some((_, victim)) => Some(victim),
                    None => None,
                };
                let mut mv = Move::new(from, to, kind);
                mv.capture = capture;
                // Reject moves that leave the own general attacked
                let next = self.execute(&mv);
                if let Some(gen_sq) = Self::general_square(&next.board, color) {
                    if !Self::attacked_by(&next.board, gen_sq, color.other()) {
                        moves.push(mv);
                    }
                }
            }
        }
        moves
    }

    fn apply(&self, mv: &Move) -> Result<Self, PositionError> {
        // Match against the live legal-move list so the capture annotation
        // is authoritative even when the caller built the move from bare
        // coordinates.
        match self.legal_moves().into_iter().find(|m| m == mv) {
            Some(found) => Ok(self.execute(&found)),
            None => Err(PositionError::illegal_move(
                format!(
                    "{}{}",
                    game_core::coord(mv.from, BOARD_W),
                    game_core::coord(mv.to, BOARD_W)
                ),
                self.key(),
            )),
        }
    }

    fn in_check(&self) -> bool {
        match Self::general_square(&self.board, self.side) {
            Some(gen_sq) => Self::attacked_by(&self.board, gen_sq, self.side.other()),
            None => false,
        }
    }

    fn pieces(&self) -> Vec<PlacedPiece> {
        let mut out = Vec::with_capacity(12);
        for sq in 0..SQUARES as Square {
            if let Some((color, kind)) = self.board[sq as usize] {
                out.push(PlacedPiece {
                    square: sq,
                    color,
                    kind,
                });
            }
        }
        out
    }
}

impl std::fmt::Display for Skirmish {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..BOARD_H).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..BOARD_W {
                let sq = square_at(file, rank, BOARD_W) as usize;
                let c = match self.board[sq] {
                    Some((color, kind)) => piece_char(color, kind),
                    None => '.',
                };
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e")
    }
}

/// Built-in opening lines, in the engine's JSON book format. Keys are
/// canonical Skirmish position keys.
pub fn openings_json() -> &'static str {
    r#"{
  "TDGDT..D.........d..tdgdt f": [
    { "from": 0, "to": 5, "priority": 88, "name": "Left Tower Lift" },
    { "from": 4, "to": 9, "priority": 84, "name": "Right Tower Lift" },
    { "from": 1, "to": 6, "priority": 70, "name": "Guard Up" }
  ],
  ".DGDTT.D.........d..tdgdt s": [
    { "from": 20, "to": 15, "priority": 88, "name": "Left Tower Lift" },
    { "from": 24, "to": 19, "priority": 84, "name": "Right Tower Lift" }
  ]
}"#
}
