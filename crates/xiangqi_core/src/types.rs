use std::fmt;

pub const ROWS: i8 = 10;
pub const COLS: i8 = 9;
pub const NUM_SQUARES: usize = 90;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}
impl Color {
    pub const ALL: [Color; 2] = [Color::Red, Color::Black];

    pub fn other(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => f.write_str("red"),
            Color::Black => f.write_str("black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::General,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Horse,
        PieceKind::Chariot,
        PieceKind::Cannon,
        PieceKind::Soldier,
    ];

    pub fn idx(self) -> usize {
        match self {
            PieceKind::General => 0,
            PieceKind::Advisor => 1,
            PieceKind::Elephant => 2,
            PieceKind::Horse => 3,
            PieceKind::Chariot => 4,
            PieceKind::Cannon => 5,
            PieceKind::Soldier => 6,
        }
    }

    /// Pieces that can leave their own half and take part in an attack.
    pub fn is_attacker(self) -> bool {
        matches!(
            self,
            PieceKind::Chariot | PieceKind::Horse | PieceKind::Cannon | PieceKind::Soldier
        )
    }

    fn letter(self) -> char {
        match self {
            PieceKind::General => 'k',
            PieceKind::Advisor => 'a',
            PieceKind::Elephant => 'b',
            PieceKind::Horse => 'n',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Soldier => 'p',
        }
    }

    fn from_letter(ch: char) -> Option<PieceKind> {
        match ch {
            'k' => Some(PieceKind::General),
            'a' => Some(PieceKind::Advisor),
            'b' | 'e' => Some(PieceKind::Elephant),
            'n' | 'h' => Some(PieceKind::Horse),
            'r' => Some(PieceKind::Chariot),
            'c' => Some(PieceKind::Cannon),
            'p' => Some(PieceKind::Soldier),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Board-text letter: upper case for Red, lower case for Black.
    pub fn to_char(self) -> char {
        let ch = self.kind.letter();
        match self.color {
            Color::Red => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }

    pub fn from_char(ch: char) -> Option<Piece> {
        let kind = PieceKind::from_letter(ch.to_ascii_lowercase())?;
        let color = if ch.is_ascii_uppercase() {
            Color::Red
        } else {
            Color::Black
        };
        Some(Piece { color, kind })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: u8, // 0..89
    pub to: u8,   // 0..89
}

impl Move {
    pub fn new(from: u8, to: u8) -> Self {
        Self { from, to }
    }

    /// Parses coordinate notation such as `h2e2`.
    pub fn from_coord(s: &str) -> Option<Move> {
        if s.len() != 4 || !s.is_ascii() {
            return None;
        }
        let from = coord_to_sq(&s[..2])?;
        let to = coord_to_sq(&s[2..])?;
        Some(Move { from, to })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", sq_to_coord(self.from), sq_to_coord(self.to))
    }
}

// Helpers
pub fn row_of(sq: u8) -> i8 {
    (sq / COLS as u8) as i8
}
pub fn col_of(sq: u8) -> i8 {
    (sq % COLS as u8) as i8
}
pub fn sq(row: i8, col: i8) -> Option<u8> {
    if (0..ROWS).contains(&row) && (0..COLS).contains(&col) {
        Some((row as u8) * COLS as u8 + (col as u8))
    } else {
        None
    }
}

pub fn manhattan(a: u8, b: u8) -> i32 {
    ((row_of(a) - row_of(b)).abs() + (col_of(a) - col_of(b)).abs()) as i32
}

/// File letter `a`..`i` for columns 0..8, rank digit `0`..`9` counted from the bottom row.
pub fn sq_to_coord(sq: u8) -> String {
    let f = (b'a' + col_of(sq) as u8) as char;
    let r = (b'0' + (ROWS - 1 - row_of(sq)) as u8) as char;
    format!("{f}{r}")
}

pub fn coord_to_sq(c: &str) -> Option<u8> {
    let b = c.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let f = b[0];
    let r = b[1];
    if !(b'a'..=b'i').contains(&f) || !r.is_ascii_digit() {
        return None;
    }
    let col = (f - b'a') as i8;
    let row = ROWS - 1 - (r - b'0') as i8;
    sq(row, col)
}
