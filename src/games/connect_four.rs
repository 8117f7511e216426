use std::fmt::Display;

use smallvec::SmallVec;

use crate::{
    data_structures::ActionList,
    game_tree_search::{Eval, Game, HV},
    types::{outcome::Outcome, player_id::PlayerId},
};

pub const STANDARD_ROWS: u8 = 6;
pub const STANDARD_COLS: u8 = 7;
pub const STANDARD_CONNECT: u8 = 4;

const CENTER_WEIGHT: HV = 3;
const DIRECTIONS: [(i16, i16); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectFourError {
    #[error("column {column} is outside of the board ({cols} columns)")]
    ColumnOutOfRange { column: u8, cols: u8 },
    #[error("column {0} is full")]
    ColumnFull(u8),
    #[error("the game is already over")]
    GameOver,
    #[error("a {rows}x{cols} board cannot hold {connect} in a row")]
    InvalidBoard { rows: u8, cols: u8, connect: u8 },
    #[error("invalid board diagram: {0}")]
    InvalidDiagram(String),
}

/// Drop a piece into the given column (0-based, left to right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectFourMove(pub u8);

/// Connect four position. `PlayerFirst` plays `X`, `PlayerSecond` plays `O`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectFour {
    rows: u8,
    cols: u8,
    connect: u8,
    /// Row-major, row 0 is the bottom row.
    cells: SmallVec<[Option<PlayerId>; 64]>,
    to_move: PlayerId,
    outcome: Outcome,
    plies: u16,
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self::empty(STANDARD_ROWS, STANDARD_COLS, STANDARD_CONNECT)
    }
}

impl Display for ConnectFour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in (0..self.rows).rev() {
            for col in 0..self.cols {
                let symbol = match self.cell(row, col) {
                    Some(PlayerId::PlayerFirst) => 'X',
                    Some(PlayerId::PlayerSecond) => 'O',
                    None => '.',
                };
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl ConnectFour {
    pub fn new(rows: u8, cols: u8, connect: u8) -> Result<Self, ConnectFourError> {
        if connect < 2 || rows == 0 || cols == 0 || (connect > rows && connect > cols) {
            return Err(ConnectFourError::InvalidBoard { rows, cols, connect });
        }
        Ok(Self::empty(rows, cols, connect))
    }

    fn empty(rows: u8, cols: u8, connect: u8) -> Self {
        Self {
            rows,
            cols,
            connect,
            cells: smallvec::smallvec![None; rows as usize * cols as usize],
            to_move: PlayerId::PlayerFirst,
            outcome: Outcome::InProgress,
            plies: 0,
        }
    }

    /// Build a position from a diagram, top row first. `X` is `PlayerFirst`,
    /// `O` is `PlayerSecond` and `.` is empty. The player to move is derived
    /// from the piece counts. Floating pieces are not rejected.
    pub fn from_rows(rows: &[&str], connect: u8) -> Result<Self, ConnectFourError> {
        let invalid = |msg: String| ConnectFourError::InvalidDiagram(msg);
        let parsed: Vec<Vec<Option<PlayerId>>> = rows
            .iter()
            .map(|line| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| match c {
                        'X' | 'x' => Ok(Some(PlayerId::PlayerFirst)),
                        'O' | 'o' => Ok(Some(PlayerId::PlayerSecond)),
                        '.' => Ok(None),
                        _ => Err(invalid(format!("unexpected character {c:?}"))),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<_, _>>()?;
        let n_rows = u8::try_from(parsed.len()).map_err(|_| invalid("too many rows".to_string()))?;
        let n_cols = parsed.first().map(|r| r.len()).unwrap_or(0);
        if parsed.iter().any(|r| r.len() != n_cols) {
            return Err(invalid("rows have different lengths".to_string()));
        }
        let n_cols = u8::try_from(n_cols).map_err(|_| invalid("too many columns".to_string()))?;
        let mut game = Self::new(n_rows, n_cols, connect)?;
        for (i, line) in parsed.iter().enumerate() {
            let row = n_rows - 1 - i as u8;
            for (col, cell) in line.iter().enumerate() {
                let idx = game.index(row, col as u8);
                game.cells[idx] = *cell;
            }
        }

        let count = |p: PlayerId| game.cells.iter().filter(|c| **c == Some(p)).count();
        let (first, second) = (count(PlayerId::PlayerFirst), count(PlayerId::PlayerSecond));
        game.to_move = if first == second {
            PlayerId::PlayerFirst
        } else if first == second + 1 {
            PlayerId::PlayerSecond
        } else {
            return Err(invalid(format!("piece counts {first} (X) and {second} (O) are unbalanced")));
        };
        game.plies = (first + second) as u16;

        let winners: SmallVec<[PlayerId; 2]> = PlayerId::VALUES
            .into_iter()
            .filter(|&p| game.has_line(p))
            .collect();
        game.outcome = match winners.as_slice() {
            [] if game.is_full() => Outcome::Draw,
            [] => Outcome::InProgress,
            [winner] => Outcome::Win(*winner),
            _ => return Err(invalid("both players have a line".to_string())),
        };
        Ok(game)
    }

    #[inline]
    pub fn rows(&self) -> u8 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> u8 {
        self.cols
    }

    #[inline]
    pub fn connect(&self) -> u8 {
        self.connect
    }

    /// Number of pieces on the board.
    #[inline]
    pub fn plies(&self) -> u16 {
        self.plies
    }

    /// Piece at `row` (0 is the bottom row) and `col`.
    #[inline]
    pub fn cell(&self, row: u8, col: u8) -> Option<PlayerId> {
        self.cells[self.index(row, col)]
    }

    #[inline]
    fn index(&self, row: u8, col: u8) -> usize {
        row as usize * self.cols as usize + col as usize
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    fn lowest_empty_row(&self, col: u8) -> Option<u8> {
        (0..self.rows).find(|&row| self.cell(row, col).is_none())
    }

    fn cell_at(&self, row: i16, col: i16) -> Option<Option<PlayerId>> {
        if row < 0 || col < 0 || row >= self.rows as i16 || col >= self.cols as i16 {
            None
        } else {
            Some(self.cell(row as u8, col as u8))
        }
    }

    /// Length of the run of `player` pieces through (`row`, `col`) along `(dr, dc)`.
    fn run_length(&self, row: u8, col: u8, (dr, dc): (i16, i16), player: PlayerId) -> u8 {
        let mut n = 1;
        for sign in [1, -1] {
            let (mut r, mut c) = (row as i16 + sign * dr, col as i16 + sign * dc);
            while self.cell_at(r, c) == Some(Some(player)) {
                n += 1;
                r += sign * dr;
                c += sign * dc;
            }
        }
        n
    }

    fn has_line(&self, player: PlayerId) -> bool {
        (0..self.rows).any(|row| {
            (0..self.cols).any(|col| {
                self.cell(row, col) == Some(player)
                    && DIRECTIONS
                        .iter()
                        .any(|&dir| self.run_length(row, col, dir, player) >= self.connect)
            })
        })
    }

    /// Every window of `connect` consecutive cells, in all four directions.
    fn windows(&self) -> impl Iterator<Item = SmallVec<[Option<PlayerId>; 8]>> + '_ {
        let connect = self.connect as i16;
        (0..self.rows as i16).flat_map(move |row| {
            (0..self.cols as i16).flat_map(move |col| {
                DIRECTIONS.iter().filter_map(move |&(dr, dc)| {
                    (0..connect)
                        .map(|i| self.cell_at(row + i * dr, col + i * dc))
                        .collect::<Option<SmallVec<[_; 8]>>>()
                })
            })
        })
    }

    fn score_window(&self, window: &[Option<PlayerId>], player: PlayerId) -> HV {
        let connect = self.connect as usize;
        let own = window.iter().filter(|c| **c == Some(player)).count();
        let opponent = window.iter().filter(|c| **c == Some(player.opposite())).count();
        let empty = window.len() - own - opponent;
        let mut score = 0;
        if own == connect {
            score += 100;
        } else if own + 1 == connect && empty == 1 {
            score += 5;
        } else if own + 2 == connect && empty == 2 {
            score += 2;
        }
        if opponent + 1 == connect && empty == 1 {
            score -= 4;
        }
        score
    }

    /// One-sided positional score: center control and open windows.
    fn score_position(&self, player: PlayerId) -> HV {
        let center = self.cols / 2;
        let center_count = (0..self.rows)
            .filter(|&row| self.cell(row, center) == Some(player))
            .count() as HV;
        let windows: HV = self.windows().map(|w| self.score_window(&w, player)).sum();
        CENTER_WEIGHT * center_count + windows
    }
}

impl Game for ConnectFour {
    type Action = ConnectFourMove;

    type Actions = ActionList<ConnectFourMove>;

    type Error = ConnectFourError;

    #[inline]
    fn to_move(&self) -> PlayerId {
        self.to_move
    }

    fn actions(&self) -> Self::Actions {
        if self.outcome.is_decided() {
            return Default::default();
        }
        (0..self.cols)
            .filter(|&col| self.cell(self.rows - 1, col).is_none())
            .map(ConnectFourMove)
            .collect()
    }

    fn advance(&mut self, action: ConnectFourMove) -> Result<(), ConnectFourError> {
        let ConnectFourMove(col) = action;
        if self.outcome.is_decided() {
            return Err(ConnectFourError::GameOver);
        }
        if col >= self.cols {
            return Err(ConnectFourError::ColumnOutOfRange { column: col, cols: self.cols });
        }
        let row = self.lowest_empty_row(col).ok_or(ConnectFourError::ColumnFull(col))?;
        let player = self.to_move;
        let idx = self.index(row, col);
        self.cells[idx] = Some(player);
        self.plies += 1;

        if DIRECTIONS
            .iter()
            .any(|&dir| self.run_length(row, col, dir, player) >= self.connect)
        {
            self.outcome = Outcome::Win(player);
        } else if self.is_full() {
            self.outcome = Outcome::Draw;
        }
        self.to_move = player.opposite();
        Ok(())
    }

    #[inline]
    fn outcome(&self) -> Outcome {
        self.outcome
    }

    fn eval(&self, player_id: PlayerId) -> Eval {
        Eval::from_heuristic(self.score_position(player_id) - self.score_position(player_id.opposite()))
    }
}
