//! The eight data mask patterns and the penalty rules used to pick one.

use std::fmt;

use crate::qr::matrix::Matrix;

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

/// Dark-light-dark-dark-dark-light-dark with four light modules on one side.
const FINDER_LIKE: [[bool; 11]; 2] = [
    [true, false, true, true, true, false, true, false, false, false, false],
    [false, false, false, false, true, false, true, true, true, false, true],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mask(u8);

impl Mask {
    pub const ALL: [Mask; 8] = [
        Mask(0),
        Mask(1),
        Mask(2),
        Mask(3),
        Mask(4),
        Mask(5),
        Mask(6),
        Mask(7),
    ];

    pub fn new(id: u8) -> Option<Self> {
        (id < 8).then_some(Mask(id))
    }

    pub fn id(self) -> u8 {
        self.0
    }

    /// Whether the module at column `x`, row `y` is inverted.
    pub fn applies(self, x: usize, y: usize) -> bool {
        match self.0 {
            0 => (x + y) % 2 == 0,
            1 => y % 2 == 0,
            2 => x % 3 == 0,
            3 => (x + y) % 3 == 0,
            4 => (x / 3 + y / 2) % 2 == 0,
            5 => x * y % 2 + x * y % 3 == 0,
            6 => (x * y % 2 + x * y % 3) % 2 == 0,
            _ => ((x + y) % 2 + x * y % 3) % 2 == 0,
        }
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Total penalty score of a fully drawn symbol.
pub fn penalty(matrix: &Matrix) -> u32 {
    let size = matrix.size();
    let rows: Vec<Vec<bool>> = (0..size)
        .map(|y| (0..size).map(|x| matrix.get(x, y)).collect())
        .collect();
    let columns: Vec<Vec<bool>> = (0..size)
        .map(|x| (0..size).map(|y| matrix.get(x, y)).collect())
        .collect();

    let lines = rows.iter().chain(columns.iter());
    let line_score: u32 = lines.map(|line| run_penalty(line) + finder_penalty(line)).sum();

    line_score
        + block_penalty(matrix)
        + balance_penalty(matrix.dark_count(), size * size)
}

/// N1: five or more same-coloured modules in a row.
fn run_penalty(line: &[bool]) -> u32 {
    let mut score = 0;
    let mut run = 1;
    for pair in line.windows(2) {
        if pair[0] == pair[1] {
            run += 1;
        } else {
            if run >= 5 {
                score += PENALTY_N1 + (run - 5);
            }
            run = 1;
        }
    }
    if run >= 5 {
        score += PENALTY_N1 + (run - 5);
    }
    score
}

/// N3: 1:1:3:1:1 finder-like patterns preceded or followed by four light modules.
fn finder_penalty(line: &[bool]) -> u32 {
    let hits = line
        .windows(11)
        .filter(|window| FINDER_LIKE.iter().any(|pattern| window[..] == pattern[..]))
        .count();
    hits as u32 * PENALTY_N3
}

/// N2: every 2x2 block of one colour.
fn block_penalty(matrix: &Matrix) -> u32 {
    let size = matrix.size();
    let mut score = 0;
    for y in 0..size - 1 {
        for x in 0..size - 1 {
            let color = matrix.get(x, y);
            if color == matrix.get(x + 1, y)
                && color == matrix.get(x, y + 1)
                && color == matrix.get(x + 1, y + 1)
            {
                score += PENALTY_N2;
            }
        }
    }
    score
}

/// N4: 10 points for every full 5% the dark share deviates from 50%,
/// measured on the exact ratio.
fn balance_penalty(dark: usize, total: usize) -> u32 {
    let steps = (dark * 20).abs_diff(total * 10) / total;
    steps as u32 * PENALTY_N4
}
