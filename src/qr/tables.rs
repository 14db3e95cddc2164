//! Static QR Code lookup data (ISO/IEC 18004 tables 9 and 13) and the
//! derived per-version geometry.

use std::fmt;
use std::str::FromStr;

use crate::utils::error::ExportError;

pub const MIN_VERSION: u8 = 1;
pub const MAX_VERSION: u8 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EcLevel {
    /// ~7% recovery
    #[default]
    Low,
    /// ~15% recovery
    Medium,
    /// ~25% recovery
    Quartile,
    /// ~30% recovery
    High,
}

impl EcLevel {
    pub const ALL: [EcLevel; 4] = [EcLevel::Low, EcLevel::Medium, EcLevel::Quartile, EcLevel::High];

    fn index(self) -> usize {
        match self {
            EcLevel::Low => 0,
            EcLevel::Medium => 1,
            EcLevel::Quartile => 2,
            EcLevel::High => 3,
        }
    }

    /// Two-bit value used in the format information.
    pub fn format_bits(self) -> u32 {
        match self {
            EcLevel::Low => 0b01,
            EcLevel::Medium => 0b00,
            EcLevel::Quartile => 0b11,
            EcLevel::High => 0b10,
        }
    }

    pub fn letter(self) -> char {
        match self {
            EcLevel::Low => 'L',
            EcLevel::Medium => 'M',
            EcLevel::Quartile => 'Q',
            EcLevel::High => 'H',
        }
    }
}

impl fmt::Display for EcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for EcLevel {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "LOW" => Ok(EcLevel::Low),
            "M" | "MEDIUM" => Ok(EcLevel::Medium),
            "Q" | "QUARTILE" => Ok(EcLevel::Quartile),
            "H" | "HIGH" => Ok(EcLevel::High),
            _ => Err(ExportError::InvalidConfigValueError {
                field: "ec_level".to_string(),
                value: s.to_string(),
                reason: "expected one of L, M, Q, H".to_string(),
            }),
        }
    }
}

/// Symbol version, 1 (21x21) to 40 (177x177).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    pub const MIN: Version = Version(MIN_VERSION);
    pub const MAX: Version = Version(MAX_VERSION);

    pub fn new(value: u8) -> Option<Self> {
        (MIN_VERSION..=MAX_VERSION)
            .contains(&value)
            .then_some(Version(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Modules per side.
    pub fn size(self) -> usize {
        self.0 as usize * 4 + 17
    }

    pub fn from_size(size: usize) -> Option<Self> {
        if size < 21 || (size - 17) % 4 != 0 {
            return None;
        }
        u8::try_from((size - 17) / 4).ok().and_then(Version::new)
    }

    pub fn iter_from(self) -> impl Iterator<Item = Version> {
        (self.0..=MAX_VERSION).map(Version)
    }

    /// Width of the byte-mode character count field.
    pub fn char_count_bits(self) -> usize {
        if self.0 <= 9 {
            8
        } else {
            16
        }
    }

    /// Modules left for data and EC codewords once every function pattern
    /// and the format/version areas are placed. Includes remainder bits.
    pub fn raw_data_modules(self) -> usize {
        let ver = self.0 as usize;
        let mut result = (16 * ver + 128) * ver + 64;
        if ver >= 2 {
            let num_align = ver / 7 + 2;
            result -= (25 * num_align - 10) * num_align - 55;
            if ver >= 7 {
                result -= 36;
            }
        }
        result
    }

    pub fn total_codewords(self) -> usize {
        self.raw_data_modules() / 8
    }

    pub fn ec_codewords_per_block(self, ec: EcLevel) -> usize {
        ECC_CODEWORDS_PER_BLOCK[ec.index()][self.0 as usize] as usize
    }

    pub fn num_blocks(self, ec: EcLevel) -> usize {
        NUM_ERROR_CORRECTION_BLOCKS[ec.index()][self.0 as usize] as usize
    }

    pub fn data_codewords(self, ec: EcLevel) -> usize {
        self.total_codewords() - self.ec_codewords_per_block(ec) * self.num_blocks(ec)
    }

    /// Largest byte-mode payload this version holds at `ec`.
    pub fn byte_capacity(self, ec: EcLevel) -> usize {
        (self.data_codewords(ec) * 8 - 4 - self.char_count_bits()) / 8
    }

    /// Centre coordinates of the alignment patterns along one axis.
    pub fn alignment_positions(self) -> Vec<usize> {
        let ver = self.0 as usize;
        if ver == 1 {
            return Vec::new();
        }
        let num_align = ver / 7 + 2;
        let step = (ver * 8 + num_align * 3 + 5) / (num_align * 4 - 4) * 2;
        let mut positions: Vec<usize> = (0..num_align - 1)
            .map(|i| self.size() - 7 - i * step)
            .collect();
        positions.push(6);
        positions.reverse();
        positions
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Index 0 is padding so the tables can be indexed by version number.
#[rustfmt::skip]
static ECC_CODEWORDS_PER_BLOCK: [[u8; 41]; 4] = [
    // 0,  1,  2,  3,  4,  5,  6,  7,  8,  9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40
    [0,  7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28, 30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30], // L
    [0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28], // M
    [0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30, 30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30], // Q
    [0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30], // H
];

#[rustfmt::skip]
static NUM_ERROR_CORRECTION_BLOCKS: [[u8; 41]; 4] = [
    // 0, 1, 2, 3, 4, 5, 6, 7, 8, 9,10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40
    [0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4,  4,  4,  4,  4,  6,  6,  6,  6,  7,  8,  8,  9,  9, 10, 12, 12, 12, 13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25], // L
    [0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5,  5,  8,  9,  9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21, 23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49], // M
    [0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8,  8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68], // Q
    [0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81], // H
];
