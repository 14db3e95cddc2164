//! Module grid, function pattern drawing and data placement.
//! Coordinates are `(x, y)` = (column, row) with the origin top-left.

use crate::qr::mask::Mask;
use crate::qr::tables::{EcLevel, Version};

const FORMAT_GENERATOR: u32 = 0x537;
const FORMAT_XOR_MASK: u32 = 0x5412;
const VERSION_GENERATOR: u32 = 0x1F25;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    size: usize,
    modules: Vec<bool>,
    function: Vec<bool>,
}

impl Matrix {
    /// Empty grid with every function pattern drawn and the format area reserved.
    pub fn new(version: Version) -> Self {
        let size = version.size();
        let mut matrix = Self {
            size,
            modules: vec![false; size * size],
            function: vec![false; size * size],
        };
        matrix.draw_function_patterns(version);
        matrix
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.size + x]
    }

    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.function[y * self.size + x]
    }

    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&dark| dark).count()
    }

    pub fn into_modules(self) -> Vec<bool> {
        self.modules
    }

    fn set_function(&mut self, x: usize, y: usize, dark: bool) {
        let index = y * self.size + x;
        self.modules[index] = dark;
        self.function[index] = true;
    }

    fn draw_function_patterns(&mut self, version: Version) {
        let size = self.size;

        // Timing patterns first; finders overwrite their ends.
        for i in 0..size {
            self.set_function(6, i, i % 2 == 0);
            self.set_function(i, 6, i % 2 == 0);
        }

        self.draw_finder(3, 3);
        self.draw_finder(size - 4, 3);
        self.draw_finder(3, size - 4);

        let positions = version.alignment_positions();
        let last = positions.len().saturating_sub(1);
        for (i, &cx) in positions.iter().enumerate() {
            for (j, &cy) in positions.iter().enumerate() {
                let overlaps_finder =
                    (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
                if !overlaps_finder {
                    self.draw_alignment(cx, cy);
                }
            }
        }

        // Reserve the format areas with a placeholder, real bits come after masking.
        self.draw_format_bits(EcLevel::Low, Mask::ALL[0]);
        self.draw_version_bits(version);
    }

    /// 7x7 finder plus its one-module light separator, clipped at the edges.
    fn draw_finder(&mut self, cx: usize, cy: usize) {
        for dy in -4i32..=4 {
            for dx in -4i32..=4 {
                let x = cx as i32 + dx;
                let y = cy as i32 + dy;
                if x < 0 || y < 0 || x >= self.size as i32 || y >= self.size as i32 {
                    continue;
                }
                let distance = dx.abs().max(dy.abs());
                self.set_function(x as usize, y as usize, distance != 2 && distance != 4);
            }
        }
    }

    fn draw_alignment(&mut self, cx: usize, cy: usize) {
        for dy in -2i32..=2 {
            for dx in -2i32..=2 {
                let x = (cx as i32 + dx) as usize;
                let y = (cy as i32 + dy) as usize;
                self.set_function(x, y, dx.abs().max(dy.abs()) != 1);
            }
        }
    }

    /// Writes both copies of the format information and the dark module.
    pub fn draw_format_bits(&mut self, ec: EcLevel, mask: Mask) {
        let bits = format_information(ec, mask);
        let bit = |i: usize| (bits >> i) & 1 == 1;
        let size = self.size;

        // Around the top-left finder.
        for i in 0..=5 {
            self.set_function(8, i, bit(i));
        }
        self.set_function(8, 7, bit(6));
        self.set_function(8, 8, bit(7));
        self.set_function(7, 8, bit(8));
        for i in 9..15 {
            self.set_function(14 - i, 8, bit(i));
        }

        // Split between the top-right and bottom-left finders.
        for i in 0..8 {
            self.set_function(size - 1 - i, 8, bit(i));
        }
        for i in 8..15 {
            self.set_function(8, size - 15 + i, bit(i));
        }
        self.set_function(8, size - 8, true);
    }

    fn draw_version_bits(&mut self, version: Version) {
        if version.value() < 7 {
            return;
        }
        let bits = version_information(version);
        for i in 0..18 {
            let dark = (bits >> i) & 1 == 1;
            let a = self.size - 11 + i % 3;
            let b = i / 3;
            self.set_function(a, b, dark);
            self.set_function(b, a, dark);
        }
    }

    /// Places codewords in the two-column zig-zag, skipping function modules.
    /// Leftover remainder modules stay light.
    pub fn draw_codewords(&mut self, codewords: &[u8]) {
        let size = self.size;
        let total_bits = codewords.len() * 8;
        let mut bit_index = 0;

        let mut right = size - 1;
        loop {
            // Column 6 holds the vertical timing pattern.
            if right == 6 {
                right = 5;
            }
            let upward = (right + 1) & 2 == 0;
            for vert in 0..size {
                let y = if upward { size - 1 - vert } else { vert };
                for x in [right, right - 1] {
                    if self.is_function(x, y) || bit_index >= total_bits {
                        continue;
                    }
                    let byte = codewords[bit_index / 8];
                    self.modules[y * size + x] = (byte >> (7 - bit_index % 8)) & 1 == 1;
                    bit_index += 1;
                }
            }
            if right < 3 {
                break;
            }
            right -= 2;
        }
        debug_assert_eq!(bit_index, total_bits);
    }

    /// XORs the mask over every non-function module. Applying it twice undoes it.
    pub fn apply_mask(&mut self, mask: Mask) {
        for y in 0..self.size {
            for x in 0..self.size {
                if !self.is_function(x, y) && mask.applies(x, y) {
                    let index = y * self.size + x;
                    self.modules[index] = !self.modules[index];
                }
            }
        }
    }
}

/// 15-bit format word: EC level and mask with a (15,5) BCH code, XOR-masked.
pub fn format_information(ec: EcLevel, mask: Mask) -> u32 {
    let data = (ec.format_bits() << 3) | mask.id() as u32;
    let mut remainder = data;
    for _ in 0..10 {
        remainder = (remainder << 1) ^ ((remainder >> 9) * FORMAT_GENERATOR);
    }
    ((data << 10) | remainder) ^ FORMAT_XOR_MASK
}

/// 18-bit version word with a (18,6) Golay code.
pub fn version_information(version: Version) -> u32 {
    let data = version.value() as u32;
    let mut remainder = data;
    for _ in 0..12 {
        remainder = (remainder << 1) ^ ((remainder >> 11) * VERSION_GENERATOR);
    }
    (data << 12) | remainder
}
