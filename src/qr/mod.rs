//! QR Code (model 2) encoder for byte-mode payloads.
//!
//! The encoder picks the smallest version that holds the data at the
//! requested error correction level, appends Reed–Solomon codewords per
//! block, places everything in the module grid and keeps the mask with the
//! lowest penalty score. [`render`] turns the resulting [`QrCode`] into an
//! image.

pub mod bits;
pub mod mask;
pub mod matrix;
pub mod reed_solomon;
pub mod render;
pub mod tables;

pub use mask::Mask;
pub use tables::{EcLevel, Version};

use crate::qr::matrix::Matrix;
use crate::utils::error::{ExportError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub ec_level: EcLevel,
    pub min_version: Version,
    /// Forces a mask instead of scoring all eight.
    pub mask: Option<Mask>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::Low,
            min_version: Version::MIN,
            mask: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCode {
    version: Version,
    ec_level: EcLevel,
    mask: Mask,
    size: usize,
    modules: Vec<bool>,
}

impl QrCode {
    pub fn encode(data: &[u8], ec_level: EcLevel) -> Result<Self> {
        Self::encode_with_options(
            data,
            EncodeOptions {
                ec_level,
                ..EncodeOptions::default()
            },
        )
    }

    pub fn encode_with_options(data: &[u8], options: EncodeOptions) -> Result<Self> {
        let ec = options.ec_level;
        let version = select_version(data.len(), ec, options.min_version)?;

        let data_codewords = bits::encode_data_codewords(data, version, ec);
        let codewords = add_ec_and_interleave(&data_codewords, version, ec);

        let mut matrix = Matrix::new(version);
        matrix.draw_codewords(&codewords);

        let mask = options.mask.unwrap_or_else(|| choose_mask(&matrix, ec));
        matrix.apply_mask(mask);
        matrix.draw_format_bits(ec, mask);

        tracing::trace!(
            "Encoded {} bytes as version {}-{} with mask {}",
            data.len(),
            version,
            ec,
            mask
        );

        Ok(Self {
            version,
            ec_level: ec,
            mask,
            size: matrix.size(),
            modules: matrix.into_modules(),
        })
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn ec_level(&self) -> EcLevel {
        self.ec_level
    }

    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Modules per side, without quiet zone.
    pub fn size(&self) -> usize {
        self.size
    }

    /// `true` for a dark module. Out-of-range coordinates read as light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.modules[y * self.size + x]
    }
}

fn select_version(len: usize, ec: EcLevel, min_version: Version) -> Result<Version> {
    min_version
        .iter_from()
        .find(|version| bits::byte_segment_bits(len, *version) <= version.data_codewords(ec) * 8)
        .ok_or_else(|| ExportError::DataTooLarge {
            length: len,
            capacity: Version::MAX.byte_capacity(ec),
            ec_level: ec.letter(),
        })
}

/// Splits the data codewords into blocks, appends each block's EC codewords
/// and interleaves them column by column. Short blocks come first and are
/// one data codeword shorter than long blocks.
fn add_ec_and_interleave(data: &[u8], version: Version, ec: EcLevel) -> Vec<u8> {
    let num_blocks = version.num_blocks(ec);
    let ecc_len = version.ec_codewords_per_block(ec);
    let total = version.total_codewords();
    let num_short_blocks = num_blocks - total % num_blocks;
    let short_data_len = total / num_blocks - ecc_len;

    let generator = reed_solomon::generator(ecc_len);
    let mut data_blocks: Vec<&[u8]> = Vec::with_capacity(num_blocks);
    let mut ecc_blocks: Vec<Vec<u8>> = Vec::with_capacity(num_blocks);
    let mut offset = 0;
    for i in 0..num_blocks {
        let len = short_data_len + usize::from(i >= num_short_blocks);
        let block = &data[offset..offset + len];
        offset += len;
        ecc_blocks.push(reed_solomon::remainder(block, &generator));
        data_blocks.push(block);
    }
    debug_assert_eq!(offset, data.len());

    let mut result = Vec::with_capacity(total);
    for i in 0..=short_data_len {
        for block in &data_blocks {
            if let Some(&byte) = block.get(i) {
                result.push(byte);
            }
        }
    }
    for i in 0..ecc_len {
        for block in &ecc_blocks {
            result.push(block[i]);
        }
    }
    debug_assert_eq!(result.len(), total);
    result
}

fn choose_mask(matrix: &Matrix, ec: EcLevel) -> Mask {
    let mut best = Mask::ALL[0];
    let mut best_score = u32::MAX;
    for mask in Mask::ALL {
        let mut candidate = matrix.clone();
        candidate.apply_mask(mask);
        candidate.draw_format_bits(ec, mask);
        let score = mask::penalty(&candidate);
        if score < best_score {
            best = mask;
            best_score = score;
        }
    }
    best
}
