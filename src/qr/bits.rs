use crate::qr::tables::{EcLevel, Version};

const MODE_BYTE: u32 = 0b0100;
const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

#[derive(Debug, Default, Clone)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Appends the low `count` bits of `value`, most significant first.
    pub fn push_bits(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 32 && (count == 32 || value >> count == 0));
        for i in (0..count).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &bit)| acc | ((bit as u8) << (7 - i)))
            })
            .collect()
    }
}

/// Bits needed for `len` bytes in byte mode at `version`.
pub fn byte_segment_bits(len: usize, version: Version) -> usize {
    4 + version.char_count_bits() + len * 8
}

/// Builds the data codewords for a single byte-mode segment: header,
/// payload, terminator and padding up to the version's data capacity.
/// The caller guarantees that `data` fits.
pub fn encode_data_codewords(data: &[u8], version: Version, ec: EcLevel) -> Vec<u8> {
    let capacity_bits = version.data_codewords(ec) * 8;

    let mut buffer = BitBuffer::new();
    buffer.push_bits(MODE_BYTE, 4);
    buffer.push_bits(data.len() as u32, version.char_count_bits());
    for &byte in data {
        buffer.push_bits(byte as u32, 8);
    }
    debug_assert!(buffer.len() <= capacity_bits);

    let terminator = (capacity_bits - buffer.len()).min(4);
    buffer.push_bits(0, terminator);
    let to_byte_boundary = (8 - buffer.len() % 8) % 8;
    buffer.push_bits(0, to_byte_boundary);

    let mut codewords = buffer.to_bytes();
    let mut pad = PAD_BYTES.iter().cycle();
    while codewords.len() < version.data_codewords(ec) {
        if let Some(&byte) = pad.next() {
            codewords.push(byte);
        }
    }
    codewords
}
