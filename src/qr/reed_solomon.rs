//! Reed–Solomon error correction over GF(2^8) with the QR primitive
//! polynomial x^8 + x^4 + x^3 + x^2 + 1.

const PRIMITIVE: u16 = 0x11D;

struct GaloisTables {
    exp: [u8; 256],
    log: [u8; 256],
}

const fn build_tables() -> GaloisTables {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut value: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = value as u8;
        log[value as usize] = i as u8;
        value <<= 1;
        if value & 0x100 != 0 {
            value ^= PRIMITIVE;
        }
        i += 1;
    }
    exp[255] = exp[0];
    GaloisTables { exp, log }
}

static TABLES: GaloisTables = build_tables();

pub fn gf_mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let sum = TABLES.log[a as usize] as usize + TABLES.log[b as usize] as usize;
    TABLES.exp[sum % 255]
}

/// Generator polynomial of the given degree, highest coefficient first with
/// the leading 1 dropped.
pub fn generator(degree: usize) -> Vec<u8> {
    assert!((1..=255).contains(&degree), "degree out of range");
    let mut result = vec![0u8; degree];
    result[degree - 1] = 1;

    // Multiply by (x - a^i) for i in 0..degree.
    let mut root: u8 = 1;
    for _ in 0..degree {
        for j in 0..degree {
            result[j] = gf_mul(result[j], root);
            if j + 1 < degree {
                result[j] ^= result[j + 1];
            }
        }
        root = gf_mul(root, 0x02);
    }
    result
}

/// EC codewords for `data`: the remainder of data(x) * x^n divided by the
/// generator.
pub fn remainder(data: &[u8], generator: &[u8]) -> Vec<u8> {
    let mut result = vec![0u8; generator.len()];
    for &byte in data {
        let factor = byte ^ result[0];
        result.rotate_left(1);
        if let Some(last) = result.last_mut() {
            *last = 0;
        }
        for (coefficient, &g) in result.iter_mut().zip(generator) {
            *coefficient ^= gf_mul(g, factor);
        }
    }
    result
}
