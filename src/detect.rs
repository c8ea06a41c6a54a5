//! Classify UTF-16 code units by whether they fit in a single byte.
//!
//! Two equivalent scans are provided. The scalar scan stops at the first wide
//! unit. The wide-word scan packs four units into a u64, ORs all of the words
//! together, and tests the high byte of every lane once at the end. The loop
//! has no data-dependent branches, so the compiler can vectorize it.
//!
//! Notice that the threshold is 0xFF (Latin-1), not 0x7F (7-bit ASCII).

use crate::Encoding;

/// The largest code unit that fits in one byte.
pub const LATIN1_MAX: u16 = 0xFF;

/// The number of code units packed into one word.
const LANES: usize = 4;

/// Selects the high byte of each of the four 16-bit lanes of a word.
const HIGH_BYTE_MASK: u64 = 0xFF00_FF00_FF00_FF00;

/// Pack four code units into the four 16-bit lanes of a word.
#[inline(always)]
fn pack(lanes: &[u16]) -> u64 {
    debug_assert_eq!(lanes.len(), LANES);
    u64::from(lanes[0])
        | u64::from(lanes[1]) << 16
        | u64::from(lanes[2]) << 32
        | u64::from(lanes[3]) << 48
}

/// Returns true if every code unit in 'chars' is at most 0xFF.
pub fn is_latin1_scalar(chars: &[u16]) -> bool {
    for &c in chars {
        if c > LATIN1_MAX {
            return false;
        }
    }
    true
}

/// Returns true if every code unit in 'chars' is at most 0xFF. This computes
/// the same result as 'is_latin1_scalar' but never exits early.
pub fn is_latin1_wide(chars: &[u16]) -> bool {
    // Accumulate into four words to allow instruction-level parallelism.
    let mut acc0: u64 = 0;
    let mut acc1: u64 = 0;
    let mut acc2: u64 = 0;
    let mut acc3: u64 = 0;

    let mut blocks = chars.chunks_exact(LANES * 4);
    for block in &mut blocks {
        acc0 |= pack(&block[0..4]);
        acc1 |= pack(&block[4..8]);
        acc2 |= pack(&block[8..12]);
        acc3 |= pack(&block[12..16]);
    }

    let mut words = blocks.remainder().chunks_exact(LANES);
    for word in &mut words {
        acc0 |= pack(word);
    }

    // Pad the last partial word with zeros. Zero lanes have a clear high byte
    // and can't hide a wide unit.
    let tail = words.remainder();
    let mut last = [0u16; LANES];
    last[..tail.len()].copy_from_slice(tail);
    acc1 |= pack(&last);

    ((acc0 | acc1 | acc2 | acc3) & HIGH_BYTE_MASK) == 0
}

/// Returns true if every code unit in 'chars' is at most 0xFF.
#[inline]
pub fn is_latin1(chars: &[u16]) -> bool {
    is_latin1_wide(chars)
}

/// Returns the index and value of the first code unit above 0xFF.
pub fn find_wide_unit(chars: &[u16]) -> Option<(usize, u16)> {
    chars
        .iter()
        .position(|&c| c > LATIN1_MAX)
        .map(|idx| (idx, chars[idx]))
}

/// Pick the most compact encoding that can represent 'chars'.
pub fn select_encoding(chars: &[u16]) -> Encoding {
    if is_latin1(chars) {
        Encoding::Latin1
    } else {
        Encoding::Utf16
    }
}

#[test]
fn test_latin1_boundaries() {
    for check in [is_latin1_scalar, is_latin1_wide] {
        assert!(check(&[]));
        assert!(check(&[0x00FF]));
        assert!(!check(&[0x0100]));
        assert!(!check(&[0xFFFF]));
        assert!(check(&[0x41, 0x42, 0x7F, 0x80, 0xE9]));
    }
}

#[test]
fn test_wide_unit_in_every_position() {
    // Cover the unrolled block, the single words and the padded tail.
    for len in 1..40 {
        for pos in 0..len {
            let mut chars = vec![0x00FFu16; len];
            chars[pos] = 0x4F60;
            assert!(!is_latin1_wide(&chars), "len {} pos {}", len, pos);
            assert_eq!(find_wide_unit(&chars), Some((pos, 0x4F60)));
        }
    }
}
