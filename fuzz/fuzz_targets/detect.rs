#![no_main]

use libfuzzer_sys::fuzz_target;
use strcompress::detect::{is_latin1_scalar, is_latin1_wide};

fuzz_target!(|data: &[u8]| {
    let chars: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    assert_eq!(is_latin1_scalar(&chars), is_latin1_wide(&chars));

    // Interpret the bytes as Latin-1 units as well, to reach the true branch.
    let narrow: Vec<u16> = data.iter().map(|&b| b as u16).collect();
    assert!(is_latin1_scalar(&narrow));
    assert!(is_latin1_wide(&narrow));
});
