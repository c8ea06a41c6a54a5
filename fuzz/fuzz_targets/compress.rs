#![no_main]

use libfuzzer_sys::fuzz_target;
use strcompress::detect::select_encoding;
use strcompress::{compress_direct, MemoryBuffer, StringCompressor};

fuzz_target!(|data: &[u8]| {
    let chars: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let encoding = select_encoding(&chars);
    let len = encoding.encoded_len(chars.len()).max(1);

    let mut staged = MemoryBuffer::new(len).unwrap();
    let written = StringCompressor::new()
        .compress(&chars, &mut staged, encoding)
        .unwrap();
    assert_eq!(written, staged.writer_index());

    let mut memory = vec![0u8; len];
    let mut direct = MemoryBuffer::from_slice(&mut memory).unwrap();
    let written2 = compress_direct(&chars, &mut direct, 0, encoding).unwrap();
    assert_eq!(written, written2);
    assert_eq!(direct.writer_index(), 0);
    assert_eq!(staged.as_slice(), direct.as_slice());
});
