//! A collection of utilities for producing code-unit sequences and naming
//! output files.

pub mod signatures {
    /// The extension of files written by the command line tool.
    pub const FILE_EXTENSION: &str = ".sc";
}

/// Generators for the strings that the tests, benchmarks and the command line
/// tool feed to the compressor.
pub mod text {
    use rand::distributions::Alphanumeric;
    use rand::Rng;
    use rand_distr::{Distribution, Uniform};

    /// A prefix of wide characters followed by ASCII, for strings that must
    /// take the UTF-16 path.
    pub const MIXED_PREFIX: &str = "你好,你好,你好,你好,你好, Fury";

    /// Convert UTF-8 text into UTF-16 code units.
    pub fn to_code_units(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    /// Read the file at 'path' and convert it into UTF-16 code units. Bytes
    /// that are not valid UTF-8 become U+FFFD.
    pub fn read_code_units(path: &str) -> std::io::Result<Vec<u16>> {
        let bytes = std::fs::read(path)?;
        Ok(to_code_units(&String::from_utf8_lossy(&bytes)))
    }

    /// Generate 'len' random code units in the range 0..=0xFF.
    pub fn random_latin1<R: Rng>(len: usize, rng: &mut R) -> Vec<u16> {
        let distr = Uniform::new_inclusive(0u16, 0xFF);
        (0..len).map(|_| distr.sample(rng)).collect()
    }

    /// Generate 'len' random code units from the whole 16-bit range. Every
    /// unit is treated on its own, so unpaired surrogates are fine.
    pub fn random_utf16<R: Rng>(len: usize, rng: &mut R) -> Vec<u16> {
        let distr = Uniform::new_inclusive(0u16, 0xFFFF);
        (0..len).map(|_| distr.sample(rng)).collect()
    }

    /// Generate 'len' random ASCII letters and digits.
    pub fn random_alphanumeric<R: Rng>(len: usize, rng: &mut R) -> Vec<u16> {
        rng.sample_iter(&Alphanumeric)
            .take(len)
            .map(u16::from)
            .collect()
    }

    /// Returns MIXED_PREFIX followed by 'suffix' random alphanumeric units.
    pub fn mixed<R: Rng>(suffix: usize, rng: &mut R) -> Vec<u16> {
        let mut chars = to_code_units(MIXED_PREFIX);
        chars.extend(random_alphanumeric(suffix, rng));
        chars
    }
}

#[test]
fn test_generators() {
    use crate::detect::is_latin1;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let mut rng = StdRng::seed_from_u64(7);
    let latin = text::random_latin1(1000, &mut rng);
    assert_eq!(latin.len(), 1000);
    assert!(is_latin1(&latin));

    let alnum = text::random_alphanumeric(64, &mut rng);
    assert!(alnum.iter().all(|&c| (c as u8).is_ascii_alphanumeric()));

    let mixed = text::mixed(64, &mut rng);
    assert_eq!(mixed.len(), text::MIXED_PREFIX.chars().count() + 64);
    assert!(!is_latin1(&mixed));
}

#[test]
fn test_read_code_units() {
    let path = std::env::temp_dir().join("strcompress_read_code_units.txt");
    let path = path.to_str().unwrap().to_string();

    std::fs::write(&path, b"ab\xFFc").unwrap();
    let chars = text::read_code_units(&path).unwrap();
    assert_eq!(chars, [0x61, 0x62, 0xFFFD, 0x63]);

    std::fs::remove_file(&path).unwrap();
    assert!(text::read_code_units(&path).is_err());
}
