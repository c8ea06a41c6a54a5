use quickcheck::QuickCheck;
use strcompress::detect::{
    find_wide_unit, is_latin1, is_latin1_scalar, is_latin1_wide,
    select_encoding,
};
use strcompress::utils::text;
use strcompress::Encoding;

#[test]
fn test_detect_edge_cases() {
    assert!(is_latin1_scalar(&[]));
    assert!(is_latin1_wide(&[]));
    assert!(is_latin1_scalar(&[0x00FF]));
    assert!(is_latin1_wide(&[0x00FF]));
    assert!(!is_latin1_scalar(&[0x0100]));
    assert!(!is_latin1_wide(&[0x0100]));
}

#[test]
fn test_detect_mixed_text() {
    let chars = text::to_code_units("hello 你好");
    assert!(!is_latin1(&chars));
    assert_eq!(find_wide_unit(&chars), Some((6, 0x4F60)));
    assert_eq!(select_encoding(&chars), Encoding::Utf16);

    let chars = text::to_code_units("café crème brûlée");
    assert!(is_latin1(&chars));
    assert_eq!(find_wide_unit(&chars), None);
    assert_eq!(select_encoding(&chars), Encoding::Latin1);
}

#[test]
fn test_detect_high_byte_only() {
    // Each bit of the high byte must be caught on its own, in every lane.
    for bit in 8..16 {
        for len in 1..20 {
            for pos in 0..len {
                let mut chars = vec![0x7Fu16; len];
                chars[pos] = 1 << bit;
                assert!(!is_latin1_wide(&chars));
                assert!(!is_latin1_scalar(&chars));
            }
        }
    }
}

#[test]
fn test_detect_scalar_and_wide_agree() {
    fn prop(chars: Vec<u16>) -> bool {
        is_latin1_scalar(&chars) == is_latin1_wide(&chars)
    }

    // Most random vectors contain a wide unit. Mask them down to the Latin-1
    // range and then plant one wide unit, to exercise both answers.
    fn prop_planted(chars: Vec<u16>, pos: usize, unit: u16) -> bool {
        let mut chars: Vec<u16> = chars.iter().map(|c| c & 0xFF).collect();
        let narrow = is_latin1_scalar(&chars) && is_latin1_wide(&chars);
        if chars.is_empty() {
            return narrow;
        }
        let len = chars.len();
        chars[pos % len] = unit;
        narrow && is_latin1_scalar(&chars) == is_latin1_wide(&chars)
    }

    QuickCheck::new()
        .tests(2000)
        .quickcheck(prop as fn(Vec<u16>) -> bool);
    QuickCheck::new()
        .tests(2000)
        .quickcheck(prop_planted as fn(Vec<u16>, usize, u16) -> bool);
}

#[test]
fn test_detect_random_buffers() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let mut rng = StdRng::seed_from_u64(1982);
    for len in 0..300 {
        let latin = text::random_latin1(len, &mut rng);
        assert!(is_latin1_scalar(&latin));
        assert!(is_latin1_wide(&latin));

        let wide = text::random_utf16(len, &mut rng);
        assert_eq!(is_latin1_scalar(&wide), is_latin1_wide(&wide));
    }
}
