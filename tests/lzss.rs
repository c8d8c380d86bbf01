use camunpack::lzss::{expand, LzssDecoder, RefPolicy, WINDOW_SIZE};
use camunpack::{DecodeError, Decoder};

/// A token of a payload stream.
#[derive(Clone, Copy)]
enum Token {
    Lit(u8),
    /// A window slot and the raw 4-bit length.
    Ref(u16, u8),
}

/// Lay out 'tokens' with a control byte before every group of eight.
fn pack(tokens: &[Token]) -> Vec<u8> {
    let mut out = Vec::new();
    for group in tokens.chunks(8) {
        let mut control = 0u8;
        let mut body = Vec::new();
        for (i, token) in group.iter().enumerate() {
            match *token {
                Token::Lit(c) => {
                    control |= 1 << i;
                    body.push(c);
                }
                Token::Ref(pos, len) => {
                    body.push((len << 4) | (pos >> 8) as u8);
                    body.push(pos as u8);
                }
            }
        }
        out.push(control);
        out.extend(body);
    }
    out
}

#[test]
fn test_lzss_literals() {
    let input = [0xff, 0x41, 0x42, 0x43];
    let mut output = Vec::new();
    let res = LzssDecoder::new(&input, &mut output, 3).decode();
    assert_eq!(res, Ok((4, 3)));
    assert_eq!(output, b"ABC");
}

#[test]
fn test_lzss_run_length_match() {
    let input = [0x01, 0x41, 0x20, 0x01];
    assert_eq!(expand(&input, 5).unwrap(), b"AAAAA");
    // Decoding is deterministic.
    assert_eq!(expand(&input, 5), expand(&input, 5));
}

#[test]
fn test_lzss_zero_length() {
    let mut output = Vec::new();
    let res = LzssDecoder::new(&[], &mut output, 0).decode();
    assert_eq!(res, Ok((0, 0)));
    assert!(output.is_empty());

    // Nothing is consumed, even from a stream that would fail.
    let mut output = Vec::new();
    let res = LzssDecoder::new(&[0x00, 0x00, 0x07], &mut output, 0).decode();
    assert_eq!(res, Ok((0, 0)));
}

#[test]
fn test_lzss_control_byte_reload() {
    let mut tokens: Vec<Token> = (1..=9).map(Token::Lit).collect();
    tokens.push(Token::Ref(1, 0));
    let input = pack(&tokens);
    assert_eq!(input[0], 0xff);
    assert_eq!(input[9], 0x01);
    assert_eq!(expand(&input, 11).unwrap(), [1, 2, 3, 4, 5, 6, 7, 8, 9, 1, 2]);
}

#[test]
fn test_lzss_clamp_at_end_of_output() {
    // A match of 16 bytes with only two left to produce.
    let input = pack(&[Token::Lit(b'x'), Token::Lit(b'y'), Token::Ref(1, 15)]);
    let mut output = Vec::new();
    let res = LzssDecoder::new(&input, &mut output, 4).decode();
    assert_eq!(res, Ok((input.len(), 4)));
    assert_eq!(output, b"xyxy");
}

#[test]
fn test_lzss_clamp_boundary() {
    let input = [0x01, 0x41, 0x20, 0x01];

    // The match length (3) equals the remaining budget: the copy is cut to 3.
    assert_eq!(expand(&input, 4).unwrap(), b"AAAA");

    // With budget to spare the match copies its length plus one, and the
    // next token is a match with no bytes left to read.
    assert_eq!(
        expand(&input, 6),
        Err(DecodeError::MalformedInput {
            offset: 4,
            produced: 5
        })
    );
}

#[test]
fn test_lzss_huge_target_len() {
    // Nothing is allocated up front for output the input can't produce.
    assert_eq!(
        expand(&[0xff, 0x41], usize::MAX),
        Err(DecodeError::MalformedInput {
            offset: 2,
            produced: 1
        })
    );
    let mut output = Vec::new();
    let res = LzssDecoder::new(&[0x01, 0x41, 0xf0, 0x01], &mut output, usize::MAX / 2)
        .decode();
    assert!(matches!(res, Err(DecodeError::MalformedInput { .. })));
    assert!(output.is_empty());
}

#[test]
fn test_lzss_truncated_input() {
    assert_eq!(
        expand(&[], 1),
        Err(DecodeError::MalformedInput {
            offset: 0,
            produced: 0
        })
    );
    // Mid literal.
    assert_eq!(
        expand(&[0xff, b'a'], 2),
        Err(DecodeError::MalformedInput {
            offset: 2,
            produced: 1
        })
    );
    // Mid match pair.
    assert_eq!(
        expand(&[0x00, 0x01], 1),
        Err(DecodeError::MalformedInput {
            offset: 1,
            produced: 0
        })
    );
    // Missing second control byte.
    let input = pack(&(0..8).map(Token::Lit).collect::<Vec<_>>());
    assert_eq!(
        expand(&input, 9),
        Err(DecodeError::MalformedInput {
            offset: 9,
            produced: 8
        })
    );
}

#[test]
fn test_lzss_invalid_back_reference() {
    // A match before anything was written.
    assert_eq!(
        expand(&[0x00, 0x00, 0x01], 1),
        Err(DecodeError::InvalidBackReference {
            position: 1,
            produced: 0
        })
    );
    // Slot 0 is never written by the first pass over the window.
    let input = pack(&[Token::Lit(b'a'), Token::Ref(0, 0)]);
    assert_eq!(
        expand(&input, 3),
        Err(DecodeError::InvalidBackReference {
            position: 0,
            produced: 1
        })
    );
    // A match that starts one slot ahead of the written data.
    let input = pack(&[Token::Lit(b'a'), Token::Ref(2, 0)]);
    assert_eq!(
        expand(&input, 3),
        Err(DecodeError::InvalidBackReference {
            position: 2,
            produced: 1
        })
    );
}

#[test]
fn test_lzss_no_partial_output() {
    let mut output = vec![9, 9];
    let input = pack(&[Token::Lit(b'a'), Token::Lit(b'b'), Token::Ref(7, 0)]);
    let res = LzssDecoder::new(&input, &mut output, 4).decode();
    assert!(res.is_err());
    assert_eq!(output, [9, 9]);

    // A successful decode appends.
    let mut decoder = LzssDecoder::new(&input, &mut output, 2);
    assert_eq!(decoder.decode(), Ok((3, 2)));
    assert_eq!(output, [9, 9, b'a', b'b']);
}

#[test]
fn test_lzss_zero_fill_policy() {
    let input = pack(&[Token::Ref(5, 0), Token::Lit(b'z')]);
    let mut output = Vec::new();
    {
        let mut decoder = LzssDecoder::new(&input, &mut output, 3);
        decoder.set_policy(RefPolicy::ZeroFill);
        assert_eq!(decoder.decode(), Ok((input.len(), 3)));
    }
    assert_eq!(output, [0, 0, b'z']);
    assert!(expand(&input, 3).is_err());
}

#[test]
fn test_lzss_window_wraps() {
    let count = WINDOW_SIZE + 4;
    let mut tokens: Vec<Token> = (0..count).map(|i| Token::Lit(i as u8)).collect();
    // Slot 1 now holds literal 4096 and slot 2 literal 4097.
    tokens.push(Token::Ref(1, 0));
    // Slot 0 was filled when the window wrapped.
    tokens.push(Token::Ref(0, 0));
    let input = pack(&tokens);

    let output = expand(&input, count + 4).unwrap();
    assert_eq!(output.len(), count + 4);
    assert_eq!(&output[count..], [0, 1, 255, 0]);
}

#[test]
fn test_lzss_repeated_phrase() {
    let input = pack(&[
        Token::Lit(b'a'),
        Token::Lit(b'b'),
        Token::Lit(b'c'),
        Token::Ref(1, 4),
        Token::Lit(b'!'),
    ]);
    assert_eq!(expand(&input, 10).unwrap(), b"abcabcabc!");
}

#[test]
fn test_lzss_random_input_no_crash() {
    use rand::{thread_rng, Rng};

    let mut rng = thread_rng();
    for _ in 0..2000 {
        let len = rng.gen_range(0..64);
        let input: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        let target = rng.gen_range(0..512);

        let mut output = Vec::new();
        let res = LzssDecoder::new(&input, &mut output, target).decode();
        match res {
            Ok((read, written)) => {
                assert!(read <= input.len());
                assert_eq!(written, target);
                assert_eq!(output.len(), target);
            }
            Err(_) => assert!(output.is_empty()),
        }

        let mut lenient = Vec::new();
        let mut decoder = LzssDecoder::new(&input, &mut lenient, target);
        decoder.set_policy(RefPolicy::ZeroFill);
        if let Ok((_, written)) = decoder.decode() {
            assert_eq!(written, target);
        }
    }
}
