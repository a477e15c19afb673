//! Property-based tests for the codec, table and lift guarantees.
//!
//! Strategies lean on backslashes and newlines, the only characters the
//! format treats specially.

use nsv::{
    decode, decode_with, encode, encode_with, escape, from_str, lift, to_string, unescape, unlift,
    Codec, FastCodec, ReferenceCodec, RowDecoder, Table,
};
use proptest::prelude::*;

fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        "[\\\\\nn]{0,8}",
        "[a-z\\\\\n ]{0,16}",
        any::<String>(),
    ]
}

fn row() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(cell(), 0..6)
}

fn table() -> impl Strategy<Value = Table> {
    prop::collection::vec(row(), 0..6)
}

fn cut_points() -> impl Strategy<Value = Vec<prop::sample::Index>> {
    prop::collection::vec(any::<prop::sample::Index>(), 0..8)
}

proptest! {
    #[test]
    fn prop_unescape_inverts_escape(s in cell()) {
        prop_assert_eq!(unescape(&escape(&s)), s);
    }

    #[test]
    fn prop_escaped_cell_is_one_nonempty_line(s in cell()) {
        let escaped = escape(&s);
        prop_assert!(!escaped.is_empty());
        prop_assert!(!escaped.contains('\n'));
    }

    #[test]
    fn prop_backends_agree(s in cell(), line in "[a-z\\\\n]{0,12}") {
        prop_assert_eq!(FastCodec.escape(&s), ReferenceCodec.escape(&s));
        prop_assert_eq!(FastCodec.unescape(&line), ReferenceCodec.unescape(&line));
    }

    #[test]
    fn prop_unescape_is_total(line in "[^\n]{0,24}") {
        // Any single line decodes; re-escaping never grows past twice the size
        let cell = unescape(&line);
        prop_assert!(escape(&cell).len() <= 2 * line.len() + 1);
    }

    #[test]
    fn prop_decode_inverts_encode(t in table()) {
        prop_assert_eq!(decode(&encode(&t)), t);
    }

    #[test]
    fn prop_backends_encode_alike(t in table()) {
        let fast = encode_with(&t, FastCodec);
        prop_assert_eq!(&fast, &encode_with(&t, ReferenceCodec));
        prop_assert_eq!(decode_with(&fast, ReferenceCodec), t);
    }

    #[test]
    fn prop_unlift_inverts_lift(r in row()) {
        prop_assert_eq!(unlift(&lift(&r)).unwrap(), r);
    }

    #[test]
    fn prop_double_lift_is_stable(a in row(), b in row()) {
        let outer = lift([lift(&a), lift(&b)]);
        let inner = unlift(&outer).unwrap();
        prop_assert_eq!(inner.len(), 2);
        prop_assert_eq!(unlift(&inner[0]).unwrap(), a);
        prop_assert_eq!(unlift(&inner[1]).unwrap(), b);
    }

    #[test]
    fn prop_chunked_feed_matches_decode(t in table(), cuts in cut_points()) {
        let text = encode(&t);
        let mut bounds: Vec<usize> = cuts
            .iter()
            .map(|i| i.index(text.len() + 1))
            .filter(|&b| text.is_char_boundary(b))
            .collect();
        bounds.push(0);
        bounds.push(text.len());
        bounds.sort_unstable();

        let mut decoder = RowDecoder::new();
        let mut rows = Vec::new();
        for pair in bounds.windows(2) {
            decoder.feed(&text[pair[0]..pair[1]], |row| rows.push(row));
        }
        prop_assert!(decoder.finish().is_none());
        prop_assert_eq!(rows, t);
    }

    #[test]
    fn prop_serde_string_tables(t in table()) {
        let text = to_string(&t).unwrap();
        prop_assert_eq!(&text, &encode(&t));
        let back: Table = from_str(&text).unwrap();
        prop_assert_eq!(back, t);
    }

    #[test]
    fn prop_serde_three_dimensional(cube in prop::collection::vec(table(), 0..4)) {
        let text = to_string(&cube).unwrap();
        let back: Vec<Vec<Vec<String>>> = from_str(&text).unwrap();
        prop_assert_eq!(back, cube);
    }
}
