use bencode::{ben_bytes, ben_int, ben_list, ben_map, decode, encode, encode_canonical, BencodeParseErrorKind, BencodeValue};

#[test]
fn positive_ben_map_macro() {
    let result = (ben_map! {
        "key" => ben_bytes!("value")
    })
    .encode();

    assert_eq!("d3:key5:valuee".as_bytes(), &result[..]); // cspell:disable-line
}

#[test]
fn positive_ben_list_macro() {
    let result = (ben_list!(ben_int!(5))).encode();

    assert_eq!("li5ee".as_bytes(), &result[..]); // cspell:disable-line
}

#[test]
fn positive_decode_list_of_strings() {
    assert_eq!(decode(b"l4:spam4:eggse").unwrap(), ben_list!(ben_bytes!("spam"), ben_bytes!("eggs")));
    assert_eq!(decode(b"le").unwrap(), ben_list!());
}

#[test]
fn positive_decode_of_encode_is_identity() {
    let values = vec![
        ben_int!(0),
        ben_int!(i64::MIN),
        ben_int!(i64::MAX),
        ben_bytes!(""),
        ben_bytes!(vec![0u8, 255, 10]),
        ben_list!(),
        ben_map! {},
        ben_map! {
            "z" => ben_list!(ben_int!(1), ben_bytes!("x"), ben_map! { "inner" => ben_list!() }),
            "a" => ben_map! { "b" => ben_int!(-1) }
        },
    ];

    for value in values {
        assert_eq!(decode(&encode(&value)).unwrap(), value);
    }
}

#[test]
fn positive_encode_canonical_is_stable_across_insertion_orders() {
    let first = ben_map! { "b" => ben_int!(1), "a" => ben_int!(2) };
    let second = ben_map! { "a" => ben_int!(2), "b" => ben_int!(1) };

    assert_ne!(encode(&first), encode(&second));
    assert_eq!(encode_canonical(&first), encode_canonical(&second));
}

#[test]
fn negative_decode_rejects_malformed_input() {
    let cases: [(&[u8], fn(&BencodeParseErrorKind) -> bool); 5] = [
        (b"4spam", |k| matches!(k, BencodeParseErrorKind::InvalidLengthNoDelimiter { .. })),
        (b"-4:spam", |k| matches!(k, BencodeParseErrorKind::InvalidLengthNegative { .. })),
        (b"5:spam", |k| matches!(k, BencodeParseErrorKind::InvalidLengthOverflow { .. })),
        (b"l4:spam", |k| matches!(k, BencodeParseErrorKind::UnterminatedContainer { .. })),
        (b"i42", |k| matches!(k, BencodeParseErrorKind::InvalidIntNoDelimiter { .. })),
    ];

    for (input, expected) in cases {
        let err = decode(input).unwrap_err();

        assert!(expected(err.kind()), "unexpected error {err:?} for {input:?}");
    }
}

#[test]
fn negative_decode_value_accessors_on_wrong_kind() {
    let value: BencodeValue = decode(b"i1e").unwrap();

    assert!(value.bytes().is_none());
    assert!(value.list().is_none());
    assert!(value.dict().is_none());
}

mod round_trip {
    use bencode::{decode, encode, encode_canonical, BDict, BencodeValue};
    use proptest::prelude::*;

    fn bencode_value_strategy() -> impl Strategy<Value = BencodeValue> {
        let leaf = prop_oneof![
            any::<i64>().prop_map(BencodeValue::Int),
            proptest::collection::vec(any::<u8>(), 0..32).prop_map(BencodeValue::Bytes),
        ];

        leaf.prop_recursive(4, 64, 8, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..8).prop_map(BencodeValue::List),
                proptest::collection::vec((proptest::collection::vec(any::<u8>(), 0..8), inner), 0..8)
                    .prop_map(|entries| BencodeValue::Dict(entries.into_iter().collect::<BDict>())),
            ]
        })
    }

    proptest! {
        #[test]
        fn decode_of_encode_is_identity(value in bencode_value_strategy()) {
            prop_assert_eq!(decode(&encode(&value)).unwrap(), value);
        }

        #[test]
        fn canonical_encoding_decodes_with_strict_key_order(value in bencode_value_strategy()) {
            let canonical = encode_canonical(&value);

            let decoded = BencodeValue::decode(&canonical, bencode::BDecodeOpt::new(50, true, true));

            prop_assert!(decoded.is_ok());
        }
    }
}
