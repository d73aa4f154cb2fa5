//! Library for decoding, encoding and converting bencoded data.
//!
//! # Examples
//!
//! Decoding bencoded data:
//!
//! ```rust
//!     use bencode::{BDecodeOpt, BencodeValue};
//!
//!     let data = b"d12:lucky_numberi7ee"; // cspell:disable-line
//!     let bencode = BencodeValue::decode(data, BDecodeOpt::default()).unwrap();
//!
//!     assert_eq!(7, bencode.dict().unwrap().lookup(b"lucky_number").unwrap().int().unwrap());
//! ```
//!
//! Encoding bencoded data:
//!
//! ```rust
//!     use bencode::{ben_bytes, ben_int, ben_map};
//!
//!     let message = (ben_map! {
//!         "lucky_number" => ben_int!(7),
//!         "lucky_string" => ben_bytes!("7")
//!     })
//!     .encode();
//!
//!     let data = b"d12:lucky_numberi7e12:lucky_string1:7e"; // cspell:disable-line
//!     assert_eq!(&data[..], &message[..]);
//! ```
//!
//! Dictionaries keep the order in which keys were inserted (or found on the
//! wire). Use [`BencodeValue::encode_canonical`] when the output must have its
//! keys sorted, for example before hashing it.
mod convert;
mod decode;
mod decode_opt;
mod encode;
mod error;
mod schema;
mod value;

/// Traits used by the construction macros.
pub mod inner {
    pub use crate::convert::IntoBencodeBytes;
}

pub use crate::decode_opt::BDecodeOpt;
pub use crate::error::{
    BencodeConvertError, BencodeConvertErrorKind, BencodeConvertResult, BencodeError, BencodeErrorKind, BencodeParseError,
    BencodeParseErrorKind, BencodeParseResult, BencodeResult,
};
pub use crate::schema::{from_value, marshal, to_value, unmarshal, Field, Fields, Kind, Schema};
pub use crate::value::{BDict, BencodeValue};

const BEN_END: u8 = b'e';
const DICT_START: u8 = b'd';
const LIST_START: u8 = b'l';
const INT_START: u8 = b'i';

const BYTE_LEN_LOW: u8 = b'0';
const BYTE_LEN_HIGH: u8 = b'9';
const BYTE_LEN_END: u8 = b':';
const NEGATIVE_SIGN: u8 = b'-';

/// Decode a single bencoded value that must span the whole input.
///
/// # Errors
///
/// Will return a [`BencodeParseError`] if the input is not valid bencode or if
/// there are bytes left after the first value.
pub fn decode(bytes: &[u8]) -> BencodeParseResult<BencodeValue> {
    BencodeValue::decode(bytes, BDecodeOpt::default())
}

/// Encode a value keeping the dictionary keys in insertion order.
#[must_use]
pub fn encode(value: &BencodeValue) -> Vec<u8> {
    value.encode()
}

/// Encode a value with the dictionary keys sorted by their raw bytes.
#[must_use]
pub fn encode_canonical(value: &BencodeValue) -> Vec<u8> {
    value.encode_canonical()
}

/// Construct a `BencodeValue` dictionary by supplying string references as keys and `BencodeValue` as values.
#[macro_export]
macro_rules! ben_map {
( $($key:expr => $val:expr),* ) => {
        {
            #[allow(unused_imports)]
            use $crate::inner::IntoBencodeBytes;
            use $crate::{BDict, BencodeValue};

            #[allow(unused_mut)]
            let mut map = BDict::new();
            $(
                map.insert(IntoBencodeBytes::into_bencode_bytes($key), $val);
            )*

            BencodeValue::Dict(map)
        }
    }
}

/// Construct a `BencodeValue` list by supplying a list of `BencodeValue` values.
#[macro_export]
macro_rules! ben_list {
    ( $($ben:expr),* ) => {
        {
            use $crate::BencodeValue;

            #[allow(unused_mut)]
            let mut list: Vec<BencodeValue> = Vec::new();
            $(
                list.push($ben);
            )*

            BencodeValue::List(list)
        }
    }
}

/// Construct `BencodeValue` bytes by supplying a type convertible to `Vec<u8>`.
#[macro_export]
macro_rules! ben_bytes {
    ( $ben:expr ) => {{
        use $crate::inner::IntoBencodeBytes;
        use $crate::BencodeValue;

        BencodeValue::Bytes(IntoBencodeBytes::into_bencode_bytes($ben))
    }};
}

/// Construct a `BencodeValue` integer by supplying an `i64`.
#[macro_export]
macro_rules! ben_int {
    ( $ben:expr ) => {{
        use $crate::BencodeValue;

        BencodeValue::Int($ben)
    }};
}
