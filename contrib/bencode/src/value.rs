use std::str;

use indexmap::IndexMap;

use crate::decode;
use crate::decode_opt::BDecodeOpt;
use crate::encode;
use crate::error::{BencodeParseError, BencodeParseErrorKind, BencodeParseResult};
use crate::schema::Kind;

/// Bencode dictionary that keeps its keys in insertion order.
///
/// Two dictionaries are equal only when they hold the same entries in the
/// same order.
#[derive(Debug, Default, Clone)]
pub struct BDict {
    entries: IndexMap<Vec<u8>, BencodeValue>,
}

impl BDict {
    #[must_use]
    pub fn new() -> BDict {
        BDict::default()
    }

    /// Insert a value, returning the one it replaced.
    ///
    /// A replaced key keeps the position it was first inserted at.
    pub fn insert(&mut self, key: Vec<u8>, value: BencodeValue) -> Option<BencodeValue> {
        self.entries.insert(key, value)
    }

    #[must_use]
    pub fn lookup(&self, key: &[u8]) -> Option<&BencodeValue> {
        self.entries.get(key)
    }

    pub fn lookup_mut(&mut self, key: &[u8]) -> Option<&mut BencodeValue> {
        self.entries.get_mut(key)
    }

    /// Remove a key. The remaining keys keep their order.
    pub fn remove(&mut self, key: &[u8]) -> Option<BencodeValue> {
        self.entries.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.keys().map(Vec::as_slice)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Vec<u8>, BencodeValue> {
        self.entries.iter()
    }
}

impl PartialEq for BDict {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for BDict {}

impl<'a> IntoIterator for &'a BDict {
    type Item = (&'a Vec<u8>, &'a BencodeValue);
    type IntoIter = indexmap::map::Iter<'a, Vec<u8>, BencodeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(Vec<u8>, BencodeValue)> for BDict {
    fn from_iter<I: IntoIterator<Item = (Vec<u8>, BencodeValue)>>(iter: I) -> Self {
        let mut dict = BDict::new();
        for (key, value) in iter {
            dict.insert(key, value);
        }
        dict
    }
}

/// Bencode object that owns its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BencodeValue {
    Int(i64),
    Bytes(Vec<u8>),
    List(Vec<BencodeValue>),
    Dict(BDict),
}

impl BencodeValue {
    /// Decode the given bytes into a `BencodeValue` using the given decode options.
    ///
    /// # Errors
    ///
    /// Will return a [`BencodeParseError`] if the bytes are not valid bencode,
    /// or if full decoding is enforced and bytes remain after the value.
    pub fn decode(bytes: &[u8], opts: BDecodeOpt) -> BencodeParseResult<BencodeValue> {
        let (value, end_pos) = decode::decode(bytes, 0, opts, 0)?;

        if opts.enforce_full_decode() && end_pos != bytes.len() {
            return Err(BencodeParseError::from_kind(BencodeParseErrorKind::TrailingBytes {
                pos: end_pos,
            }));
        }

        Ok(value)
    }

    /// Decode the first value of the input and return it with the number of bytes it used.
    ///
    /// # Errors
    ///
    /// Will return a [`BencodeParseError`] if the leading value is not valid bencode.
    pub fn decode_prefix(bytes: &[u8], opts: BDecodeOpt) -> BencodeParseResult<(BencodeValue, usize)> {
        decode::decode(bytes, 0, opts, 0)
    }

    /// Encode with dictionaries in insertion order.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        encode::encode(self, &mut bytes, false);
        bytes
    }

    /// Encode with dictionaries sorted by raw key bytes at every level.
    #[must_use]
    pub fn encode_canonical(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        encode::encode(self, &mut bytes, true);
        bytes
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            BencodeValue::Int(_) => Kind::Int,
            BencodeValue::Bytes(_) => Kind::Bytes,
            BencodeValue::List(_) => Kind::List,
            BencodeValue::Dict(_) => Kind::Dict,
        }
    }

    #[must_use]
    pub fn int(&self) -> Option<i64> {
        match self {
            BencodeValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            BencodeValue::Bytes(n) => Some(n),
            _ => None,
        }
    }

    /// Bytes as UTF-8, `None` if they are not bytes or not valid UTF-8.
    #[must_use]
    pub fn str(&self) -> Option<&str> {
        self.bytes().and_then(|n| str::from_utf8(n).ok())
    }

    #[must_use]
    pub fn list(&self) -> Option<&[BencodeValue]> {
        match self {
            BencodeValue::List(n) => Some(n),
            _ => None,
        }
    }

    pub fn list_mut(&mut self) -> Option<&mut Vec<BencodeValue>> {
        match self {
            BencodeValue::List(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn dict(&self) -> Option<&BDict> {
        match self {
            BencodeValue::Dict(n) => Some(n),
            _ => None,
        }
    }

    pub fn dict_mut(&mut self) -> Option<&mut BDict> {
        match self {
            BencodeValue::Dict(n) => Some(n),
            _ => None,
        }
    }
}
