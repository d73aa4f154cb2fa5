use std::iter::Extend;

use crate::value::{BDict, BencodeValue};

/// Encode `val` into `bytes`, sorting dictionary keys when `canonical` is set.
pub fn encode(val: &BencodeValue, bytes: &mut Vec<u8>, canonical: bool) {
    match val {
        BencodeValue::Int(n) => encode_int(*n, bytes),
        BencodeValue::Bytes(n) => encode_bytes(n, bytes),
        BencodeValue::List(n) => encode_list(n, bytes, canonical),
        BencodeValue::Dict(n) => encode_dict(n, bytes, canonical),
    }
}

fn encode_int(val: i64, bytes: &mut Vec<u8>) {
    bytes.push(crate::INT_START);

    bytes.extend(val.to_string().into_bytes());

    bytes.push(crate::BEN_END);
}

fn encode_bytes(list: &[u8], bytes: &mut Vec<u8>) {
    bytes.extend(list.len().to_string().into_bytes());

    bytes.push(crate::BYTE_LEN_END);

    bytes.extend(list.iter().copied());
}

fn encode_list(list: &[BencodeValue], bytes: &mut Vec<u8>, canonical: bool) {
    bytes.push(crate::LIST_START);

    for i in list {
        encode(i, bytes, canonical);
    }

    bytes.push(crate::BEN_END);
}

fn encode_dict(dict: &BDict, bytes: &mut Vec<u8>, canonical: bool) {
    let mut entries: Vec<(&Vec<u8>, &BencodeValue)> = dict.iter().collect();
    if canonical {
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    }

    bytes.push(crate::DICT_START);
    for (key, value) in entries {
        encode_bytes(key, bytes);
        encode(value, bytes, canonical);
    }
    bytes.push(crate::BEN_END);
}
