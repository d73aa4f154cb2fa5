use std::str;

use crate::decode_opt::BDecodeOpt;
use crate::error::{BencodeParseError, BencodeParseErrorKind, BencodeParseResult};
use crate::value::{BDict, BencodeValue};

pub fn decode(bytes: &[u8], pos: usize, opts: BDecodeOpt, depth: usize) -> BencodeParseResult<(BencodeValue, usize)> {
    if depth >= opts.max_recursion() {
        return Err(BencodeParseError::from_kind(
            BencodeParseErrorKind::InvalidRecursionExceeded { pos, max: depth },
        ));
    }
    let curr_byte = peek_byte(bytes, pos)?;

    match curr_byte {
        crate::INT_START => {
            let (value, next_pos) = decode_int(bytes, pos + 1)?;
            Ok((BencodeValue::Int(value), next_pos))
        }
        crate::LIST_START => {
            let (value, next_pos) = decode_list(bytes, pos + 1, opts, depth)?;
            Ok((BencodeValue::List(value), next_pos))
        }
        crate::DICT_START => {
            let (value, next_pos) = decode_dict(bytes, pos + 1, opts, depth)?;
            Ok((BencodeValue::Dict(value), next_pos))
        }
        crate::BYTE_LEN_LOW..=crate::BYTE_LEN_HIGH | crate::NEGATIVE_SIGN => {
            // Include the length digit, don't increment position
            let (value, next_pos) = decode_bytes(bytes, pos)?;
            Ok((BencodeValue::Bytes(value.to_vec()), next_pos))
        }
        _ => Err(BencodeParseError::from_kind(BencodeParseErrorKind::InvalidByte { pos })),
    }
}

fn decode_int(bytes: &[u8], pos: usize) -> BencodeParseResult<(i64, usize)> {
    let begin_decode = bytes.get(pos..).unwrap_or_default();

    let Some(relative_end_pos) = begin_decode.iter().position(|n| *n == crate::BEN_END) else {
        return Err(BencodeParseError::from_kind(BencodeParseErrorKind::InvalidIntNoDelimiter {
            pos,
        }));
    };
    let int_byte_slice = &begin_decode[..relative_end_pos];

    if int_byte_slice.len() > 1 {
        // Negative zero is not allowed (this would not be caught when converting)
        if int_byte_slice[0] == crate::NEGATIVE_SIGN && int_byte_slice[1] == b'0' {
            return Err(BencodeParseError::from_kind(BencodeParseErrorKind::InvalidIntNegativeZero {
                pos,
            }));
        }

        if int_byte_slice[0] == b'0' {
            return Err(BencodeParseError::from_kind(BencodeParseErrorKind::InvalidIntZeroPadding {
                pos,
            }));
        }
    }

    // `str::parse` accepts a leading `+`, bencode does not
    let digits = int_byte_slice.strip_prefix(&[crate::NEGATIVE_SIGN]).unwrap_or(int_byte_slice);
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(BencodeParseError::from_kind(BencodeParseErrorKind::InvalidIntParseError {
            pos,
        }));
    }

    let Ok(int_str) = str::from_utf8(int_byte_slice) else {
        return Err(BencodeParseError::from_kind(BencodeParseErrorKind::InvalidIntParseError {
            pos,
        }));
    };

    // Position of end of integer type, next byte is the start of the next value
    let next_pos = pos + relative_end_pos + 1;
    match int_str.parse::<i64>() {
        Ok(n) => Ok((n, next_pos)),
        Err(_) => Err(BencodeParseError::from_kind(BencodeParseErrorKind::InvalidIntParseError {
            pos,
        })),
    }
}

fn decode_length(bytes: &[u8], pos: usize) -> BencodeParseResult<(usize, usize)> {
    if bytes.get(pos) == Some(&crate::NEGATIVE_SIGN) {
        return Err(BencodeParseError::from_kind(BencodeParseErrorKind::InvalidLengthNegative {
            pos,
        }));
    }

    let begin_decode = bytes.get(pos..).unwrap_or_default();
    let num_digits = begin_decode.iter().take_while(|n| n.is_ascii_digit()).count();

    if num_digits == 0 {
        return Err(BencodeParseError::from_kind(BencodeParseErrorKind::InvalidByte { pos }));
    }

    if begin_decode.get(num_digits) != Some(&crate::BYTE_LEN_END) {
        return Err(BencodeParseError::from_kind(BencodeParseErrorKind::InvalidLengthNoDelimiter {
            pos,
        }));
    }

    let len_byte_slice = &begin_decode[..num_digits];
    if len_byte_slice.len() > 1 && len_byte_slice[0] == b'0' {
        return Err(BencodeParseError::from_kind(BencodeParseErrorKind::InvalidLengthZeroPadding {
            pos,
        }));
    }

    // Only ascii digits at this point, a failure can only be an overflow
    let num_bytes = str::from_utf8(len_byte_slice)
        .ok()
        .and_then(|n| n.parse::<usize>().ok())
        .ok_or_else(|| BencodeParseError::from_kind(BencodeParseErrorKind::InvalidLengthOverflow { pos }))?;

    Ok((num_bytes, pos + num_digits + 1))
}

fn decode_bytes(bytes: &[u8], pos: usize) -> BencodeParseResult<(&[u8], usize)> {
    let (num_bytes, start_pos) = decode_length(bytes, pos)?;

    if num_bytes > bytes.len() - start_pos {
        return Err(BencodeParseError::from_kind(BencodeParseErrorKind::InvalidLengthOverflow {
            pos,
        }));
    }

    let next_pos = start_pos + num_bytes;
    Ok((&bytes[start_pos..next_pos], next_pos))
}

fn decode_list(bytes: &[u8], pos: usize, opts: BDecodeOpt, depth: usize) -> BencodeParseResult<(Vec<BencodeValue>, usize)> {
    let mut bencode_list = Vec::new();

    let mut curr_pos = pos;
    let mut curr_byte = peek_container_byte(bytes, curr_pos, pos)?;

    while curr_byte != crate::BEN_END {
        let (bencode, next_pos) = decode(bytes, curr_pos, opts, depth + 1)?;

        bencode_list.push(bencode);

        curr_pos = next_pos;
        curr_byte = peek_container_byte(bytes, curr_pos, pos)?;
    }

    let next_pos = curr_pos + 1;
    Ok((bencode_list, next_pos))
}

fn decode_dict(bytes: &[u8], pos: usize, opts: BDecodeOpt, depth: usize) -> BencodeParseResult<(BDict, usize)> {
    let mut bencode_dict = BDict::new();
    let mut last_key: Option<Vec<u8>> = None;

    let mut curr_pos = pos;
    let mut curr_byte = peek_container_byte(bytes, curr_pos, pos)?;

    while curr_byte != crate::BEN_END {
        let (key_bytes, next_pos) = decode_bytes(bytes, curr_pos)?;

        match (&last_key, opts.check_key_sort()) {
            (Some(last_key), true) if key_bytes < last_key.as_slice() => {
                return Err(BencodeParseError::from_kind(BencodeParseErrorKind::InvalidKeyOrdering {
                    pos: curr_pos,
                    key: key_bytes.to_vec(),
                }))
            }
            _ => (),
        };
        curr_pos = next_pos;

        let (value, next_pos) = decode(bytes, curr_pos, opts, depth + 1)?;

        // Duplicate keys: the last value wins, the first position is kept
        bencode_dict.insert(key_bytes.to_vec(), value);
        last_key = Some(key_bytes.to_vec());

        curr_pos = next_pos;
        curr_byte = peek_container_byte(bytes, curr_pos, pos)?;
    }

    let next_pos = curr_pos + 1;
    Ok((bencode_dict, next_pos))
}

fn peek_byte(bytes: &[u8], pos: usize) -> BencodeParseResult<u8> {
    bytes
        .get(pos)
        .copied()
        .ok_or_else(|| BencodeParseError::from_kind(BencodeParseErrorKind::TruncatedInput { pos }))
}

fn peek_container_byte(bytes: &[u8], pos: usize, container_pos: usize) -> BencodeParseResult<u8> {
    bytes.get(pos).copied().ok_or_else(|| {
        BencodeParseError::from_kind(BencodeParseErrorKind::UnterminatedContainer {
            pos: container_pos - 1,
        })
    })
}
