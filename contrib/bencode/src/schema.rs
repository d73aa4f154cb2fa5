//! Typed conversion between Rust structures and bencode dictionaries.
//!
//! A type opts in by implementing [`Schema`]: it declares the ordered list of
//! dictionary fields it reads and writes, how to produce a field value from
//! itself, and how to build itself from the validated [`Fields`].
//!
//! ```rust
//! use bencode::{ben_int, marshal, unmarshal, BencodeConvertResult, BencodeValue, Field, Fields, Kind, Schema};
//!
//! #[derive(Debug, PartialEq)]
//! struct Ping {
//!     seq: i64,
//!     note: Option<String>,
//! }
//!
//! impl Schema for Ping {
//!     const FIELDS: &'static [Field] = &[Field::required("seq", "seq", Kind::Int), Field::optional("note", "note", Kind::Bytes)];
//!
//!     fn get(&self, name: &str) -> Option<BencodeValue> {
//!         match name {
//!             "seq" => Some(ben_int!(self.seq)),
//!             "note" => self.note.as_ref().map(|n| BencodeValue::Bytes(n.as_bytes().to_vec())),
//!             _ => None,
//!         }
//!     }
//!
//!     fn build(fields: &Fields) -> BencodeConvertResult<Self> {
//!         Ok(Ping {
//!             seq: fields.int("seq")?,
//!             note: fields.opt_string("note"),
//!         })
//!     }
//! }
//!
//! let bytes = marshal(&Ping { seq: 3, note: None }).unwrap();
//! assert_eq!(bytes, b"d3:seqi3ee".to_vec());
//! assert_eq!(unmarshal::<Ping>(&bytes).unwrap(), Ping { seq: 3, note: None });
//! ```
use crate::error::{BencodeConvertError, BencodeConvertErrorKind, BencodeConvertResult, BencodeResult};
use crate::value::{BDict, BencodeValue};

/// Wire kind of a declared field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Kind {
    Int,
    Bytes,
    List,
    Dict,
    /// Any of the above, no check is made.
    Any,
}

impl Kind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Kind::Int => "integer",
            Kind::Bytes => "bytes",
            Kind::List => "list",
            Kind::Dict => "dictionary",
            Kind::Any => "any",
        }
    }

    #[must_use]
    pub fn accepts(self, value: &BencodeValue) -> bool {
        self == Kind::Any || self == value.kind()
    }
}

/// A declared dictionary field.
///
/// `name` identifies the field on the Rust side, `key` is the dictionary key on
/// the wire (they may differ, for example `piece_length` and `piece length`).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub key: &'static str,
    pub kind: Kind,
    pub optional: bool,
}

impl Field {
    #[must_use]
    pub const fn required(name: &'static str, key: &'static str, kind: Kind) -> Field {
        Field {
            name,
            key,
            kind,
            optional: false,
        }
    }

    #[must_use]
    pub const fn optional(name: &'static str, key: &'static str, kind: Kind) -> Field {
        Field {
            name,
            key,
            kind,
            optional: true,
        }
    }
}

/// A type with a declared bencode dictionary layout.
pub trait Schema: Sized {
    /// Fields in encoding order.
    const FIELDS: &'static [Field];

    /// Value of the field called `name`, `None` when it has no value.
    fn get(&self, name: &str) -> Option<BencodeValue>;

    /// Build the type from fields already checked against [`Schema::FIELDS`].
    ///
    /// # Errors
    ///
    /// Will return an error if a field value can not be converted into the target type.
    fn build(fields: &Fields) -> BencodeConvertResult<Self>;
}

/// Field values found in a dictionary, checked against their declared kind.
#[derive(Debug)]
pub struct Fields {
    values: Vec<(&'static Field, BencodeValue)>,
}

impl Fields {
    /// Value of the field, `None` when it was absent.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&BencodeValue> {
        self.values.iter().find(|(field, _)| field.name == name).map(|(_, value)| value)
    }

    fn required(&self, name: &str) -> BencodeConvertResult<&BencodeValue> {
        self.value(name).ok_or_else(|| {
            BencodeConvertError::from_kind(BencodeConvertErrorKind::MissingKey {
                key: name.as_bytes().to_vec(),
            })
        })
    }

    fn wrong_type(&self, name: &str, expected_type: &str) -> BencodeConvertError {
        let key = self
            .values
            .iter()
            .find(|(field, _)| field.name == name)
            .map_or(name, |(field, _)| field.key);

        BencodeConvertError::from_kind(BencodeConvertErrorKind::WrongType {
            key: key.as_bytes().to_vec(),
            expected_type: expected_type.to_owned(),
        })
    }

    /// # Errors
    ///
    /// Will return an error if the field is absent or not an integer.
    pub fn int(&self, name: &str) -> BencodeConvertResult<i64> {
        self.required(name)?.int().ok_or_else(|| self.wrong_type(name, Kind::Int.name()))
    }

    #[must_use]
    pub fn opt_int(&self, name: &str) -> Option<i64> {
        self.value(name).and_then(BencodeValue::int)
    }

    /// # Errors
    ///
    /// Will return an error if the field is absent or not a byte string.
    pub fn bytes(&self, name: &str) -> BencodeConvertResult<Vec<u8>> {
        self.required(name)?
            .bytes()
            .map(<[u8]>::to_vec)
            .ok_or_else(|| self.wrong_type(name, Kind::Bytes.name()))
    }

    #[must_use]
    pub fn opt_bytes(&self, name: &str) -> Option<Vec<u8>> {
        self.value(name).and_then(BencodeValue::bytes).map(<[u8]>::to_vec)
    }

    /// # Errors
    ///
    /// Will return an error if the field is absent or not a valid UTF-8 byte string.
    pub fn string(&self, name: &str) -> BencodeConvertResult<String> {
        self.required(name)?
            .str()
            .map(ToOwned::to_owned)
            .ok_or_else(|| self.wrong_type(name, "utf-8 string"))
    }

    /// The field as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn opt_string(&self, name: &str) -> Option<String> {
        self.value(name)
            .and_then(BencodeValue::bytes)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// # Errors
    ///
    /// Will return an error if the field is absent or not a list.
    pub fn list(&self, name: &str) -> BencodeConvertResult<Vec<BencodeValue>> {
        self.required(name)?
            .list()
            .map(<[BencodeValue]>::to_vec)
            .ok_or_else(|| self.wrong_type(name, Kind::List.name()))
    }

    #[must_use]
    pub fn opt_list(&self, name: &str) -> Option<Vec<BencodeValue>> {
        self.value(name).and_then(BencodeValue::list).map(<[BencodeValue]>::to_vec)
    }

    /// # Errors
    ///
    /// Will return an error if the field is absent or not a dictionary.
    pub fn dict(&self, name: &str) -> BencodeConvertResult<BDict> {
        self.required(name)?
            .dict()
            .cloned()
            .ok_or_else(|| self.wrong_type(name, Kind::Dict.name()))
    }

    #[must_use]
    pub fn opt_dict(&self, name: &str) -> Option<BDict> {
        self.value(name).and_then(BencodeValue::dict).cloned()
    }
}

/// Convert a decoded dictionary into `T`.
///
/// # Errors
///
/// Will return an error if `value` is not a dictionary, a required key is
/// missing, or a field has a different kind than declared.
pub fn from_value<T: Schema>(value: &BencodeValue) -> BencodeConvertResult<T> {
    let Some(dict) = value.dict() else {
        return Err(BencodeConvertError::from_kind(BencodeConvertErrorKind::WrongType {
            key: Vec::new(),
            expected_type: Kind::Dict.name().to_owned(),
        }));
    };

    let mut values = Vec::with_capacity(T::FIELDS.len());

    for field in T::FIELDS {
        match dict.lookup(field.key.as_bytes()) {
            Some(found) if field.kind.accepts(found) => values.push((field, found.clone())),
            Some(_) => {
                return Err(BencodeConvertError::from_kind(BencodeConvertErrorKind::WrongType {
                    key: field.key.as_bytes().to_vec(),
                    expected_type: field.kind.name().to_owned(),
                }))
            }
            None if field.optional => (),
            None => {
                return Err(BencodeConvertError::from_kind(BencodeConvertErrorKind::MissingKey {
                    key: field.key.as_bytes().to_vec(),
                }))
            }
        }
    }

    T::build(&Fields { values })
}

/// Convert `T` into a dictionary with its fields in declared order.
///
/// # Errors
///
/// Will return an error if a required field has no value, or a value has a
/// different kind than declared.
pub fn to_value<T: Schema>(item: &T) -> BencodeConvertResult<BencodeValue> {
    let mut dict = BDict::new();

    for field in T::FIELDS {
        match item.get(field.name) {
            Some(value) if field.kind.accepts(&value) => {
                dict.insert(field.key.as_bytes().to_vec(), value);
            }
            Some(_) => {
                return Err(BencodeConvertError::from_kind(BencodeConvertErrorKind::WrongType {
                    key: field.key.as_bytes().to_vec(),
                    expected_type: field.kind.name().to_owned(),
                }))
            }
            None if field.optional => (),
            None => {
                return Err(BencodeConvertError::from_kind(BencodeConvertErrorKind::MissingField {
                    name: field.name.to_owned(),
                }))
            }
        }
    }

    Ok(BencodeValue::Dict(dict))
}

/// Decode `bytes` and convert the result into `T`.
///
/// # Errors
///
/// Will return an error if the bytes are not valid bencode or do not match the schema of `T`.
pub fn unmarshal<T: Schema>(bytes: &[u8]) -> BencodeResult<T> {
    let value = crate::decode(bytes)?;
    Ok(from_value(&value)?)
}

/// Convert `item` and encode the result.
///
/// # Errors
///
/// Will return an error if `item` does not satisfy its own schema.
pub fn marshal<T: Schema>(item: &T) -> BencodeResult<Vec<u8>> {
    Ok(to_value(item)?.encode())
}
