//! Program to print the metadata of a `.torrent` file.
//!
//! It prints the fields a user usually wants to check before seeding a
//! torrent, and the info hash clients will announce it with.
//!
//! Examples:
//!
//! ```text
//! cargo run --bin torrent_info ./share/fixtures/sample.torrent
//! cargo run --bin torrent_info -- --json ./share/fixtures/sample.torrent | jq
//! ```
//!
//! Sample output:
//!
//! ```text
//! Announce URL: http://127.0.0.1:18312/announce
//! Created By: mktorrent 1.1
//! Creation Date: 2024-01-10T12:00:00+00:00
//! Name: sample.txt
//! Length: 5
//! Piece Length: 16384
//! Private: 0
//! Info Hash (SHA1): 3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0
//! ```
//!
//! The info hash is the SHA-1 of the `info` dictionary as it is found in the
//! file. The dictionary is re-encoded with its original key order, so files
//! with unsorted keys keep the hash other clients compute for them.
use std::path::PathBuf;

use anyhow::Context;
use bencode::{
    ben_bytes, ben_int, BencodeConvertError, BencodeConvertErrorKind, BencodeConvertResult, BencodeValue, Field, Fields,
    Kind, Schema,
};
use clap::Parser;
use serde::Serialize;
use sha1::{Digest, Sha1};
use torrust_swarm_tracker_clock::conv::convert_from_unix_seconds_to_iso_8601;
use torrust_swarm_tracker_primitives::info_hash::{InfoHash, INFO_HASH_BYTES_LEN};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `.torrent` file.
    path: PathBuf,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

/// # Errors
///
/// Will return an error if the file can not be read or it is not a valid
/// torrent file.
pub fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    let bytes = std::fs::read(&args.path).with_context(|| format!("failed to read {}", args.path.display()))?;

    let summary = TorrentSummary::from_bytes(&bytes).context("failed to parse torrent file")?;

    if args.json {
        let json = serde_json::to_string(&summary).context("failed to serialize the summary into JSON")?;
        println!("{json}");
    } else {
        print!("{}", summary.to_text());
    }

    Ok(())
}

/// A `.torrent` file, also known as metainfo file.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Metainfo {
    pub announce: String,
    pub created_by: Option<String>,
    /// Unix time in seconds.
    pub creation_date: Option<i64>,
    pub info: Info,
}

impl Schema for Metainfo {
    const FIELDS: &'static [Field] = &[
        Field::required("announce", "announce", Kind::Bytes),
        Field::optional("created_by", "created by", Kind::Bytes),
        Field::optional("creation_date", "creation date", Kind::Int),
        Field::required("info", "info", Kind::Dict),
    ];

    fn get(&self, name: &str) -> Option<BencodeValue> {
        match name {
            "announce" => Some(ben_bytes!(self.announce.as_str())),
            "created_by" => self.created_by.as_deref().map(|created_by| ben_bytes!(created_by)),
            "creation_date" => self.creation_date.map(|creation_date| ben_int!(creation_date)),
            "info" => bencode::to_value(&self.info).ok(),
            _ => None,
        }
    }

    fn build(fields: &Fields) -> BencodeConvertResult<Self> {
        let info = fields.value("info").map(bencode::from_value::<Info>).transpose()?;

        Ok(Self {
            announce: fields.string("announce")?,
            created_by: fields.opt_string("created_by"),
            creation_date: fields.opt_int("creation_date"),
            info: info.ok_or_else(|| {
                BencodeConvertError::from_kind(BencodeConvertErrorKind::MissingKey {
                    key: b"info".to_vec(),
                })
            })?,
        })
    }
}

/// The `info` dictionary. Single-file torrents have a `length`, multi-file
/// torrents have `files`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Info {
    pub name: String,
    pub piece_length: i64,
    pub pieces: Vec<u8>,
    pub length: Option<i64>,
    pub files: Option<Vec<File>>,
    pub md5sum: Option<String>,
    pub private: Option<i64>,
    pub source: Option<String>,
}

impl Info {
    /// Size of the content: the `length` of a single-file torrent or the sum
    /// of the file lengths of a multi-file torrent. `None` when the sum does
    /// not fit in an `i64`.
    #[must_use]
    pub fn total_length(&self) -> Option<i64> {
        match (&self.length, &self.files) {
            (Some(length), _) => Some(*length),
            (None, Some(files)) => files.iter().try_fold(0i64, |total, file| total.checked_add(file.length)),
            (None, None) => None,
        }
    }
}

impl Schema for Info {
    const FIELDS: &'static [Field] = &[
        Field::optional("files", "files", Kind::List),
        Field::optional("length", "length", Kind::Int),
        Field::optional("md5sum", "md5sum", Kind::Bytes),
        Field::required("name", "name", Kind::Bytes),
        Field::required("piece_length", "piece length", Kind::Int),
        Field::required("pieces", "pieces", Kind::Bytes),
        Field::optional("private", "private", Kind::Int),
        Field::optional("source", "source", Kind::Bytes),
    ];

    fn get(&self, name: &str) -> Option<BencodeValue> {
        match name {
            "files" => self
                .files
                .as_ref()
                .map(|files| BencodeValue::List(files.iter().filter_map(|file| bencode::to_value(file).ok()).collect())),
            "length" => self.length.map(|length| ben_int!(length)),
            "md5sum" => self.md5sum.as_deref().map(|md5sum| ben_bytes!(md5sum)),
            "name" => Some(ben_bytes!(self.name.as_str())),
            "piece_length" => Some(ben_int!(self.piece_length)),
            "pieces" => Some(ben_bytes!(self.pieces.as_slice())),
            "private" => self.private.map(|private| ben_int!(private)),
            "source" => self.source.as_deref().map(|source| ben_bytes!(source)),
            _ => None,
        }
    }

    fn build(fields: &Fields) -> BencodeConvertResult<Self> {
        let files = fields
            .opt_list("files")
            .map(|files| files.iter().map(bencode::from_value::<File>).collect::<Result<Vec<_>, _>>())
            .transpose()?;

        Ok(Self {
            name: fields.string("name")?,
            piece_length: fields.int("piece_length")?,
            pieces: fields.bytes("pieces")?,
            length: fields.opt_int("length"),
            files,
            md5sum: fields.opt_string("md5sum"),
            private: fields.opt_int("private"),
            source: fields.opt_string("source"),
        })
    }
}

/// One entry of the `files` list of a multi-file torrent.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct File {
    pub length: i64,
    pub path: Vec<String>,
}

impl Schema for File {
    const FIELDS: &'static [Field] = &[
        Field::required("length", "length", Kind::Int),
        Field::required("path", "path", Kind::List),
    ];

    fn get(&self, name: &str) -> Option<BencodeValue> {
        match name {
            "length" => Some(ben_int!(self.length)),
            "path" => Some(BencodeValue::List(
                self.path.iter().map(|segment| ben_bytes!(segment.as_str())).collect(),
            )),
            _ => None,
        }
    }

    fn build(fields: &Fields) -> BencodeConvertResult<Self> {
        let path = fields
            .list("path")?
            .iter()
            .map(|segment| {
                segment.str().map(ToOwned::to_owned).ok_or_else(|| {
                    BencodeConvertError::from_kind(BencodeConvertErrorKind::WrongType {
                        key: b"path".to_vec(),
                        expected_type: "list of utf-8 strings".to_owned(),
                    })
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            length: fields.int("length")?,
            path,
        })
    }
}

/// What the console app prints.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct TorrentSummary {
    pub announce: String,
    pub created_by: Option<String>,
    pub creation_date: Option<String>,
    pub name: String,
    pub length: Option<i64>,
    pub files: Option<usize>,
    pub piece_length: i64,
    pub private: Option<i64>,
    pub info_hash: InfoHash,
}

impl TorrentSummary {
    /// # Errors
    ///
    /// Will return an error if `bytes` is not a bencoded metainfo dictionary.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let value = bencode::decode(bytes).map_err(|err| anyhow::anyhow!("{err}"))?;

        let metainfo = bencode::from_value::<Metainfo>(&value).map_err(|err| anyhow::anyhow!("{err}"))?;

        let info_value = value
            .dict()
            .and_then(|dict| dict.lookup(b"info"))
            .context("missing info dictionary")?;

        Ok(Self {
            announce: metainfo.announce,
            created_by: metainfo.created_by,
            creation_date: metainfo.creation_date.and_then(convert_from_unix_seconds_to_iso_8601),
            name: metainfo.info.name.clone(),
            length: metainfo.info.total_length(),
            files: metainfo.info.files.as_ref().map(Vec::len),
            piece_length: metainfo.info.piece_length,
            private: metainfo.info.private,
            info_hash: info_hash(info_value),
        })
    }

    #[must_use]
    pub fn to_text(&self) -> String {
        let mut lines = vec![format!("Announce URL: {}", self.announce)];

        if let Some(created_by) = &self.created_by {
            lines.push(format!("Created By: {created_by}"));
        }
        if let Some(creation_date) = &self.creation_date {
            lines.push(format!("Creation Date: {creation_date}"));
        }
        lines.push(format!("Name: {}", self.name));
        if let Some(length) = self.length {
            lines.push(format!("Length: {length}"));
        }
        if let Some(files) = self.files {
            lines.push(format!("Files: {files}"));
        }
        lines.push(format!("Piece Length: {}", self.piece_length));
        if let Some(private) = self.private {
            lines.push(format!("Private: {private}"));
        }
        lines.push(format!("Info Hash (SHA1): {}", self.info_hash));

        lines.iter().map(|line| format!("{line}\n")).collect()
    }
}

/// SHA-1 of the `info` value, encoded with its keys in the order they were
/// read.
#[must_use]
pub fn info_hash(info: &BencodeValue) -> InfoHash {
    let digest = Sha1::digest(info.encode());

    let mut bytes = [0u8; INFO_HASH_BYTES_LEN];
    bytes.copy_from_slice(&digest);

    InfoHash(bytes)
}
