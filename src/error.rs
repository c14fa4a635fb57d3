// Copyright 2020 Mateusz Janda.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::io;
use thiserror::Error;

/// Errors reported by decoder and by its consumers (metainfo, tracker).
///
/// Every `Decode*` variant (except [`Error::DecodeEmptyInput`]) carries byte offset in the input
/// buffer where problem was detected.
#[derive(Error, PartialEq, Clone, Debug)]
pub enum Error {
    #[error("Nothing to decode")]
    DecodeEmptyInput,
    #[error("Unexpected end of data at position {0}")]
    DecodeUnexpectedEof(usize),
    #[error("Invalid token at position {0}")]
    DecodeInvalidToken(usize),
    #[error("Malformed integer at position {0}")]
    DecodeMalformedInteger(usize),
    #[error("Malformed string length at position {0}")]
    DecodeMalformedLength(usize),
    #[error("String truncated at position {0}")]
    DecodeTruncatedString(usize),
    #[error("Dictionary key is not a string at position {0}")]
    DecodeInvalidKeyType(usize),
    #[error("Nesting too deep at position {0}")]
    DecodeNestingTooDeep(usize),
    #[error("Unexpected data after value at position {0}")]
    DecodeTrailingData(usize),

    #[error("Metainfo file not found: {0}")]
    MetaFileNotFound(String),
    #[error("Incorrect or missing '{0}' value")]
    MetaIncorrectOrMissing(&'static str),
    #[error("Invalid UTF-8 in '{0}' value")]
    MetaInvalidUtf8(&'static str),
    #[error("Value '{0}' is not divisible by hash size")]
    MetaNotDivisible(&'static str),
    #[error("Conflicting 'length' and 'files' values")]
    MetaLenAndFilesConflict,
    #[error("Missing 'length' or 'files' value")]
    MetaLenOrFilesMissing,

    #[error("Tracker failure: {0}")]
    TrackerRespFail(String),
    #[error("Incorrect or missing '{0}' value in tracker response")]
    TrackerIncorrectOrMissing(&'static str),
    #[error("Unsupported peer encoding (dictionary model)")]
    TrackerUnsupportedPeerEncoding,
    #[error("Compact peers length {0} is not multiple of 6")]
    TrackerCompactPeers(usize),
    #[error("Tracker responded with HTTP status {0}")]
    TrackerStatus(u16),
    #[error("Tracker connection problem: {0}")]
    TrackerHttp(String),
    #[error("Invalid announce URL: {0}")]
    TrackerUrl(String),

    #[error("I/O problem: {0}")]
    Io(String),
}

impl Error {
    /// Byte offset of decode failure, `None` for non-decode errors.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::DecodeUnexpectedEof(pos)
            | Error::DecodeInvalidToken(pos)
            | Error::DecodeMalformedInteger(pos)
            | Error::DecodeMalformedLength(pos)
            | Error::DecodeTruncatedString(pos)
            | Error::DecodeInvalidKeyType(pos)
            | Error::DecodeNestingTooDeep(pos)
            | Error::DecodeTrailingData(pos) => Some(*pos),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Error::TrackerHttp(error.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(error: url::ParseError) -> Self {
        Error::TrackerUrl(error.to_string())
    }
}
