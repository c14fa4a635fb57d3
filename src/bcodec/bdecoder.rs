// Copyright 2020 Mateusz Janda.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::bcodec::bvalue::{BDict, BValue, Delimiter};
use crate::constant::MAX_NESTING_DEPTH;
use crate::Error;
use bytes::Bytes;

/// Result of single dispatch step. `End` is the terminator sentinel and is legal only inside
/// list and dictionary loops.
#[derive(PartialEq, Debug)]
pub(super) enum Token {
    Value(BValue),
    End,
}

/// [Bencode](https://en.wikipedia.org/wiki/Bencode) decoder used by metafile/torrent files and
/// BitTorrent protocol.
///
/// Decoder owns its buffer and a cursor. Each call to [`BDecoder::decode`] consumes exactly one
/// value, so the same instance can be used to read back-to-back framed messages, where
/// [`BDecoder::position`] tells where the next one begins.
#[derive(PartialEq, Clone, Debug)]
pub struct BDecoder {
    data: Bytes,
    pos: usize,
    max_depth: usize,
}

impl BDecoder {
    pub fn new(data: impl Into<Bytes>) -> BDecoder {
        BDecoder {
            data: data.into(),
            pos: 0,
            max_depth: MAX_NESTING_DEPTH,
        }
    }

    /// Override maximal nesting of lists and dictionaries (default [`MAX_NESTING_DEPTH`]).
    pub fn with_max_depth(mut self, max_depth: usize) -> BDecoder {
        self.max_depth = max_depth;
        self
    }

    /// Offset of the first byte not consumed yet.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Bytes not consumed yet.
    pub fn remaining(&self) -> &[u8] {
        &self.data[self.pos.min(self.data.len())..]
    }

    /// Decode one [bencoded](https://en.wikipedia.org/wiki/Bencode) value starting at current
    /// position. On success cursor is moved right after the last byte of the value, on failure it
    /// stays where it was.
    ///
    /// # Example
    /// ```
    /// use rbencode::{BDecoder, BValue};
    /// let mut decoder = BDecoder::new(&b"i44e4:spam"[..]);
    ///
    /// assert_eq!(decoder.decode(), Ok(BValue::Int(44)));
    /// assert_eq!(decoder.position(), 4);
    /// assert_eq!(decoder.decode(), Ok(BValue::ByteStr(b"spam".to_vec())));
    /// ```
    pub fn decode(&mut self) -> Result<BValue, Error> {
        if self.is_exhausted() {
            return Err(Error::DecodeEmptyInput);
        }

        let (value, pos) = next_value(&self.data, self.pos, 0, self.max_depth)?;
        tracing::trace!(start = self.pos, end = pos, "bencoded value decoded");
        self.pos = pos;

        Ok(value)
    }

    /// Decode all back-to-back [bencoded](https://en.wikipedia.org/wiki/Bencode) values.
    ///
    /// # Example
    /// ```
    /// use rbencode::{BDecoder, BValue};
    /// let val = BDecoder::from_array("i44e".as_bytes()).unwrap();
    ///
    /// assert_eq!(val, vec![BValue::Int(44)]);
    /// ```
    pub fn from_array(arg: &[u8]) -> Result<Vec<BValue>, Error> {
        let mut decoder = BDecoder::new(Bytes::copy_from_slice(arg));
        let mut values = vec![decoder.decode()?];
        while !decoder.is_exhausted() {
            values.push(decoder.decode()?);
        }

        Ok(values)
    }

    /// Decode buffer holding exactly one [bencoded](https://en.wikipedia.org/wiki/Bencode)
    /// value. Any byte left after it is an error.
    ///
    /// # Example
    /// ```
    /// use rbencode::{BDecoder, BValue, Error};
    ///
    /// assert_eq!(BDecoder::from_single(b"i44e"), Ok(BValue::Int(44)));
    /// assert_eq!(BDecoder::from_single(b"i44ex"), Err(Error::DecodeTrailingData(4)));
    /// ```
    pub fn from_single(arg: &[u8]) -> Result<BValue, Error> {
        let mut decoder = BDecoder::new(Bytes::copy_from_slice(arg));
        let value = decoder.decode()?;
        if !decoder.is_exhausted() {
            return Err(Error::DecodeTrailingData(decoder.position()));
        }

        Ok(value)
    }
}

/// Decode value at `pos`, terminator is not accepted here.
pub(super) fn next_value(
    data: &[u8],
    pos: usize,
    depth: usize,
    max_depth: usize,
) -> Result<(BValue, usize), Error> {
    match next_token(data, pos, depth, max_depth)? {
        (Token::Value(value), next) => Ok((value, next)),
        (Token::End, _) => Err(Error::DecodeInvalidToken(pos)),
    }
}

/// Peek byte at `pos` and dispatch to one of value handlers. `depth` is the number of lists and
/// dictionaries enclosing `pos`. Returns token with position right after it.
pub(super) fn next_token(
    data: &[u8],
    pos: usize,
    depth: usize,
    max_depth: usize,
) -> Result<(Token, usize), Error> {
    let byte = data.get(pos).ok_or(Error::DecodeUnexpectedEof(data.len()))?;

    match byte.into() {
        Delimiter::Int => {
            let (num, next) = parse_int(data, pos)?;
            Ok((Token::Value(BValue::Int(num)), next))
        }
        Delimiter::Num => {
            let (bytes, next) = parse_byte_str(data, pos)?;
            Ok((Token::Value(BValue::ByteStr(bytes)), next))
        }
        Delimiter::List if depth >= max_depth => Err(Error::DecodeNestingTooDeep(pos)),
        Delimiter::List => {
            let (list, next) = parse_list(data, pos, depth + 1, max_depth)?;
            Ok((Token::Value(BValue::List(list)), next))
        }
        Delimiter::Dict if depth >= max_depth => Err(Error::DecodeNestingTooDeep(pos)),
        Delimiter::Dict => {
            let (dict, next) = parse_dict(data, pos, depth + 1, max_depth)?;
            Ok((Token::Value(BValue::Dict(dict)), next))
        }
        Delimiter::End => Ok((Token::End, pos + 1)),
        Delimiter::Unknown => Err(Error::DecodeInvalidToken(pos)),
    }
}

/// Parse integer `i<digits>e` where `pos` points to 'i'. Digits may be preceded by one minus sign.
fn parse_int(data: &[u8], pos: usize) -> Result<(i64, usize), Error> {
    let start = pos + 1;
    let end = find(data, start, b'e')?;
    let literal = &data[start..end];

    let digits = literal.strip_prefix(b"-").unwrap_or(literal);
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(Error::DecodeMalformedInteger(pos));
    }

    let num = std::str::from_utf8(literal)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or(Error::DecodeMalformedInteger(pos))?;

    Ok((num, end + 1))
}

/// Parse string `<len>:<bytes>` where `pos` points to first digit of length.
fn parse_byte_str(data: &[u8], pos: usize) -> Result<(Vec<u8>, usize), Error> {
    let colon = find(data, pos, b':')?;
    let len_bytes = &data[pos..colon];

    if !len_bytes.iter().all(u8::is_ascii_digit) {
        return Err(Error::DecodeMalformedLength(pos));
    }

    let len = std::str::from_utf8(len_bytes)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or(Error::DecodeMalformedLength(pos))?;

    let start = colon + 1;
    if len > data.len() - start {
        return Err(Error::DecodeTruncatedString(start));
    }

    Ok((data[start..start + len].to_vec(), start + len))
}

fn parse_list(
    data: &[u8],
    pos: usize,
    depth: usize,
    max_depth: usize,
) -> Result<(Vec<BValue>, usize), Error> {
    let mut list = vec![];
    let mut pos = pos + 1;

    loop {
        match next_token(data, pos, depth, max_depth)? {
            (Token::End, next) => return Ok((list, next)),
            (Token::Value(value), next) => {
                list.push(value);
                pos = next;
            }
        }
    }
}

fn parse_dict(
    data: &[u8],
    pos: usize,
    depth: usize,
    max_depth: usize,
) -> Result<(BDict, usize), Error> {
    let mut dict = BDict::new();
    let mut pos = pos + 1;

    loop {
        let key = match next_token(data, pos, depth, max_depth)? {
            (Token::End, next) => return Ok((dict, next)),
            (Token::Value(BValue::ByteStr(key)), next) => {
                pos = next;
                key
            }
            (Token::Value(_), _) => return Err(Error::DecodeInvalidKeyType(pos)),
        };

        let (value, next) = next_value(data, pos, depth, max_depth)?;
        dict.push(key, value);
        pos = next;
    }
}

/// Position of the first `byte` at or after `start`.
fn find(data: &[u8], start: usize, byte: u8) -> Result<usize, Error> {
    data.get(start..)
        .and_then(|rest| rest.iter().position(|&b| b == byte))
        .map(|idx| start + idx)
        .ok_or(Error::DecodeUnexpectedEof(data.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_end_consumes_terminator() {
        assert_eq!(next_token(b"e", 0, 1, 4), Ok((Token::End, 1)));
    }

    #[test]
    fn int_cursor_after_terminator() {
        assert_eq!(parse_int(b"xi-12e", 1), Ok((-12, 6)));
    }

    #[test]
    fn int_leading_zeros_are_digits() {
        assert_eq!(parse_int(b"i007e", 0), Ok((7, 5)));
    }

    #[test]
    fn byte_str_cursor_after_payload() {
        assert_eq!(parse_byte_str(b"3:abcxyz", 0), Ok((b"abc".to_vec(), 5)));
    }

    #[test]
    fn find_out_of_range_start() {
        assert_eq!(find(b"ab", 5, b'e'), Err(Error::DecodeUnexpectedEof(2)));
    }

    #[test]
    fn failed_decode_keeps_cursor() {
        let mut decoder = BDecoder::new(&b"i1ei0"[..]);

        assert_eq!(decoder.decode(), Ok(BValue::Int(1)));
        assert_eq!(decoder.decode(), Err(Error::DecodeUnexpectedEof(5)));
        assert_eq!(decoder.position(), 3);
        assert_eq!(decoder.remaining(), b"i0");
    }
}
