use crate::bcodec::bdecoder::{next_token, next_value, Token};
use crate::bcodec::bvalue::BValue;
use crate::constant::MAX_NESTING_DEPTH;
use crate::Error;

/// Finder looking for dictionary key in [bencoded](https://en.wikipedia.org/wiki/Bencode) string
/// and returning value exactly as it is encoded (e.g. to calculate info hash).
pub struct RawFinder {}

impl RawFinder {
    /// Find first value for `key` in top level dictionary. Value is returned in raw format, as a
    /// slice of `arg`. Returns `None` when top level value isn't a dictionary or the key is absent.
    ///
    /// # Example
    /// ```
    /// use rbencode::RawFinder;
    ///
    /// let value = RawFinder::find_first(b"k", b"d1:kli10ei20eee").unwrap();
    /// assert_eq!(value, Some(&b"li10ei20ee"[..]));
    /// ```
    pub fn find_first<'a>(key: &[u8], arg: &'a [u8]) -> Result<Option<&'a [u8]>, Error> {
        Self::walk(key, arg, true)
    }

    /// Find last value for `key` in top level dictionary, the one [`BDict::get`] returns after
    /// decoding. Whole dictionary is scanned.
    ///
    /// [`BDict::get`]: crate::BDict::get
    ///
    /// # Example
    /// ```
    /// use rbencode::RawFinder;
    ///
    /// let value = RawFinder::find_last(b"k", b"d1:ki1e1:ki2ee").unwrap();
    /// assert_eq!(value, Some(&b"i2e"[..]));
    /// ```
    pub fn find_last<'a>(key: &[u8], arg: &'a [u8]) -> Result<Option<&'a [u8]>, Error> {
        Self::walk(key, arg, false)
    }

    fn walk<'a>(key: &[u8], arg: &'a [u8], first: bool) -> Result<Option<&'a [u8]>, Error> {
        match arg.first() {
            None => return Err(Error::DecodeEmptyInput),
            Some(b'd') => (),
            Some(_) => return Ok(None),
        }

        let mut found = None;
        let mut pos = 1;
        loop {
            let k = match next_token(arg, pos, 1, MAX_NESTING_DEPTH)? {
                (Token::End, _) => return Ok(found),
                (Token::Value(BValue::ByteStr(k)), next) => {
                    pos = next;
                    k
                }
                (Token::Value(_), _) => return Err(Error::DecodeInvalidKeyType(pos)),
            };

            let (_, next) = next_value(arg, pos, 1, MAX_NESTING_DEPTH)?;
            if k == key {
                found = Some(&arg[pos..next]);
                if first {
                    return Ok(found);
                }
            }
            pos = next;
        }
    }
}
