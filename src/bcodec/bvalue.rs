use std::fmt;
use std::slice::Iter;

/// Classification of lookahead byte, it decides which value will be decoded next.
#[derive(PartialEq, Clone, Copy, Debug)]
pub(crate) enum Delimiter {
    Num,
    Int,
    List,
    Dict,
    End,
    Unknown,
}

impl From<&u8> for Delimiter {
    fn from(byte: &u8) -> Self {
        match byte {
            b'0'..=b'9' => Delimiter::Num,
            b'i' => Delimiter::Int,
            b'l' => Delimiter::List,
            b'd' => Delimiter::Dict,
            b'e' => Delimiter::End,
            _ => Delimiter::Unknown,
        }
    }
}

type Key = Vec<u8>;

/// [Bencode](https://en.wikipedia.org/wiki/Bencode) representation. [BEP3](https://www.bittorrent.org/beps/bep_0003.html#bencoding)
/// specify four basic types: integer, string (but can be any byte array), list and dictionary.
#[derive(PartialEq, Clone, Debug)]
pub enum BValue {
    /// Integer representation. [BEP3](https://www.bittorrent.org/beps/bep_0003.html#bencoding) doesn't
    /// specify max/min limit, so in this implementation i64 was used, and should be sufficient.
    Int(i64),
    /// String representation, more precisely this can be any u8 array.
    ByteStr(Vec<u8>),
    /// List of `BValue` values
    List(Vec<BValue>),
    /// Dictionary with byte string keys, in order of appearance.
    Dict(BDict),
}

impl BValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            BValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_byte_str(&self) -> Option<&[u8]> {
        match self {
            BValue::ByteStr(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    /// Byte string as UTF-8 text. `None` if value is not a string or bytes are not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            BValue::ByteStr(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[BValue]> {
        match self {
            BValue::List(l) => Some(l.as_slice()),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&BDict> {
        match self {
            BValue::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Lookup in dictionary value. For any other variant returns `None`.
    ///
    /// # Example
    /// ```
    /// use rbencode::BDecoder;
    /// let val = BDecoder::new(&b"d3:cow3:mooe"[..]).decode().unwrap();
    ///
    /// assert_eq!(val.get(b"cow").and_then(|v| v.as_str()), Some("moo"));
    /// ```
    pub fn get(&self, key: &[u8]) -> Option<&BValue> {
        self.as_dict().and_then(|d| d.get(key))
    }
}

/// Dictionary preserving order of keys exactly as they were encountered.
///
/// Decoder never sorts nor deduplicates keys. When the same key occurs more than once, lookup
/// returns the last occurrence (last key wins), while [`BDict::iter`] still yields all pairs.
#[derive(PartialEq, Clone, Debug, Default)]
pub struct BDict {
    entries: Vec<(Key, BValue)>,
}

impl BDict {
    pub fn new() -> BDict {
        BDict { entries: vec![] }
    }

    pub fn push(&mut self, key: Key, value: BValue) {
        self.entries.push((key, value));
    }

    pub fn get(&self, key: &[u8]) -> Option<&BValue> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k.as_slice() == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.iter().map(|(k, _)| k.as_slice())
    }

    pub fn iter(&self) -> Iter<'_, (Key, BValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_duplicate_keys(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .any(|(idx, (key, _))| self.entries[..idx].iter().any(|(k, _)| k == key))
    }
}

impl FromIterator<(Key, BValue)> for BDict {
    fn from_iter<T: IntoIterator<Item = (Key, BValue)>>(iter: T) -> Self {
        BDict {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for BDict {
    type Item = (Key, BValue);
    type IntoIter = std::vec::IntoIter<(Key, BValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a BDict {
    type Item = &'a (Key, BValue);
    type IntoIter = Iter<'a, (Key, BValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn fmt_byte_str(bytes: &[u8], f: &mut fmt::Formatter) -> fmt::Result {
    match std::str::from_utf8(bytes) {
        Ok(s) => write!(f, "{:?}", s),
        Err(_) => {
            write!(f, "0x")?;
            bytes.iter().try_for_each(|b| write!(f, "{:02x}", b))
        }
    }
}

impl fmt::Display for BValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BValue::Int(i) => write!(f, "{}", i),
            BValue::ByteStr(b) => fmt_byte_str(b, f),
            BValue::List(list) => {
                write!(f, "[")?;
                for (idx, value) in list.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
            BValue::Dict(dict) => {
                write!(f, "{{")?;
                for (idx, (key, value)) in dict.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    fmt_byte_str(key, f)?;
                    write!(f, ": {}", value)?;
                }
                write!(f, "}}")
            }
        }
    }
}
