use crate::constant::HASH_SIZE;
use crate::{BDecoder, BDict, BValue, Error, RawFinder};
use std::fs;
use std::path::Path;

/// Torrent descriptor (metainfo file) described in
/// [BEP3](https://www.bittorrent.org/beps/bep_0003.html#metainfo-files).
#[derive(PartialEq, Clone, Debug)]
pub struct Metainfo {
    announce: String,
    name: String,
    piece_length: u64,
    pieces: Vec<[u8; HASH_SIZE]>,
    files: Vec<File>,
    info_hash: [u8; HASH_SIZE],
}

#[derive(PartialEq, Clone, Debug)]
pub struct File {
    pub length: u64,
    pub path: String,
}

impl Metainfo {
    pub fn from_file(path: &Path) -> Result<Metainfo, Error> {
        match &fs::read(path) {
            Ok(val) => Self::from_bencode(val),
            Err(_) => Err(Error::MetaFileNotFound(path.display().to_string())),
        }
    }

    pub fn from_bencode(data: &[u8]) -> Result<Metainfo, Error> {
        match BDecoder::from_single(data)? {
            BValue::Dict(dict) => Self::parse(data, &dict),
            _ => Err(Error::MetaIncorrectOrMissing("metainfo")),
        }
    }

    fn parse(data: &[u8], dict: &BDict) -> Result<Metainfo, Error> {
        let info = Self::find_info(dict)?;
        let length = Self::find_length(info)?;
        let multi_files = Self::find_files(info)?;

        let name = Self::find_name(dict)?;
        let files = match (length, multi_files) {
            (Some(_), Some(_)) => return Err(Error::MetaLenAndFilesConflict),
            (None, None) => return Err(Error::MetaLenOrFilesMissing),
            (Some(length), None) => vec![File {
                length,
                path: name.clone(),
            }],
            (None, Some(multi_files)) => multi_files,
        };

        let metainfo = Metainfo {
            announce: Self::find_announce(dict)?,
            name,
            piece_length: Self::find_piece_length(dict)?,
            pieces: Self::find_pieces(dict)?,
            files,
            info_hash: Self::calculate_hash(data)?,
        };

        Ok(metainfo)
    }

    fn find_info(dict: &BDict) -> Result<&BDict, Error> {
        match dict.get(b"info") {
            Some(BValue::Dict(info)) => Ok(info),
            _ => Err(Error::MetaIncorrectOrMissing("info")),
        }
    }

    pub fn find_announce(dict: &BDict) -> Result<String, Error> {
        match dict.get(b"announce") {
            Some(BValue::ByteStr(val)) => {
                String::from_utf8(val.to_vec()).or(Err(Error::MetaInvalidUtf8("announce")))
            }
            _ => Err(Error::MetaIncorrectOrMissing("announce")),
        }
    }

    pub fn find_name(dict: &BDict) -> Result<String, Error> {
        match Self::find_info(dict)?.get(b"name") {
            Some(BValue::ByteStr(val)) => {
                String::from_utf8(val.to_vec()).or(Err(Error::MetaInvalidUtf8("name")))
            }
            _ => Err(Error::MetaIncorrectOrMissing("name")),
        }
    }

    pub fn find_piece_length(dict: &BDict) -> Result<u64, Error> {
        match Self::find_info(dict)?.get(b"piece length") {
            Some(BValue::Int(length)) if *length > 0 => {
                u64::try_from(*length).or(Err(Error::MetaIncorrectOrMissing("piece length")))
            }
            _ => Err(Error::MetaIncorrectOrMissing("piece length")),
        }
    }

    pub fn find_pieces(dict: &BDict) -> Result<Vec<[u8; HASH_SIZE]>, Error> {
        match Self::find_info(dict)?.get(b"pieces") {
            Some(BValue::ByteStr(pieces)) => {
                if pieces.len() % HASH_SIZE != 0 {
                    return Err(Error::MetaNotDivisible("pieces"));
                }
                pieces
                    .chunks_exact(HASH_SIZE)
                    .map(|chunk| {
                        chunk
                            .try_into()
                            .or(Err(Error::MetaNotDivisible("pieces")))
                    })
                    .collect()
            }
            _ => Err(Error::MetaIncorrectOrMissing("pieces")),
        }
    }

    fn find_length(info: &BDict) -> Result<Option<u64>, Error> {
        match info.get(b"length") {
            None => Ok(None),
            Some(BValue::Int(length)) => u64::try_from(*length)
                .map(Some)
                .or(Err(Error::MetaIncorrectOrMissing("length"))),
            Some(_) => Err(Error::MetaIncorrectOrMissing("length")),
        }
    }

    fn find_files(info: &BDict) -> Result<Option<Vec<File>>, Error> {
        match info.get(b"files") {
            None => Ok(None),
            Some(BValue::List(list)) => Self::file_list(list).map(Some),
            Some(_) => Err(Error::MetaIncorrectOrMissing("files")),
        }
    }

    /// Every entry must be a dictionary with non-negative `length` and non-empty `path` list of
    /// UTF-8 components.
    fn file_list(list: &[BValue]) -> Result<Vec<File>, Error> {
        list.iter().map(Self::file_entry).collect()
    }

    fn file_entry(elem: &BValue) -> Result<File, Error> {
        let dict = elem
            .as_dict()
            .ok_or(Error::MetaIncorrectOrMissing("files"))?;

        let length = match dict.get(b"length") {
            Some(BValue::Int(length)) => {
                u64::try_from(*length).or(Err(Error::MetaIncorrectOrMissing("files")))?
            }
            _ => return Err(Error::MetaIncorrectOrMissing("files")),
        };

        let parts = match dict.get(b"path") {
            Some(BValue::List(path)) if !path.is_empty() => path
                .iter()
                .map(|p| match p {
                    BValue::ByteStr(_) => p.as_str().ok_or(Error::MetaInvalidUtf8("path")),
                    _ => Err(Error::MetaIncorrectOrMissing("files")),
                })
                .collect::<Result<Vec<&str>, Error>>()?,
            _ => return Err(Error::MetaIncorrectOrMissing("files")),
        };

        Ok(File {
            length,
            path: parts.join("/"),
        })
    }

    fn calculate_hash(data: &[u8]) -> Result<[u8; HASH_SIZE], Error> {
        match RawFinder::find_last(b"info", data)? {
            Some(info) => {
                let mut m = sha1_smol::Sha1::new();
                m.update(info);
                Ok(m.digest().bytes())
            }
            None => Err(Error::MetaIncorrectOrMissing("info")),
        }
    }

    pub fn tracker_url(&self) -> &String {
        &self.announce
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn piece_length(&self) -> u64 {
        self.piece_length
    }

    pub fn pieces_num(&self) -> usize {
        self.pieces.len()
    }

    pub fn piece(&self, index: usize) -> Option<&[u8; HASH_SIZE]> {
        self.pieces.get(index)
    }

    pub fn files(&self) -> &[File] {
        &self.files
    }

    pub fn total_length(&self) -> u64 {
        self.files.iter().map(|f| f.length).sum()
    }

    pub fn info_hash(&self) -> &[u8; HASH_SIZE] {
        &self.info_hash
    }
}
