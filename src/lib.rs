//! Strict [Bencode](https://en.wikipedia.org/wiki/Bencode) decoder, with torrent descriptor
//! (metainfo) and HTTP tracker helpers built on top of it.
//!
//! ```
//! use rbencode::{dict, BDecoder, BValue};
//!
//! let val = BDecoder::new(&b"d3:catl3:Tom4:Jacke3:agei8ee"[..]).decode().unwrap();
//! assert_eq!(
//!     val,
//!     BValue::Dict(dict![
//!         b"cat" => BValue::List(vec![
//!             BValue::ByteStr(b"Tom".to_vec()),
//!             BValue::ByteStr(b"Jack".to_vec())
//!         ]),
//!         b"age" => BValue::Int(8)
//!     ])
//! );
//! ```
//!
//! Lookahead classification stays an implementation detail of the decoder:
//!
//! ```compile_fail
//! use rbencode::Delimiter;
//! ```

mod bcodec;
pub mod constant;
mod error;
mod metainfo;
pub mod peer_id;
mod tracker_client;
mod tracker_resp;
pub mod utils;

pub use crate::error::Error;

pub use crate::bcodec::bdecoder::BDecoder;
pub use crate::bcodec::bvalue::{BDict, BValue};
pub use crate::bcodec::raw_finder::RawFinder;

pub use crate::metainfo::File;
pub use crate::metainfo::Metainfo;

pub use crate::tracker_client::TrackerClient;
pub use crate::tracker_resp::TrackerResp;
