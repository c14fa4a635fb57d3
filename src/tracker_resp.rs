use crate::constant::COMPACT_PEER_SIZE;
use crate::{BDecoder, BDict, BValue, Error};
use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};

/// Tracker response for announce request
/// ([BEP3](https://www.bittorrent.org/beps/bep_0003.html#trackers)).
#[derive(PartialEq, Clone, Debug)]
pub struct TrackerResp {
    /// Seconds to wait between regular requests
    pub interval: u64,
    /// Number of seeders
    pub complete: u64,
    /// Number of leechers
    pub incomplete: u64,
    pub peers: Vec<SocketAddrV4>,
}

impl TrackerResp {
    /// Parse tracker response. Body must hold exactly one value. Decode errors are returned as
    /// they are, a `failure reason` sent by tracker ends with [`Error::TrackerRespFail`].
    ///
    /// # Example
    /// ```
    /// use rbencode::TrackerResp;
    /// let resp = TrackerResp::from_bencode(b"d8:intervali900e5:peers6:\x7f\x00\x00\x01\x1a\xe1e").unwrap();
    ///
    /// assert_eq!(resp.interval, 900);
    /// assert_eq!(resp.peers[0].to_string(), "127.0.0.1:6881");
    /// ```
    pub fn from_bencode(data: &[u8]) -> Result<TrackerResp, Error> {
        match BDecoder::from_single(data)? {
            BValue::Dict(dict) => Self::parse(&dict),
            _ => Err(Error::TrackerIncorrectOrMissing("response")),
        }
    }

    fn parse(dict: &BDict) -> Result<TrackerResp, Error> {
        if let Some(reason) = Self::find_failure_reason(dict) {
            tracing::warn!(%reason, "tracker reported failure");
            return Err(Error::TrackerRespFail(reason));
        }

        let response = TrackerResp {
            interval: Self::find_counter(dict, "interval")?,
            complete: Self::find_counter(dict, "complete")?,
            incomplete: Self::find_counter(dict, "incomplete")?,
            peers: Self::find_peers(dict)?,
        };

        Ok(response)
    }

    fn find_failure_reason(dict: &BDict) -> Option<String> {
        dict.get(b"failure reason")
            .and_then(BValue::as_byte_str)
            .map(|reason| String::from_utf8_lossy(reason).into_owned())
    }

    /// Non-negative integer value, 0 when absent.
    fn find_counter(dict: &BDict, key: &'static str) -> Result<u64, Error> {
        match dict.get(key.as_bytes()) {
            None => Ok(0),
            Some(BValue::Int(val)) => {
                u64::try_from(*val).or(Err(Error::TrackerIncorrectOrMissing(key)))
            }
            Some(_) => Err(Error::TrackerIncorrectOrMissing(key)),
        }
    }

    fn find_peers(dict: &BDict) -> Result<Vec<SocketAddrV4>, Error> {
        match dict.get(b"peers") {
            Some(BValue::ByteStr(peers)) => {
                tracing::debug!("binary model peers returned by tracker");
                Self::compact_peers(peers)
            }
            Some(BValue::List(_)) => {
                tracing::debug!("dictionary model peers returned by tracker");
                Err(Error::TrackerUnsupportedPeerEncoding)
            }
            _ => Err(Error::TrackerIncorrectOrMissing("peers")),
        }
    }

    /// Split compact peer string into 6-byte chunks: 4 bytes of IPv4 address and 2 bytes of
    /// big-endian port.
    fn compact_peers(peers: &[u8]) -> Result<Vec<SocketAddrV4>, Error> {
        if peers.len() % COMPACT_PEER_SIZE != 0 {
            return Err(Error::TrackerCompactPeers(peers.len()));
        }

        Ok(peers
            .chunks_exact(COMPACT_PEER_SIZE)
            .map(|p| {
                SocketAddrV4::new(
                    Ipv4Addr::new(p[0], p[1], p[2], p[3]),
                    u16::from_be_bytes([p[4], p[5]]),
                )
            })
            .collect())
    }
}

impl fmt::Display for TrackerResp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let peers: Vec<String> = self.peers.iter().map(|p| p.ip().to_string()).collect();

        writeln!(f, "incomplete: {}", self.incomplete)?;
        writeln!(f, "complete: {}", self.complete)?;
        writeln!(f, "interval: {}", self.interval)?;
        writeln!(f, "peers: {}", peers.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_peers_port_big_endian() {
        assert_eq!(
            TrackerResp::compact_peers(&[10, 0, 0, 1, 0x1A, 0xE1, 192, 168, 1, 2, 0x00, 0x50]),
            Ok(vec![
                SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 1), 6881),
                SocketAddrV4::new(Ipv4Addr::new(192, 168, 1, 2), 80),
            ])
        );
    }

    #[test]
    fn compact_peers_empty() {
        assert_eq!(TrackerResp::compact_peers(&[]), Ok(vec![]));
    }

    #[test]
    fn display() {
        let resp = TrackerResp {
            interval: 900,
            complete: 2,
            incomplete: 1,
            peers: vec![
                SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 1), 6881),
                SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 2), 6881),
            ],
        };

        assert_eq!(
            resp.to_string(),
            "incomplete: 1\ncomplete: 2\ninterval: 900\npeers: 10.0.0.1, 10.0.0.2\n"
        );
    }
}
