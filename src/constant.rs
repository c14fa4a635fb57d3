/// SHA1 hash size
pub const HASH_SIZE: usize = 20;
/// Peer ID size
pub const PEER_ID_SIZE: usize = 20;
/// Client prefix of generated peer ID
pub const PEER_ID_PREFIX: &[u8] = b"-PC0001-";
/// Default listening port announced to tracker
pub const PORT: u16 = 6889;
/// Compact peer entry: 4 bytes of IPv4 address and 2 bytes of port
pub const COMPACT_PEER_SIZE: usize = 6;

/// Maximal nesting of lists/dictionaries accepted by decoder
pub const MAX_NESTING_DEPTH: usize = 64;
