//! Peer ID utilities.

use crate::constant::{PEER_ID_PREFIX, PEER_ID_SIZE};
use rand::Rng;

/// Generate random peer ID: client prefix followed by random decimal digits.
///
/// # Example
/// ```
/// use rbencode::peer_id;
/// let id = peer_id::generate();
/// assert!(id.starts_with(b"-PC0001-"));
/// ```
pub fn generate() -> [u8; PEER_ID_SIZE] {
    let mut peer_id: [u8; PEER_ID_SIZE] = [0; PEER_ID_SIZE];
    peer_id[..PEER_ID_PREFIX.len()].copy_from_slice(PEER_ID_PREFIX);

    let mut rng = rand::thread_rng();
    for byte in peer_id[PEER_ID_PREFIX.len()..].iter_mut() {
        *byte = b'0' + rng.gen_range(0..10);
    }

    peer_id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_and_digits() {
        let id = generate();

        assert_eq!(&id[..8], b"-PC0001-");
        assert!(id[8..].iter().all(u8::is_ascii_digit));
    }
}
