use crate::constant::HASH_SIZE;

/// Build ordered [`BDict`](crate::BDict) from `key => value` pairs, keys are byte string literals.
#[macro_export]
macro_rules! dict {
    ($( $key: expr => $val: expr ),* $(,)?) => {{
         #[allow(unused_mut)]
         let mut dict = $crate::BDict::new();
         $( dict.push($key.to_vec(), $val); )*
         dict
    }}
}

pub fn hash_to_string(hash: &[u8; HASH_SIZE]) -> String {
    hash.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<String>()
}
