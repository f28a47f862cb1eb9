//! Record identifiers: 24 lowercase hex characters, 4 timestamp bytes followed
//! by 8 random bytes. Foreign ids arriving over the wire are format-checked
//! with [`is_well_formed`] before any lookup.

use chrono::Utc;
use rand::RngCore;
use std::fmt::Write;

pub const RECORD_ID_LEN: usize = 24;

pub fn generate() -> String {
    let mut bytes = [0u8; 12];
    let stamp = Utc::now().timestamp().max(0) as u32;
    bytes[..4].copy_from_slice(&stamp.to_be_bytes());
    rand::thread_rng().fill_bytes(&mut bytes[4..]);

    let mut id = String::with_capacity(RECORD_ID_LEN);
    for byte in bytes {
        // writing to a String cannot fail
        let _ = write!(id, "{byte:02x}");
    }
    id
}

pub fn is_well_formed(id: &str) -> bool {
    id.len() == RECORD_ID_LEN && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
