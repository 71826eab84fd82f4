//! HIP-15 address checksums.
//!
//! A checksum is five lowercase letters appended to `shard.realm.num`
//! (`0.0.123-vfmkw`) that binds the address to one ledger. The same address
//! has a different checksum on every network, so a mistyped address or an
//! address pasted from the wrong network is caught before any lookup.

use crate::models::{EntityId, LedgerId};

const P3: u64 = 26 * 26 * 26;
const P5: u64 = 26 * 26 * 26 * 26 * 26;
const WEIGHT: u64 = 31;
const MULTIPLIER: u64 = 1_000_003;
const LEDGER_ID_PADDING: usize = 6;
const CHECKSUM_LEN: usize = 5;

/// Computes the checksum of `address` (`shard.realm.num`) for a ledger.
///
/// Every intermediate value is reduced modulo 26^3 or 26^5, so the address
/// can have components of any magnitude.
pub fn compute(ledger_id: &LedgerId, address: &str) -> String {
    let digits: Vec<u64> = address
        .chars()
        .map(|c| match c {
            '.' => 10,
            c => c.to_digit(10).map(u64::from).unwrap_or(0),
        })
        .collect();

    let mut sd0 = 0u64;
    let mut sd1 = 0u64;
    let mut sd = 0u64;
    for (i, d) in digits.iter().enumerate() {
        sd = (sd * WEIGHT + d) % P3;
        if i % 2 == 0 {
            sd0 = (sd0 + d) % 11;
        } else {
            sd1 = (sd1 + d) % 11;
        }
    }

    let padding = std::iter::repeat(0u8).take(LEDGER_ID_PADDING);
    let sh = ledger_id
        .as_bytes()
        .iter()
        .copied()
        .chain(padding)
        .fold(0u64, |sh, b| (sh * WEIGHT + u64::from(b)) % P5);

    let len = digits.len() as u64;
    let c = ((((len % 5) * 11 + sd0) * 11 + sd1) * P3 + sd + sh) % P5;
    let mut cp = (c * MULTIPLIER) % P5;

    let mut letters = [b'a'; CHECKSUM_LEN];
    for slot in letters.iter_mut().rev() {
        *slot = b'a' + (cp % 26) as u8;
        cp /= 26;
    }
    letters.iter().map(|&b| b as char).collect()
}

/// Returns true when `checksum` is the checksum of `address` on this ledger.
pub fn validate(address: &str, checksum: &str, ledger_id: &LedgerId) -> bool {
    checksum.len() == CHECKSUM_LEN && compute(ledger_id, address) == checksum
}

/// Renders an entity id with its checksum suffix, e.g. `0.0.123-vfmkw`.
pub fn format_with_checksum(id: &EntityId, ledger_id: &LedgerId) -> String {
    let address = id.to_string();
    let checksum = compute(ledger_id, &address);
    format!("{}-{}", address, checksum)
}
