use crate::error::{BiniouResult, BiniouError};
use std::collections::HashMap;

/// The 31 bit hash of a field or variant name.
///
/// The accumulator is `acc = 223 * acc + byte` over the UTF-8 bytes of the name,
/// masked to the low 31 bits. Bit 30 is the sign bit of the 31 bit space, so hashes
/// with it set come out negative in the returned `i32`. The empty string hashes to 0.
///
/// This hash is part of the wire contract and must never change.
/// ```
/// # use biniou::hash_name;
/// assert_eq!(hash_name(""), 0);
/// assert_eq!(hash_name("abc"), 0x0049_F062);
/// ```
pub fn hash_name(name: &str) -> i32 {
    let mut acc: u32 = 0;
    for byte in name.bytes() {
        acc = acc.wrapping_mul(223).wrapping_add(u32::from(byte));
    }
    extend_sign(acc & 0x7fff_ffff)
}

// Sign-extend from bit 30, the sign bit of the 31 bit hash space. On-wire bytes
// are unaffected; only in-memory comparisons see the extension.
pub(crate) fn extend_sign(hash: u32) -> i32 {
    if hash & 0x4000_0000 != 0 {
        (hash | 0x8000_0000) as i32
    } else {
        hash as i32
    }
}

#[derive(Debug, Default)]
/// A reverse lookup from field/variant hashes to the names that produced them.
///
/// Decoders accept one of these to report readable names; without one (or for a hash
/// that was never registered) they fall back to a `#` followed by the hash as eight
/// lowercase hex digits.
///
/// ```
/// # use biniou::Unhash;
/// let unhash = Unhash::build(vec!["name", "id"]).unwrap();
/// assert_eq!(unhash.resolve(biniou::hash_name("id")), "id");
/// assert_eq!(unhash.resolve(0x2a), "#0000002a");
/// ```
pub struct Unhash {
    names: HashMap<i32, String>
}

impl Unhash {
    /// Create an empty table. Every hash resolves to its hex placeholder.
    pub fn new() -> Unhash {
        Unhash { names: HashMap::new() }
    }

    /// Register a list of names, failing if two distinct names collide on the hash.
    pub fn build<I>(names: I) -> BiniouResult<Unhash> where I: IntoIterator, I::Item: AsRef<str> {
        let mut unhash = Unhash::new();
        for name in names {
            unhash.register(name.as_ref())?;
        }
        Ok(unhash)
    }

    /// Register a single name. Registering the same name twice is fine; a second,
    /// different name with the same hash is a registration failure naming both.
    pub fn register(&mut self, name: &str) -> BiniouResult<i32> {
        let hash = hash_name(name);
        match self.names.get(&hash) {
            Some(existing) if existing != name => Err(BiniouError::HashCollision {
                hash,
                existing: existing.clone(),
                inserted: name.to_string()
            }),
            Some(_) => Ok(hash),
            None => {
                self.names.insert(hash, name.to_string());
                Ok(hash)
            }
        }
    }

    /// The name registered for a hash, or its `#`-hex placeholder. The placeholder
    /// prints the hash as a 32 bit word, so sign-extended hashes keep their top bits.
    pub fn resolve(&self, hash: i32) -> String {
        match self.names.get(&hash) {
            Some(name) => name.clone(),
            None => format!("#{:08x}", hash as u32)
        }
    }
}
