//! Shard routing
//!
//! The keyspace is split into sixteen shards arranged on a ring, one per
//! hex digit `0`..`9`, `a`..`f`. A writer's shard is the leading hex digit
//! of its public key. Writes go to that shard and to its successor on the
//! ring; reads go to the owning shard only.
//!
//! Shard `d` is served from `https://s<d>.u00.io`.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::crypto::{Address, PublicKey};

/// Base domain of the storage fleet
pub const BASE_DOMAIN: &str = "u00.io";

const SYMBOLS: &[u8; Shard::COUNT] = b"0123456789abcdef";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShardError {
    #[error("empty shard domain")]
    Empty,
    #[error("unknown shard domain: {0:?}")]
    Unknown(String),
}

/// One of the sixteen shards. Always in range, so every shard has a host
/// and a successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Shard(u8);

impl Shard {
    pub const COUNT: usize = 16;

    /// The shard owning values written by `public_key`: the high nibble of
    /// its first byte.
    pub fn of(public_key: &PublicKey) -> Self {
        Shard(public_key.as_bytes()[0] >> 4)
    }

    /// Successor on the ring; `f` wraps around to `0`.
    pub fn next(self) -> Self {
        Shard((self.0 + 1) % Self::COUNT as u8)
    }

    /// The shards a write by `public_key` is replicated to, owner first.
    pub fn write_targets(public_key: &PublicKey) -> [Shard; 2] {
        let owner = Self::of(public_key);
        [owner, owner.next()]
    }

    pub fn all() -> impl Iterator<Item = Shard> {
        (0..Self::COUNT as u8).map(Shard)
    }

    /// Lowercase hex digits only.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '0'..='9' => Some(Shard(symbol as u8 - b'0')),
            'a'..='f' => Some(Shard(symbol as u8 - b'a' + 10)),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        SYMBOLS[self.0 as usize] as char
    }

    pub fn host(self) -> String {
        format!("s{}.{}", self.symbol(), BASE_DOMAIN)
    }

    /// `https://s<d>.u00.io/set`
    pub fn set_url(self) -> Result<Url, url::ParseError> {
        Url::parse(&format!("https://{}/set", self.host()))
    }

    /// `https://s<d>.u00.io/get/<address>`
    pub fn get_url(self, address: &Address) -> Result<Url, url::ParseError> {
        Url::parse(&format!("https://{}/get/{}", self.host(), address))
    }
}

impl fmt::Display for Shard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Shard {
    type Err = ShardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(ShardError::Empty),
            (Some(symbol), None) => {
                Shard::from_symbol(symbol).ok_or_else(|| ShardError::Unknown(s.to_string()))
            }
            _ => Err(ShardError::Unknown(s.to_string())),
        }
    }
}

/// Successor of a shard given in text form. `None` means the input is not
/// a routable shard and no request should be made for it.
pub fn next_shard(domain: &str) -> Option<Shard> {
    domain.parse::<Shard>().ok().map(Shard::next)
}
