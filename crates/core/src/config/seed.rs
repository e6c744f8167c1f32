use derive_more::Display;
use fnv::FnvHasher;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::{de::Visitor, Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt,
    hash::{Hash, Hasher},
};

/// Seed for every randomized step of world gen, including the per-layer noise
/// seeds.
///
/// Deserialization accepts:
/// - A non-negative integer that fits in `u64`
/// - A string that parses as a `u64`, which is treated the same as the int
/// - Any other string, which is kept as text and hashed when used
///
/// Anything else is an error. The seed is always serialized as a **string**,
/// since JSON and TOML can't reliably represent the full `u64` range. Either
/// form deserializes back to the same seed.
#[derive(Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Seed {
    Int(u64),
    /// Hashed with FNV-1a before use
    Text(String),
}

impl Seed {
    /// The numeric form of this seed
    pub fn to_u64(&self) -> u64 {
        match self {
            Self::Int(seed) => *seed,
            Self::Text(text) => {
                let mut hasher = FnvHasher::default();
                text.hash(&mut hasher);
                hasher.finish()
            }
        }
    }

    /// A fresh RNG seeded from this seed. Every call starts over from the
    /// same state.
    pub fn rng(&self) -> Pcg64 {
        Pcg64::seed_from_u64(self.to_u64())
    }
}

impl From<u64> for Seed {
    fn from(seed: u64) -> Self {
        Self::Int(seed)
    }
}

impl From<&str> for Seed {
    fn from(text: &str) -> Self {
        text.parse()
            .map(Self::Int)
            .unwrap_or_else(|_| Self::Text(text.into()))
    }
}

impl Serialize for Seed {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        // Could be an int or a string, so no type hint
        deserializer.deserialize_any(SeedVisitor)
    }
}

struct SeedVisitor;

impl<'de> Visitor<'de> for SeedVisitor {
    type Value = Seed;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a non-negative integer or string")
    }

    // Serde forwards all the narrower integer types to these two

    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Seed, E> {
        Ok(Seed::Int(value))
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Seed, E> {
        u64::try_from(value).map(Seed::Int).map_err(|_| {
            E::custom(format!("seed cannot be negative: {}", value))
        })
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Seed, E> {
        Ok(value.into())
    }
}
