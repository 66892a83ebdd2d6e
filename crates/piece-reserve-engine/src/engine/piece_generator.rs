use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Piece, PieceId, PieceKind};

/// Creates new pieces with a random kind and the next free id.
///
/// Kinds are drawn uniformly from [`PieceKind::ALL`] with a PCG32 generator;
/// ids start at 0 and increase by one for every generated piece.
///
/// # Example
///
/// ```
/// use piece_reserve_engine::{PieceGenerator, PieceId};
///
/// let mut generator = PieceGenerator::new();
///
/// let first = generator.generate();
/// let second = generator.generate();
///
/// assert_eq!(first.id(), PieceId::new(0));
/// assert_eq!(second.id(), PieceId::new(1));
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
    seed: PieceSeed,
    next_id: PieceId,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator. Using the same seed produces the same sequence of piece kinds,
/// so a session can be replayed.
///
/// The textual form (used by `Display`, `FromStr` and serde) is a
/// 32-character hex string.
///
/// # Example
///
/// ```
/// use piece_reserve_engine::{PieceGenerator, PieceSeed};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
///
/// let mut a = PieceGenerator::with_seed(seed);
/// let mut b = PieceGenerator::with_seed(seed);
/// assert_eq!(a.generate(), b.generate());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid hex: expected 32 characters, got {len}")]
    InvalidLength { len: usize },
    #[display("invalid hex: unexpected character {found:?}")]
    InvalidCharacter { found: char },
}

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num = u128::from_be_bytes(self.0);
        write!(f, "{num:032x}")
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError::InvalidLength { len: s.len() });
        }
        let num = s.chars().try_fold(0_u128, |acc, c| {
            let digit = c
                .to_digit(16)
                .ok_or(ParseSeedError::InvalidCharacter { found: c })?;
            Ok::<_, ParseSeedError>((acc << 4) | u128::from(digit))
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values using the standard random distribution.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl PieceGenerator {
    /// Creates a new generator with a random seed.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            seed,
            next_id: PieceId::default(),
        }
    }

    /// Returns the seed this generator was created with.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    /// Returns the id the next generated piece will receive.
    #[must_use]
    pub fn next_id(&self) -> PieceId {
        self.next_id
    }

    /// Generates a piece with a uniformly random kind and the next id.
    pub fn generate(&mut self) -> Piece {
        let kind: PieceKind = self.rng.random();
        Piece::new(kind, self.next_id.post_increment())
    }
}
