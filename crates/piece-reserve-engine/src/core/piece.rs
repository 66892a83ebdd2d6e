use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// A piece waiting in the queue or kept in the reserve stack.
///
/// Pieces are plain values: a kind and an id that is unique for the lifetime
/// of the process. Only [`PieceGenerator`](crate::PieceGenerator) hands out
/// new ids.
///
/// # Example
///
/// ```
/// use piece_reserve_engine::{Piece, PieceId, PieceKind};
///
/// let piece = Piece::new(PieceKind::T, PieceId::new(7));
/// assert_eq!(piece.to_string(), "[T 7]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("[{kind} {id}]")]
pub struct Piece {
    kind: PieceKind,
    id: PieceId,
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "kind#id" (e.g., "T#7")
        let s = format!("{}#{}", self.kind.as_char(), self.id.0);
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let (kind_str, id_str) = s.split_once('#').ok_or_else(|| {
            serde::de::Error::custom(format!("missing '#' in format 'kind#id', got '{s}'"))
        })?;

        let mut kind_chars = kind_str.chars();
        let (Some(kind_char), None) = (kind_chars.next(), kind_chars.next()) else {
            return Err(serde::de::Error::custom(format!(
                "piece kind must be single character, got '{kind_str}'"
            )));
        };
        let kind = PieceKind::from_char(kind_char)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid piece kind: {kind_char}")))?;

        let id = id_str
            .parse::<u32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid piece id: {id_str} ({e})")))?;

        Ok(Piece::new(kind, PieceId(id)))
    }
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind, id: PieceId) -> Self {
        Self { kind, id }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn id(&self) -> PieceId {
        self.id
    }
}

/// Process-unique piece identifier, assigned in creation order starting at 0.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct PieceId(u32);

impl PieceId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns this id and advances `self` to the following one.
    ///
    /// # Panics
    ///
    /// Panics if `self` is already `u32::MAX` (ids would no longer be unique).
    pub(crate) const fn post_increment(&mut self) -> Self {
        let current = *self;
        self.0 = self.0.checked_add(1).expect("piece ids exhausted");
        current
    }
}

/// Enum representing the type of piece.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, Deserialize, Serialize,
)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// L-piece.
    L = 3,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..PieceKind::LEN) {
            0 => PieceKind::I,
            1 => PieceKind::O,
            2 => PieceKind::T,
            _ => PieceKind::L,
        }
    }
}

impl PieceKind {
    /// Number of piece types (4).
    pub const LEN: usize = 4;

    /// All piece kinds in declaration order.
    pub const ALL: [PieceKind; Self::LEN] = [PieceKind::I, PieceKind::O, PieceKind::T, PieceKind::L];

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use piece_reserve_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use piece_reserve_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('L'), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_char('S'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_piece_display() {
        let piece = Piece::new(PieceKind::T, PieceId::new(7));
        assert_eq!(piece.to_string(), "[T 7]");

        let piece = Piece::new(PieceKind::I, PieceId::new(0));
        assert_eq!(piece.to_string(), "[I 0]");
    }

    #[test]
    fn test_piece_serialization_format() {
        let piece = Piece::new(PieceKind::L, PieceId::new(42));
        let serialized = serde_json::to_string(&piece).unwrap();
        assert_eq!(serialized, "\"L#42\"");

        let deserialized: Piece = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, piece);
    }

    #[test]
    fn test_piece_deserialization_error_cases() {
        // Invalid format
        assert!(serde_json::from_str::<Piece>("\"T7\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"#7\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"TT#7\"").is_err());

        // Invalid piece kind
        assert!(serde_json::from_str::<Piece>("\"S#7\"").is_err());

        // Invalid id
        assert!(serde_json::from_str::<Piece>("\"T#-1\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"T#abc\"").is_err());
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
            assert_eq!(kind.to_string(), kind.as_char().to_string());
        }

        assert_eq!(PieceKind::from_char('-'), None);
        assert_eq!(PieceKind::from_char('t'), None);
    }

    #[test]
    fn test_piece_id_post_increment() {
        let mut id = PieceId::default();
        assert_eq!(id.post_increment(), PieceId::new(0));
        assert_eq!(id.post_increment(), PieceId::new(1));
        assert_eq!(id, PieceId::new(2));
    }

    #[test]
    fn test_piece_id_post_increment_up_to_limit() {
        let mut id = PieceId::new(u32::MAX - 1);
        assert_eq!(id.post_increment(), PieceId::new(u32::MAX - 1));
        assert_eq!(id, PieceId::new(u32::MAX));
    }

    #[test]
    #[should_panic(expected = "piece ids exhausted")]
    fn test_piece_id_post_increment_past_limit_panics() {
        let mut id = PieceId::new(u32::MAX);
        let _ = id.post_increment();
    }

    #[test]
    fn test_random_kinds_cover_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..200 {
            let kind: PieceKind = rng.random();
            seen[kind as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
