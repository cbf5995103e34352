//! Cards on the board.
//!
//! ## Identity vs. position
//!
//! A card's `CardId` and its slot in the collection never change once the
//! controller is built. What a shuffle changes is the card's visual `order`,
//! so a click handler bound to a card keeps pointing at the same card while
//! its apparent grid position moves.
//!
//! ```
//! use memory_match::core::{Card, CardId, FaceValue};
//!
//! let card = Card::new(CardId::new(0), FaceValue::from_image_path("Assets/Images/Bat.png"));
//! assert_eq!(card.face.as_str(), "Bat.png");
//! assert!(card.is_hidden());
//! ```

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};

/// Identifier of a card, stable for the lifetime of a controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// What is printed on the front of a card. Two cards match when their faces are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceValue(String);

impl FaceValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Derive a face from an image resource path.
    ///
    /// Only the file name takes part in comparisons, so the same picture
    /// referenced through different directories still matches.
    pub fn from_image_path(path: &str) -> Self {
        let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
        Self(name.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FaceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Visual state of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardStatus {
    #[default]
    Hidden,
    FaceUp,
    Matched,
}

/// A single card.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub face: FaceValue,
    pub status: CardStatus,
    /// Visual order slot (CSS `order` in a flex grid, row-major index in a terminal grid).
    pub order: usize,
}

impl Card {
    pub fn new(id: CardId, face: FaceValue) -> Self {
        Self {
            id,
            face,
            status: CardStatus::Hidden,
            order: 0,
        }
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.status == CardStatus::Hidden
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.status == CardStatus::Matched
    }

    /// Whether two cards form a pair. A card never matches itself.
    #[must_use]
    pub fn matches(&self, other: &Card) -> bool {
        self.id != other.id && self.face == other.face
    }
}

/// Ordered card collection handed to the controller.
///
/// Building through `Deck` guarantees unique IDs and that every face can be
/// paired off, so a session can always end in victory.
#[derive(Clone, Debug, Default)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build a deck containing two cards per face, in the given order.
    ///
    /// ```
    /// use memory_match::core::Deck;
    ///
    /// let deck = Deck::pairs(["A", "B"]).unwrap();
    /// let faces: Vec<_> = deck.cards().iter().map(|c| c.face.to_string()).collect();
    /// assert_eq!(faces, ["A", "A", "B", "B"]);
    /// ```
    pub fn pairs<I, S>(faces: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cards = Vec::new();
        for face in faces {
            let face = FaceValue::new(face.as_ref());
            for _ in 0..2 {
                let id = CardId::new(cards.len() as u32);
                cards.push(Card::new(id, face.clone()));
            }
        }
        Self::from_cards(cards)
    }

    /// Build a deck from image paths, one card per path (as a page lists its `<img>` sources).
    pub fn from_image_paths<I, S>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cards = paths
            .into_iter()
            .enumerate()
            .map(|(i, p)| Card::new(CardId::new(i as u32), FaceValue::from_image_path(p.as_ref())))
            .collect();
        Self::from_cards(cards)
    }

    /// Validate an explicit card list.
    ///
    /// Visual order is reset to the collection order and every card starts hidden.
    pub fn from_cards(mut cards: Vec<Card>) -> Result<Self> {
        if cards.is_empty() {
            return Err(GameError::EmptyDeck);
        }

        let mut seen = FxHashSet::default();
        let mut face_counts: FxHashMap<&FaceValue, usize> = FxHashMap::default();
        for card in &cards {
            if !seen.insert(card.id) {
                return Err(GameError::DuplicateCardId(card.id));
            }
            *face_counts.entry(&card.face).or_insert(0) += 1;
        }
        if let Some(card) = cards.iter().find(|c| face_counts[&c.face] % 2 != 0) {
            return Err(GameError::UnpairedCard(card.face.clone()));
        }

        for (order, card) in cards.iter_mut().enumerate() {
            card.order = order;
            card.status = CardStatus::Hidden;
        }
        Ok(Self { cards })
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}
