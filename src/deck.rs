use uuid::Uuid;

use crate::cards::{Card, Color, Rarity, COLORS};

#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize)]
pub enum SortKey {
    /// Ascending mana value.
    #[serde(rename = "cmc")]
    ManaValue,
    /// Ascending first-color-symbol lexical order, colorless first.
    #[serde(rename = "color")]
    Color,
}

/// Stable sort shared by the drafted pile and the built deck.
pub fn sort_cards(cards: &mut [Card], key: SortKey) {
    match key {
        SortKey::ManaValue => cards.sort_by(|a, b| {
            a.mana_value
                .partial_cmp(&b.mana_value)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        SortKey::Color => cards.sort_by_key(|c| c.colors.first().map(|c| c.symbol())),
    }
}

fn basic_land(color: Color) -> Card {
    Card {
        // Synthesized lands get fresh ids so they never collide with real
        // cards or each other.
        id: Uuid::new_v4().to_string(),
        name: color.basic_land_name().to_string(),
        rarity: Rarity::Common,
        mana_value: 0.0,
        colors: vec![color],
        type_line: format!("Basic Land — {}", color.basic_land_name()),
        power: None,
        toughness: None,
        image: None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DeckStats {
    pub lands: usize,
    pub average_mana_value: f64,
    pub cards: usize,
}

/// Post-draft deck under construction. Cards come from the drafted pile and
/// sideboard; the source pool is never consumed, only referenced.
#[derive(Default)]
pub struct DeckBuilder {
    pub deck: Vec<Card>,
}

impl DeckBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.deck.clear();
    }

    /// Append a card unless its id is already present. Duplicate adds are
    /// no-ops, not errors.
    pub fn add(&mut self, card: Card) {
        if !self.deck.iter().any(|c| c.id == card.id) {
            self.deck.push(card);
        }
    }

    pub fn remove(&mut self, card_id: &str) {
        self.deck.retain(|c| c.id != card_id);
    }

    /// Append basic lands split proportionally over the deck's color
    /// distribution. Rounding is independent per color, so the result can
    /// land one off the nominal total.
    pub fn suggest_lands(&mut self, total: usize) {
        let mut counts = [0usize; COLORS.len()];
        for card in &self.deck {
            for &color in &card.colors {
                counts[color as usize] += 1;
            }
        }
        let symbols: usize = counts.iter().sum();
        if symbols == 0 {
            return;
        }

        for &color in COLORS.iter() {
            let share = total as f64 * counts[color as usize] as f64 / symbols as f64;
            for _ in 0..share.round() as usize {
                self.deck.push(basic_land(color));
            }
        }
    }

    pub fn sort(&mut self, key: SortKey) {
        sort_cards(&mut self.deck, key);
    }

    pub fn stats(&self) -> DeckStats {
        let cards = self.deck.len();
        let average_mana_value = if cards == 0 {
            0.0
        } else {
            self.deck.iter().map(|c| c.mana_value).sum::<f64>() / cards as f64
        };
        DeckStats {
            lands: self.deck.iter().filter(|c| c.is_land()).count(),
            average_mana_value,
            cards,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::cards::{Card, Color, Rarity};

    use super::{sort_cards, DeckBuilder, SortKey};

    fn colored(colors: &[Color], mana_value: f64) -> Card {
        let mut card = Card::sample(Rarity::Common);
        card.colors = colors.to_vec();
        card.mana_value = mana_value;
        card
    }

    #[test]
    fn test_add_dedupes_by_id() {
        let mut builder = DeckBuilder::new();
        let card = Card::sample(Rarity::Common);
        builder.add(card.clone());
        builder.add(card.clone());
        assert_eq!(builder.deck.len(), 1);

        // Same name, different id: a distinct card.
        let mut twin = Card::sample(Rarity::Common);
        twin.name = card.name.clone();
        builder.add(twin);
        assert_eq!(builder.deck.len(), 2);

        builder.remove(&card.id);
        assert_eq!(builder.deck.len(), 1);
    }

    #[test]
    fn test_suggest_lands_mono_color() {
        let mut builder = DeckBuilder::new();
        for _ in 0..23 {
            builder.add(colored(&[Color::Red], 3.0));
        }
        builder.suggest_lands(17);

        let mountains = builder
            .deck
            .iter()
            .filter(|c| c.name == "Mountain")
            .count();
        assert_eq!(mountains, 17);
        assert_eq!(builder.deck.len(), 40);
    }

    #[test]
    fn test_suggest_lands_proportional() {
        let mut builder = DeckBuilder::new();
        for _ in 0..16 {
            builder.add(colored(&[Color::White], 2.0));
        }
        for _ in 0..8 {
            builder.add(colored(&[Color::Blue], 2.0));
        }
        builder.suggest_lands(17);

        // 17 * 2/3 rounds to 11, 17 * 1/3 rounds to 6.
        assert_eq!(builder.deck.iter().filter(|c| c.name == "Plains").count(), 11);
        assert_eq!(builder.deck.iter().filter(|c| c.name == "Island").count(), 6);
        // Colors with no deck presence get no lands.
        assert!(!builder.deck.iter().any(|c| c.name == "Swamp"));
    }

    #[test]
    fn test_suggest_lands_empty_deck() {
        let mut builder = DeckBuilder::new();
        builder.suggest_lands(17);
        assert!(builder.deck.is_empty());
    }

    #[test]
    fn test_sort_by_mana_value() {
        let mut cards = vec![
            colored(&[], 5.0),
            colored(&[], 1.0),
            colored(&[], 3.0),
        ];
        sort_cards(&mut cards, SortKey::ManaValue);
        for pair in cards.windows(2) {
            assert!(pair[0].mana_value <= pair[1].mana_value);
        }
    }

    #[test]
    fn test_sort_by_color() {
        let mut cards = vec![
            colored(&[Color::White], 2.0),
            colored(&[Color::Black], 2.0),
            colored(&[], 2.0),
            colored(&[Color::Red], 2.0),
        ];
        sort_cards(&mut cards, SortKey::Color);
        // Colorless first, then lexical symbol order: B, R, W.
        assert!(cards[0].colors.is_empty());
        assert_eq!(cards[1].colors, vec![Color::Black]);
        assert_eq!(cards[2].colors, vec![Color::Red]);
        assert_eq!(cards[3].colors, vec![Color::White]);
    }

    #[test]
    fn test_deck_stats() {
        let mut builder = DeckBuilder::new();
        assert_eq!(builder.stats().average_mana_value, 0.0);

        builder.add(colored(&[Color::Red], 2.0));
        builder.add(colored(&[Color::Red], 4.0));
        builder.add(Card::sample_land(Color::Red));

        let stats = builder.stats();
        assert_eq!(stats.cards, 3);
        assert_eq!(stats.lands, 1);
        assert_eq!(stats.average_mana_value, 2.0);
    }
}
