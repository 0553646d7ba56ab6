use crate::cards::{
    combination_label, generic_label,
    stats::{CardStatsMap, ColorWinRates},
    Card, Color, ALL_DECKS,
};

/// Read-only statistics inputs to the scoring model. Scoring is a pure
/// function of (card, affinity, context) with no randomness, so AI picks and
/// the human's pick hint are deterministic and repeatable.
#[derive(Clone, Copy)]
pub struct ScoreContext<'a> {
    pub card_stats: &'a CardStatsMap,
    pub color_rates: &'a ColorWinRates,
}

fn is_subset(colors: &[Color], of: &[Color]) -> bool {
    colors.iter().all(|c| of.contains(c))
}

fn type_bonus(card: &Card) -> f64 {
    if card.is_creature() {
        card.power_toughness_sum() / 2.0 + 2.0
    } else if card.is_instant_or_sorcery() {
        4.0
    } else if card.is_artifact_or_enchantment() {
        3.0
    } else {
        0.0
    }
}

/// Bonus for how well a card's colors line up with a seat's affinity:
/// 5 per matching symbol, 3 extra when the card fits entirely, flat 3 for
/// colorless cards.
fn color_affinity_bonus(colors: &[Color], affinity: &[Color]) -> f64 {
    if colors.is_empty() {
        return 3.0;
    }
    let matching = colors.iter().filter(|c| affinity.contains(c)).count() as f64;
    let mut bonus = matching * 5.0;
    if is_subset(colors, affinity) {
        bonus += 3.0;
    }
    bonus
}

/// Bonus from the win rate of the seat's color combination, applied only when
/// the candidate fits inside the affinity. Lookup ladder: named combination,
/// generic size label, "All Decks". Every two points of win rate above or
/// below 50 shifts the score by one.
fn color_pair_bonus(colors: &[Color], affinity: &[Color], rates: &ColorWinRates) -> f64 {
    if affinity.is_empty() || colors.is_empty() || !is_subset(colors, affinity) {
        return 0.0;
    }

    let mut keys: Vec<&str> = Vec::new();
    if let Some(label) = combination_label(affinity) {
        keys.push(label);
    }
    if let Some(label) = generic_label(affinity) {
        keys.push(label);
    }
    keys.push(ALL_DECKS);

    match keys.iter().find_map(|k| rates.get(*k)) {
        Some(rate) => (rate - 50.0) * 0.5,
        None => 0.0,
    }
}

/// Desirability of a card for a seat with the given affinity. Higher is
/// better. Cards with performance statistics are scored from their win rates;
/// the rest from rarity, mana curve and type. The color-fit bonus is weighted
/// more heavily when real performance data backs the pick.
pub fn score_card(card: &Card, affinity: &[Color], ctx: &ScoreContext) -> f64 {
    let stats = ctx.card_stats.get(&card.name);

    let base = match stats {
        Some(s) => {
            1.5 * s.game_in_hand_wr
                + 0.8 * s.opening_hand_wr.unwrap_or(0.0)
                + 0.7 * s.game_drawn_wr.unwrap_or(0.0)
        }
        None => card.rarity.weight() + (10.0 - card.mana_value).max(0.0) + type_bonus(card),
    };

    let colors = match stats {
        Some(s) => s.colors.as_slice(),
        None => card.colors.as_slice(),
    };

    let color_bonus = color_affinity_bonus(colors, affinity);
    let pair_bonus = color_pair_bonus(colors, affinity, ctx.color_rates);

    if stats.is_some() {
        base + color_bonus * 1.5 + pair_bonus
    } else {
        base + color_bonus + pair_bonus
    }
}

/// Index of the best pick in a pack, ties broken by pack order (first
/// occurrence wins). Used for AI picks and the human's pick hint alike.
pub fn best_pick(pack: &[Card], affinity: &[Color], ctx: &ScoreContext) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, card) in pack.iter().enumerate() {
        let score = score_card(card, affinity, ctx);
        if best.is_none() || best.is_some_and(|(_, s)| score > s) {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod test {
    use crate::cards::stats::{CardStats, CardStatsMap, ColorWinRates};
    use crate::cards::{Card, Color, Rarity};

    use super::{best_pick, color_pair_bonus, score_card, ScoreContext};

    fn empty_ctx<'a>(
        card_stats: &'a CardStatsMap,
        color_rates: &'a ColorWinRates,
    ) -> ScoreContext<'a> {
        ScoreContext {
            card_stats,
            color_rates,
        }
    }

    #[test]
    fn test_score_without_stats() {
        let stats = CardStatsMap::new();
        let rates = ColorWinRates::new();
        let ctx = empty_ctx(&stats, &rates);

        // Common 2/2 creature for 3: 3 + 7 + (2 + 2) / 2 + 2 = 14, plus 3
        // for colorless.
        let card = Card::sample(Rarity::Common);
        assert_eq!(score_card(&card, &[], &ctx), 17.0);

        // Same card in white against a white seat: 14 + 5 + 3 = 22.
        let mut white = card.clone();
        white.colors = vec![Color::White];
        assert_eq!(score_card(&white, &[Color::White], &ctx), 22.0);

        // Off-color card earns no color bonus.
        assert_eq!(score_card(&white, &[Color::Red], &ctx), 14.0);
    }

    #[test]
    fn test_score_with_stats() {
        let mut card = Card::sample(Rarity::Common);
        card.colors = vec![Color::White];

        let mut stats = CardStatsMap::new();
        stats.insert(
            card.name.clone(),
            CardStats {
                game_in_hand_wr: 60.0,
                opening_hand_wr: Some(55.0),
                game_drawn_wr: Some(50.0),
                colors: vec![Color::White],
            },
        );
        let mut rates = ColorWinRates::new();
        rates.insert("Mono-White".to_string(), 56.0);

        // 1.5 * 60 + 0.8 * 55 + 0.7 * 50 = 169, color fit (5 + 3) * 1.5 = 12,
        // pair bonus (56 - 50) * 0.5 = 3.
        let ctx = empty_ctx(&stats, &rates);
        let score = score_card(&card, &[Color::White], &ctx);
        assert!((score - 184.0).abs() < 1e-9);
    }

    #[test]
    fn test_scoring_deterministic() {
        let stats = CardStatsMap::new();
        let rates = ColorWinRates::new();
        let ctx = empty_ctx(&stats, &rates);
        let mut card = Card::sample(Rarity::Rare);
        card.colors = vec![Color::Blue, Color::Red];

        let first = score_card(&card, &[Color::Blue], &ctx);
        for _ in 0..10 {
            assert_eq!(score_card(&card, &[Color::Blue], &ctx), first);
        }
    }

    #[test]
    fn test_color_pair_bonus_zero_cases() {
        let mut rates = ColorWinRates::new();
        rates.insert("Azorius".to_string(), 60.0);
        rates.insert("All Decks".to_string(), 54.0);

        let wu = [Color::White, Color::Blue];
        // Not a subset of affinity.
        assert_eq!(color_pair_bonus(&[Color::Red], &wu, &rates), 0.0);
        // Empty affinity.
        assert_eq!(color_pair_bonus(&[Color::White], &[], &rates), 0.0);
        // Colorless candidate.
        assert_eq!(color_pair_bonus(&[], &wu, &rates), 0.0);
        // In-color candidate hits the named label.
        assert_eq!(color_pair_bonus(&[Color::White], &wu, &rates), 5.0);
    }

    #[test]
    fn test_color_pair_bonus_falls_back_to_all_decks() {
        let mut rates = ColorWinRates::new();
        rates.insert("All Decks".to_string(), 54.0);
        assert_eq!(
            color_pair_bonus(&[Color::White], &[Color::White], &rates),
            2.0
        );
        assert_eq!(color_pair_bonus(&[Color::White], &[Color::White], &ColorWinRates::new()), 0.0);
    }

    #[test]
    fn test_best_pick_prefers_higher_rarity_and_ties_first() {
        let stats = CardStatsMap::new();
        let rates = ColorWinRates::new();
        let ctx = empty_ctx(&stats, &rates);

        let pack = vec![
            Card::sample(Rarity::Common),
            Card::sample(Rarity::Mythic),
            Card::sample(Rarity::Common),
        ];
        assert_eq!(best_pick(&pack, &[], &ctx), Some(1));

        // All equal: first occurrence wins.
        let tied = vec![
            Card::sample(Rarity::Common),
            Card::sample(Rarity::Common),
        ];
        assert_eq!(best_pick(&tied, &[], &ctx), Some(0));

        assert_eq!(best_pick(&[], &[], &ctx), None);
    }
}
