use std::fmt::Debug;

use rand::{seq::SliceRandom, thread_rng, Rng};

use crate::cards::{Card, Rarity};

use super::DraftConfig;

pub type Pack = Vec<Card>;

/// Card pool for a set, partitioned by pack slot. Basic lands are kept apart
/// from commons regardless of printed rarity.
#[derive(Clone)]
pub struct DraftPool {
    mythics: Vec<Card>,
    rares: Vec<Card>,
    uncommons: Vec<Card>,
    commons: Vec<Card>,
    lands: Vec<Card>,
}

impl DraftPool {
    pub fn new() -> Self {
        Self {
            mythics: Vec::new(),
            rares: Vec::new(),
            uncommons: Vec::new(),
            commons: Vec::new(),
            lands: Vec::new(),
        }
    }

    pub fn from_cards(cards: &[Card]) -> Self {
        let mut pool = Self::new();
        for card in cards {
            pool.add(card.clone());
        }
        pool
    }

    pub fn add(&mut self, card: Card) {
        if card.is_basic_land() {
            self.lands.push(card);
            return;
        }
        match card.rarity {
            Rarity::Mythic => self.mythics.push(card),
            Rarity::Rare => self.rares.push(card),
            Rarity::Uncommon => self.uncommons.push(card),
            Rarity::Common => self.commons.push(card),
            Rarity::Special | Rarity::Bonus => {} // Special and bonus not part of pool.
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mythics.is_empty()
            && self.rares.is_empty()
            && self.uncommons.is_empty()
            && self.commons.is_empty()
            && self.lands.is_empty()
    }

    #[cfg(test)]
    pub fn sample(mythics: usize, rares: usize, uncommons: usize, commons: usize, lands: usize) -> Self {
        use crate::cards::COLORS;

        let mut pool = Self::new();
        for _ in 0..mythics {
            pool.add(Card::sample(Rarity::Mythic));
        }
        for _ in 0..rares {
            pool.add(Card::sample(Rarity::Rare));
        }
        for _ in 0..uncommons {
            pool.add(Card::sample(Rarity::Uncommon));
        }
        for _ in 0..commons {
            pool.add(Card::sample(Rarity::Common));
        }
        for i in 0..lands {
            pool.add(Card::sample_land(COLORS[i % COLORS.len()]));
        }
        pool
    }
}

impl Debug for DraftPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DraftPool {{ mythics: {}, rares: {}, uncommons: {}, commons: {}, lands: {} }}",
            self.mythics.len(),
            self.rares.len(),
            self.uncommons.len(),
            self.commons.len(),
            self.lands.len()
        )
    }
}

fn count_lands(pack: &Pack) -> usize {
    pack.iter().filter(|c| c.is_land()).count()
}

/// Roll one candidate pack from the template. Slots the pool cannot fill are
/// dropped, so a degraded pool yields a short pack rather than an error.
fn roll_pack<R: Rng>(pool: &DraftPool, config: &DraftConfig, rng: &mut R) -> Pack {
    let mut pack = Vec::new();

    for _ in 0..config.rares {
        let upgraded = rng.gen_range(0.0..=1.0) < config.mythic_rate && !pool.mythics.is_empty();
        let slot = if upgraded {
            pool.mythics.choose(rng)
        } else {
            pool.rares.choose(rng).or_else(|| pool.mythics.choose(rng))
        };
        if let Some(card) = slot.or_else(|| pool.commons.choose(rng)) {
            pack.push(card.clone());
        }
    }

    let mut uncommons = pool.uncommons.clone();
    uncommons.shuffle(rng);
    pack.extend(uncommons.into_iter().take(config.uncommons));

    let mut commons = pool.commons.clone();
    commons.shuffle(rng);
    pack.extend(commons.into_iter().take(config.commons));

    for _ in 0..config.lands {
        if let Some(card) = pool.lands.choose(rng).or_else(|| pool.commons.choose(rng)) {
            pack.push(card.clone());
        }
    }

    pack
}

/// Force the pack to hold exactly the configured number of land cards: trim
/// any excess, then swap lands in over the cheapest slots for any shortfall.
/// Leaves the pack untouched when the pool has no lands to offer.
fn repair_lands<R: Rng>(pack: &mut Pack, pool: &DraftPool, config: &DraftConfig, rng: &mut R) {
    let mut seen = 0;
    pack.retain(|c| {
        if c.is_land() {
            seen += 1;
            seen <= config.lands
        } else {
            true
        }
    });

    while count_lands(pack) < config.lands {
        let Some(land) = pool.lands.choose(rng) else {
            break;
        };
        if let Some(i) = pack.iter().rposition(|c| !c.is_land()) {
            pack[i] = land.clone();
        } else {
            pack.push(land.clone());
        }
    }
}

/// Generate one pack: roll until the land-count invariant holds, up to the
/// configured attempt cap, then repair deterministically. The result is
/// sorted by descending rarity weight with lands at the back.
pub fn generate_pack(pool: &DraftPool, config: &DraftConfig) -> Pack {
    let rng = &mut thread_rng();

    let mut pack = roll_pack(pool, config, rng);
    for _ in 1..config.pack_retries {
        if count_lands(&pack) == config.lands {
            break;
        }
        pack = roll_pack(pool, config, rng);
    }
    if count_lands(&pack) != config.lands {
        repair_lands(&mut pack, pool, config, rng);
    }

    pack.sort_by(|a, b| {
        b.pack_weight()
            .partial_cmp(&a.pack_weight())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    pack
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use crate::{
        cards::{Card, Color, Rarity},
        draft::DraftConfig,
    };

    use super::{count_lands, generate_pack, DraftPool};

    #[test]
    fn test_pack_composition() {
        let pool = DraftPool::sample(1, 10, 30, 60, 10);
        let config = DraftConfig::default();

        for _ in 0..50 {
            let pack = generate_pack(&pool, &config);
            assert_eq!(pack.len(), 15);
            assert_eq!(count_lands(&pack), 1);
            assert_eq!(
                pack.iter()
                    .filter(|c| matches!(c.rarity, Rarity::Mythic | Rarity::Rare))
                    .count(),
                1
            );
            assert_eq!(
                pack.iter().filter(|c| c.rarity == Rarity::Uncommon).count(),
                3
            );
            assert_eq!(
                pack.iter()
                    .filter(|c| c.rarity == Rarity::Common && !c.is_land())
                    .count(),
                10
            );

            let ids: HashSet<&str> = pack.iter().map(|c| c.id.as_str()).collect();
            assert_eq!(ids.len(), pack.len());
        }
    }

    #[test]
    fn test_pack_sorted_by_rarity_weight() {
        let pool = DraftPool::sample(4, 10, 30, 60, 10);
        let pack = generate_pack(&pool, &DraftConfig::default());
        for pair in pack.windows(2) {
            assert!(pair[0].pack_weight() >= pair[1].pack_weight());
        }
        assert!(pack.last().is_some_and(Card::is_basic_land));
    }

    #[test]
    fn test_mythic_rate_full_promotes_rare_slot() {
        let pool = DraftPool::sample(4, 10, 10, 20, 5);
        let config = DraftConfig {
            mythic_rate: 1.0,
            ..Default::default()
        };
        let pack = generate_pack(&pool, &config);
        assert!(pack.iter().any(|c| c.rarity == Rarity::Mythic));
    }

    #[test]
    fn test_degraded_pool_yields_short_pack() {
        // No uncommons at all: three slots go unfilled.
        let pool = DraftPool::sample(1, 5, 0, 30, 5);
        let pack = generate_pack(&pool, &DraftConfig::default());
        assert_eq!(pack.len(), 12);
        assert_eq!(count_lands(&pack), 1);
    }

    #[test]
    fn test_landless_pool_is_best_effort() {
        let pool = DraftPool::sample(1, 5, 10, 30, 0);
        let pack = generate_pack(&pool, &DraftConfig::default());
        // Land slot fell back to a common and repair had nothing to swap in.
        assert_eq!(pack.len(), 15);
        assert_eq!(count_lands(&pack), 0);
    }

    #[test]
    fn test_excess_lands_trimmed() {
        let mut pack = vec![
            Card::sample(Rarity::Rare),
            Card::sample_land(Color::White),
            Card::sample_land(Color::Blue),
            Card::sample(Rarity::Common),
        ];
        let pool = DraftPool::sample(0, 0, 0, 0, 3);
        super::repair_lands(
            &mut pack,
            &pool,
            &DraftConfig::default(),
            &mut rand::thread_rng(),
        );
        assert_eq!(count_lands(&pack), 1);
        assert_eq!(pack.len(), 3);
    }
}
