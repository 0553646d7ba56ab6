pub mod scryfall;
pub mod stats;

/// The five colors in canonical WUBRG order. All color collections in the
/// crate are kept sorted by this ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

pub const COLORS: [Color; 5] = [
    Color::White,
    Color::Blue,
    Color::Black,
    Color::Red,
    Color::Green,
];

impl Color {
    pub fn symbol(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'W' => Some(Color::White),
            'U' => Some(Color::Blue),
            'B' => Some(Color::Black),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            _ => None,
        }
    }

    pub fn basic_land_name(self) -> &'static str {
        match self {
            Color::White => "Plains",
            Color::Blue => "Island",
            Color::Black => "Swamp",
            Color::Red => "Mountain",
            Color::Green => "Forest",
        }
    }
}

/// Parse a color identity from symbol strings into a sorted, deduplicated
/// color list.
pub fn parse_colors<S: AsRef<str>>(symbols: &[S]) -> Vec<Color> {
    let mut colors: Vec<Color> = symbols
        .iter()
        .filter_map(|s| s.as_ref().chars().next())
        .filter_map(Color::from_symbol)
        .collect();
    colors.sort();
    colors.dedup();
    colors
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum Rarity {
    Mythic,
    Rare,
    Uncommon,
    Common,
    Special,
    Bonus,
}

impl Rarity {
    /// Desirability weight used both for pack ordering and as the base score
    /// for cards with no performance statistics.
    pub fn weight(self) -> f64 {
        match self {
            Rarity::Mythic => 10.0,
            Rarity::Rare => 8.0,
            Rarity::Uncommon => 5.0,
            Rarity::Common => 3.0,
            Rarity::Special | Rarity::Bonus => 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Card {
    /// Unique identifier within a set. Duplicate names with distinct ids are
    /// distinct cards.
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    pub mana_value: f64,
    /// Color identity, sorted WUBRG. Empty means colorless.
    pub colors: Vec<Color>,
    pub type_line: String,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub image: Option<String>,
}

impl Card {
    pub fn is_land(&self) -> bool {
        self.type_line.contains("Land")
    }

    pub fn is_basic_land(&self) -> bool {
        self.type_line.contains("Basic Land")
    }

    pub fn is_creature(&self) -> bool {
        self.type_line.contains("Creature")
    }

    pub fn is_instant_or_sorcery(&self) -> bool {
        self.type_line.contains("Instant") || self.type_line.contains("Sorcery")
    }

    pub fn is_artifact_or_enchantment(&self) -> bool {
        self.type_line.contains("Artifact") || self.type_line.contains("Enchantment")
    }

    /// Combined power and toughness, treating non-numeric values (`*`, `X`)
    /// as zero.
    pub fn power_toughness_sum(&self) -> f64 {
        let parse = |v: &Option<String>| {
            v.as_deref()
                .and_then(|s| s.parse::<f64>().ok())
                .unwrap_or(0.0)
        };
        parse(&self.power) + parse(&self.toughness)
    }

    /// Weight for ordering cards within a pack. Basic lands always sort to
    /// the back regardless of printed rarity.
    pub fn pack_weight(&self) -> f64 {
        if self.is_basic_land() {
            0.0
        } else {
            self.rarity.weight()
        }
    }

    #[cfg(test)]
    pub fn sample(rarity: Rarity) -> Self {
        static ID: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(1);

        let id = ID.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        Self {
            id: format!("card-{id}"),
            name: format!("Card {id}"),
            rarity,
            mana_value: 3.0,
            colors: Vec::new(),
            type_line: "Creature".to_string(),
            power: Some("2".to_string()),
            toughness: Some("2".to_string()),
            image: None,
        }
    }

    #[cfg(test)]
    pub fn sample_land(color: Color) -> Self {
        let mut card = Self::sample(Rarity::Common);
        card.name = color.basic_land_name().to_string();
        card.type_line = format!("Basic Land — {}", color.basic_land_name());
        card.colors = vec![color];
        card.mana_value = 0.0;
        card.power = None;
        card.toughness = None;
        card
    }
}

/// Canonical names for color combinations, keyed by the sorted WUBRG symbol
/// sequence. This is the single source of truth for combination labels.
const COMBINATION_NAMES: &[(&str, &str)] = &[
    ("W", "Mono-White"),
    ("U", "Mono-Blue"),
    ("B", "Mono-Black"),
    ("R", "Mono-Red"),
    ("G", "Mono-Green"),
    ("WU", "Azorius"),
    ("WB", "Orzhov"),
    ("WR", "Boros"),
    ("WG", "Selesnya"),
    ("UB", "Dimir"),
    ("UR", "Izzet"),
    ("UG", "Simic"),
    ("BR", "Rakdos"),
    ("BG", "Golgari"),
    ("RG", "Gruul"),
    ("WUB", "Esper"),
    ("WUR", "Jeskai"),
    ("WUG", "Bant"),
    ("WBR", "Mardu"),
    ("WBG", "Abzan"),
    ("WRG", "Naya"),
    ("UBR", "Grixis"),
    ("UBG", "Sultai"),
    ("URG", "Temur"),
    ("BRG", "Jund"),
];

pub const ALL_DECKS: &str = "All Decks";

/// Sorted symbol key for a color list, e.g. [White, Blue] => "WU".
pub fn color_key(colors: &[Color]) -> String {
    let mut sorted = colors.to_vec();
    sorted.sort();
    sorted.dedup();
    sorted.iter().map(|c| c.symbol()).collect()
}

/// Named label for a color combination, if one exists (mono colors, guilds,
/// shards and wedges).
pub fn combination_label(colors: &[Color]) -> Option<&'static str> {
    let key = color_key(colors);
    COMBINATION_NAMES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, name)| *name)
}

/// Generic label by combination size, used when no named label applies.
pub fn generic_label(colors: &[Color]) -> Option<&'static str> {
    match color_key(colors).len() {
        2 => Some("Two-color"),
        3 => Some("Three-color"),
        4 => Some("Four-color"),
        5 => Some("Five-color"),
        _ => None,
    }
}
