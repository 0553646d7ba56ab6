use std::collections::HashMap;

use crate::{
    cards::{Color, scryfall::{decode_json, get_bytes}},
    Res,
};

const API_ROOT: &str = "https://www.17lands.com";

/// Per-card performance statistics, keyed by card name (not id) in the maps
/// below. Win rates are percentages.
#[derive(Clone, Debug, PartialEq)]
pub struct CardStats {
    pub game_in_hand_wr: f64,
    pub opening_hand_wr: Option<f64>,
    pub game_drawn_wr: Option<f64>,
    /// Color identity as observed in the statistics data, which may differ
    /// from the printed identity (e.g. activated-ability colors).
    pub colors: Vec<Color>,
}

pub type CardStatsMap = HashMap<String, CardStats>;

/// Average win rate per color-combination label ("Azorius", "Mono-Red",
/// "All Decks", ...). Percentages.
pub type ColorWinRates = HashMap<String, f64>;

#[derive(serde::Deserialize)]
struct CardRatingRow {
    name: String,
    color: Option<String>,
    /// Win rate when the card was ever in hand, as a fraction.
    ever_drawn_win_rate: Option<f64>,
    opening_hand_win_rate: Option<f64>,
    drawn_win_rate: Option<f64>,
}

#[derive(serde::Deserialize)]
struct ColorRatingRow {
    color_name: String,
    wins: f64,
    games: f64,
}

fn parse_color_string(symbols: &str) -> Vec<Color> {
    let mut colors: Vec<Color> = symbols.chars().filter_map(Color::from_symbol).collect();
    colors.sort();
    colors.dedup();
    colors
}

/// Strip a trailing parenthetical from a combination label so lookups use
/// canonical names: "Azorius (WU)" => "Azorius".
fn normalize_label(label: &str) -> String {
    label.split(" (").next().unwrap_or(label).trim().to_string()
}

async fn fetch_card_stats(code: &str) -> Res<CardStatsMap> {
    let uri = format!("{API_ROOT}/card_ratings/data?expansion={code}&format=PremierDraft");
    let rows: Vec<CardRatingRow> = decode_json(get_bytes(&uri).await?)?;

    let mut stats = CardStatsMap::new();
    for row in rows {
        // Rows with no in-hand win rate carry no usable signal.
        let Some(gih) = row.ever_drawn_win_rate else {
            continue;
        };
        stats.insert(
            row.name,
            CardStats {
                game_in_hand_wr: gih * 100.0,
                opening_hand_wr: row.opening_hand_win_rate.map(|r| r * 100.0),
                game_drawn_wr: row.drawn_win_rate.map(|r| r * 100.0),
                colors: row.color.as_deref().map(parse_color_string).unwrap_or_default(),
            },
        );
    }
    Ok(stats)
}

async fn fetch_color_stats(code: &str) -> Res<ColorWinRates> {
    let uri = format!(
        "{API_ROOT}/color_ratings/data?expansion={code}&event_type=PremierDraft&combine_splash=false"
    );
    let rows: Vec<ColorRatingRow> = decode_json(get_bytes(&uri).await?)?;

    let mut rates = ColorWinRates::new();
    for row in rows {
        if row.games > 0.0 {
            rates.insert(normalize_label(&row.color_name), row.wins / row.games * 100.0);
        }
    }
    Ok(rates)
}

/// Load per-card statistics for a set. Absence or failure of the resource is
/// non-fatal; scoring falls back to the statistics-free branch.
pub async fn load_card_stats(code: &str) -> CardStatsMap {
    match fetch_card_stats(code).await {
        Ok(stats) => {
            tracing::debug!("Loaded statistics for {} cards in {code}.", stats.len());
            stats
        }
        Err(e) => {
            tracing::warn!("Failed to load card statistics for {code}: {e}");
            CardStatsMap::new()
        }
    }
}

/// Load color-combination win rates for a set. Absence is non-fatal.
pub async fn load_color_stats(code: &str) -> ColorWinRates {
    match fetch_color_stats(code).await {
        Ok(rates) => {
            tracing::debug!("Loaded {} color win rates for {code}.", rates.len());
            rates
        }
        Err(e) => {
            tracing::warn!("Failed to load color win rates for {code}: {e}");
            ColorWinRates::new()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("Azorius (WU)"), "Azorius");
        assert_eq!(normalize_label("All Decks"), "All Decks");
        assert_eq!(normalize_label("Mono-White (W)"), "Mono-White");
    }

    #[test]
    fn test_parse_color_string() {
        assert_eq!(
            parse_color_string("UW"),
            vec![Color::White, Color::Blue]
        );
        assert!(parse_color_string("C").is_empty());
    }
}
