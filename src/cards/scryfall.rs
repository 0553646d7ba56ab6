use bytes::Buf;
use serde::de::DeserializeOwned;

use crate::{
    cards::{parse_colors, Card, Rarity},
    Res,
};

const API_ROOT: &str = "https://api.scryfall.com";

pub(super) async fn get_bytes(uri: &str) -> Res<bytes::Bytes> {
    reqwest::get(uri)
        .await
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map_err(|e| e.to_string())
}

pub(super) fn decode_json<T: DeserializeOwned>(bytes: bytes::Bytes) -> Res<T> {
    serde_json::de::from_reader(bytes.reader()).map_err(|e| e.to_string())
}

#[derive(serde::Deserialize, Debug)]
struct ScryfallCardImages {
    png: Option<String>,
    border_crop: Option<String>,
    art_crop: Option<String>,
    large: Option<String>,
    normal: Option<String>,
    small: Option<String>,
}

impl ScryfallCardImages {
    fn choose(self) -> Option<String> {
        if self.large.is_some() {
            self.large
        } else if self.png.is_some() {
            self.png
        } else if self.normal.is_some() {
            self.normal
        } else if self.border_crop.is_some() {
            self.border_crop
        } else if self.small.is_some() {
            self.small
        } else {
            self.art_crop
        }
    }
}

#[derive(serde::Deserialize, Debug)]
struct ScryfallCard {
    /// Scryfall card UUID. Card identity within the draft.
    id: String,

    /// Card name. Includes both faces (!).
    name: String,

    /// Mana value. Absent for some layouts, treated as zero.
    cmc: Option<f64>,

    /// Color identity symbols, e.g. ["W", "U"].
    color_identity: Vec<String>,

    /// Full type line, e.g. "Legendary Creature — Human Wizard".
    type_line: Option<String>,

    /// Rarity string, mythic, rare, uncommon, common, special, bonus.
    rarity: String,

    power: Option<String>,
    toughness: Option<String>,

    /// Object containing image URIs.
    image_uris: Option<ScryfallCardImages>,
}

impl ScryfallCard {
    fn to_card(self) -> Option<Card> {
        let name = if self.name.contains("//") {
            self.name.split("//").next().unwrap().trim().to_string()
        } else {
            self.name
        };

        let rarity = match self.rarity.as_str() {
            "mythic" => Rarity::Mythic,
            "rare" => Rarity::Rare,
            "uncommon" => Rarity::Uncommon,
            "common" => Rarity::Common,
            "special" => Rarity::Special,
            "bonus" => Rarity::Bonus,
            _ => return None,
        };

        Some(Card {
            id: self.id,
            name,
            rarity,
            mana_value: self.cmc.unwrap_or(0.0),
            colors: parse_colors(&self.color_identity),
            type_line: self.type_line?,
            power: self.power,
            toughness: self.toughness,
            image: self.image_uris.and_then(ScryfallCardImages::choose),
        })
    }
}

#[derive(serde::Deserialize)]
struct SearchPage {
    data: Vec<ScryfallCard>,
    has_more: bool,
    next_page: Option<String>,
}

/// Load the full card pool for a set, following pagination until exhausted.
/// The availability filter (booster cards only, non-digital) is applied in
/// the query so the core only ever sees draftable cards.
pub async fn load_set(code: &str) -> Res<Vec<Card>> {
    tracing::debug!("Loading card pool for set {code}.");

    let mut uri = format!(
        "{API_ROOT}/cards/search?order=set&unique=cards&q=set%3A{code}+is%3Abooster+-is%3Adigital"
    );
    let mut cards = Vec::new();
    loop {
        let page: SearchPage = decode_json(get_bytes(&uri).await?)?;
        cards.extend(page.data.into_iter().filter_map(ScryfallCard::to_card));
        match (page.has_more, page.next_page) {
            (true, Some(next)) => uri = next,
            _ => break,
        }
    }

    tracing::debug!("Loaded {} cards for set {code}.", cards.len());
    Ok(cards)
}
