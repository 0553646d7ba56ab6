use rand::{seq::SliceRandom, thread_rng};

use crate::cards::{Card, Color, COLORS};

use super::{
    packs::{generate_pack, DraftPool, Pack},
    DraftConfig,
};

/// The human player always occupies seat 0; all other seats are AI.
pub const HUMAN_SEAT: usize = 0;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Seat {
    pub id: usize,
    /// Preferred colors, at most two, ordered most-drafted first. Derived
    /// from the drafted pile; AI seats start with one random seed color.
    pub affinity: Vec<Color>,
    pub drafted: Vec<Card>,
    pub sideboard: Vec<Card>,
    /// One pack per round.
    pub packs: Vec<Pack>,
}

impl Seat {
    pub fn pack(&self, round: usize) -> &Pack {
        &self.packs[round - 1]
    }

    pub fn pack_mut(&mut self, round: usize) -> &mut Pack {
        &mut self.packs[round - 1]
    }
}

/// Create the full seat table, generating every pack up front.
pub fn new_seats(pool: &DraftPool, config: &DraftConfig) -> Vec<Seat> {
    let rng = &mut thread_rng();
    (0..config.seats)
        .map(|id| {
            let affinity = if id == HUMAN_SEAT {
                Vec::new()
            } else {
                COLORS.choose(rng).map(|&c| vec![c]).unwrap_or_default()
            };
            Seat {
                id,
                affinity,
                drafted: Vec::new(),
                sideboard: Vec::new(),
                packs: (0..config.rounds).map(|_| generate_pack(pool, config)).collect(),
            }
        })
        .collect()
}

/// Recompute a seat's affinity as the two most frequent colors across its
/// drafted cards, ties broken by WUBRG order. A pile with no colored cards
/// leaves the previous affinity in place, so affinity never regresses to
/// empty once set.
pub fn recompute_affinity(seat: &mut Seat) {
    let mut counts = [0usize; COLORS.len()];
    for card in &seat.drafted {
        for &color in &card.colors {
            counts[color as usize] += 1;
        }
    }

    let mut present: Vec<(Color, usize)> = COLORS
        .iter()
        .map(|&c| (c, counts[c as usize]))
        .filter(|&(_, n)| n > 0)
        .collect();
    if present.is_empty() {
        return;
    }

    // Stable sort keeps WUBRG order between equal counts.
    present.sort_by(|a, b| b.1.cmp(&a.1));
    seat.affinity = present.into_iter().take(2).map(|(c, _)| c).collect();
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PassDirection {
    /// Toward higher seat indices, wrapping.
    Left,
    /// Toward lower seat indices, wrapping.
    Right,
}

impl PassDirection {
    pub fn for_round(round: usize) -> Self {
        if round % 2 == 0 {
            PassDirection::Right
        } else {
            PassDirection::Left
        }
    }
}

/// Rotate every seat's current-round pack one position in the round's pass
/// direction. Packs are only reassigned, never created or dropped. After the
/// rotation any pack holding more than the allowed number of basic lands is
/// trimmed back down.
pub fn pass_packs(seats: &mut [Seat], round: usize, max_lands: usize) {
    let idx = round - 1;
    let mut packs: Vec<Pack> = seats
        .iter_mut()
        .map(|s| std::mem::take(&mut s.packs[idx]))
        .collect();

    match PassDirection::for_round(round) {
        PassDirection::Left => packs.rotate_right(1),
        PassDirection::Right => packs.rotate_left(1),
    }

    for (seat, mut pack) in seats.iter_mut().zip(packs) {
        trim_excess_lands(&mut pack, max_lands);
        seat.packs[idx] = pack;
    }
}

fn trim_excess_lands(pack: &mut Pack, max: usize) {
    let mut seen = 0;
    pack.retain(|c| {
        if c.is_basic_land() {
            seen += 1;
            seen <= max
        } else {
            true
        }
    });
}
