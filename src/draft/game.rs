use crate::{
    cards::Card,
    deck::{sort_cards, SortKey},
};

use super::{
    packs::{DraftPool, Pack},
    scoring::{best_pick, ScoreContext},
    seats::{self, Seat, HUMAN_SEAT},
    DraftConfig,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No playable pool yet: either nothing fetched or the set came back
    /// empty ("no pack available").
    Loading,
    Drafting { round: usize },
    Complete,
}

#[derive(Clone, PartialEq)]
struct Snapshot {
    seats: Vec<Seat>,
    pick: usize,
}

/// The draft state machine. Owns all mutable draft state; the presentation
/// layer reads views and issues the commands below, which each run to
/// completion before the next is accepted.
pub struct DraftState {
    config: DraftConfig,
    pub phase: Phase,
    pub seats: Vec<Seat>,
    /// Pick index within the current round.
    pub pick: usize,
    history: Vec<Snapshot>,
    /// Card id of the current pick hint, if toggled on.
    pub suggestion: Option<String>,
}

impl DraftState {
    pub fn new(config: DraftConfig) -> Self {
        Self {
            config,
            phase: Phase::Loading,
            seats: Vec::new(),
            pick: 0,
            history: Vec::new(),
            suggestion: None,
        }
    }

    /// Reset and build a fresh draft from a card pool: new seats, new packs,
    /// empty history, round 1. An empty pool leaves the machine in `Loading`.
    pub fn initialize(&mut self, cards: &[Card]) -> bool {
        self.phase = Phase::Loading;
        self.seats.clear();
        self.pick = 0;
        self.history.clear();
        self.suggestion = None;

        let pool = DraftPool::from_cards(cards);
        if pool.is_empty() {
            tracing::warn!("Cannot initialize draft from an empty card pool.");
            return false;
        }

        self.seats = seats::new_seats(&pool, &self.config);
        self.phase = Phase::Drafting { round: 1 };
        true
    }

    pub fn round(&self) -> Option<usize> {
        match self.phase {
            Phase::Drafting { round } => Some(round),
            _ => None,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn human(&self) -> Option<&Seat> {
        self.seats.get(HUMAN_SEAT)
    }

    /// The pack the human is currently picking from, if drafting.
    pub fn current_pack(&self) -> Option<&Pack> {
        let round = self.round()?;
        self.human().map(|seat| seat.pack(round))
    }

    fn push_snapshot(&mut self) {
        if self.history.len() == self.config.undo_limit {
            self.history.remove(0);
        }
        self.history.push(Snapshot {
            seats: self.seats.clone(),
            pick: self.pick,
        });
    }

    /// Apply a full pick turn: the human's choice, one AI pick per seat with
    /// a live pack, the pass, and the round/draft completion check. Invalid
    /// commands (not drafting, unknown card id) are ignored.
    pub fn pick(&mut self, card_id: &str, ctx: &ScoreContext) {
        let Phase::Drafting { round } = self.phase else {
            tracing::debug!("Pick ignored outside of drafting.");
            return;
        };
        let Some(index) = self.seats[HUMAN_SEAT]
            .pack(round)
            .iter()
            .position(|c| c.id == card_id)
        else {
            tracing::debug!("Pick of card not in pack ignored: {card_id}");
            return;
        };

        self.push_snapshot();

        let seat = &mut self.seats[HUMAN_SEAT];
        let card = seat.pack_mut(round).remove(index);
        seat.drafted.push(card);
        seats::recompute_affinity(seat);

        for seat in self.seats.iter_mut().skip(1) {
            if seat.pack(round).is_empty() {
                continue;
            }
            if let Some(i) = best_pick(seat.pack(round), &seat.affinity, ctx) {
                let card = seat.pack_mut(round).remove(i);
                seat.drafted.push(card);
                seats::recompute_affinity(seat);
            }
        }

        seats::pass_packs(&mut self.seats, round, self.config.lands);

        if self.seats.iter().all(|s| s.pack(round).is_empty()) {
            if round < self.config.rounds {
                self.phase = Phase::Drafting { round: round + 1 };
                self.pick = 0;
            } else {
                self.phase = Phase::Complete;
            }
            self.history.clear();
        } else {
            self.pick += 1;
        }

        // A hint computed against the pre-pick pack is meaningless now.
        self.suggestion = None;
    }

    /// Restore the most recent snapshot. No-op on an empty history.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            tracing::debug!("Undo with empty history ignored.");
            return false;
        };
        self.seats = snapshot.seats;
        self.pick = snapshot.pick;
        self.suggestion = None;
        true
    }

    /// Toggle the pick hint for the human's current pack. Computing the hint
    /// mutates nothing but the stored suggestion id and is idempotent for a
    /// fixed pack and affinity.
    pub fn toggle_suggestion(&mut self, ctx: &ScoreContext) {
        if self.suggestion.take().is_some() {
            return;
        }
        let Phase::Drafting { round } = self.phase else {
            return;
        };
        let seat = &self.seats[HUMAN_SEAT];
        self.suggestion =
            best_pick(seat.pack(round), &seat.affinity, ctx).map(|i| seat.pack(round)[i].id.clone());
    }

    pub fn move_to_sideboard(&mut self, card_id: &str) {
        let Some(seat) = self.seats.get_mut(HUMAN_SEAT) else {
            return;
        };
        if let Some(i) = seat.drafted.iter().position(|c| c.id == card_id) {
            let card = seat.drafted.remove(i);
            seat.sideboard.push(card);
        }
    }

    pub fn move_from_sideboard(&mut self, card_id: &str) {
        let Some(seat) = self.seats.get_mut(HUMAN_SEAT) else {
            return;
        };
        if let Some(i) = seat.sideboard.iter().position(|c| c.id == card_id) {
            let card = seat.sideboard.remove(i);
            seat.drafted.push(card);
        }
    }

    pub fn sort_drafted(&mut self, key: SortKey) {
        if let Some(seat) = self.seats.get_mut(HUMAN_SEAT) {
            sort_cards(&mut seat.drafted, key);
        }
    }

    #[cfg(test)]
    fn history_len(&self) -> usize {
        self.history.len()
    }
}
