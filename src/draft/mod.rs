pub mod game;
pub mod handlers;
pub mod packs;
pub mod scoring;
pub mod seats;

#[derive(Clone, Copy, Debug)]
pub struct DraftConfig {
    /// Total seats at the table, including the human at seat 0.
    pub seats: usize,
    pub rounds: usize,

    /// Pack template slot counts.
    pub rares: usize,
    pub uncommons: usize,
    pub commons: usize,
    pub lands: usize,

    /// Chance that a rare slot is upgraded to a mythic.
    pub mythic_rate: f64,

    /// Maximum undo snapshots retained.
    pub undo_limit: usize,

    /// Lands suggested for a built deck.
    pub suggested_lands: usize,

    /// Attempts at generating a valid pack before falling back to repair.
    pub pack_retries: usize,
}

impl Default for DraftConfig {
    fn default() -> Self {
        DraftConfig {
            seats: 8,
            rounds: 3,
            rares: 1,
            uncommons: 3,
            commons: 10,
            lands: 1,
            mythic_rate: 0.125,
            undo_limit: 5,
            suggested_lands: 17,
            pack_retries: 20,
        }
    }
}

impl DraftConfig {
    pub fn cards_per_pack(&self) -> usize {
        self.rares + self.uncommons + self.commons + self.lands
    }
}
