use axum::{extract::State, Json};

use crate::{
    cards::{scryfall, stats, Card, ALL_DECKS},
    deck::{DeckStats, SortKey},
    draft::{game::Phase, scoring::ScoreContext, seats::HUMAN_SEAT},
    App, Resp, SharedApp,
};

#[derive(serde::Deserialize)]
pub struct CardCommand {
    pub id: String,
}

#[derive(serde::Deserialize)]
pub struct SideboardCommand {
    pub id: String,
    /// True moves the card into the sideboard, false moves it back out.
    pub to_sideboard: bool,
}

#[derive(Clone, Copy, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortZone {
    Drafted,
    Deck,
}

#[derive(serde::Deserialize)]
pub struct SortCommand {
    pub zone: SortZone,
    pub by: SortKey,
}

#[derive(serde::Deserialize)]
pub struct SetCommand {
    pub code: String,
}

/// Full read view for the presentation layer. One document so the frontend
/// re-renders from a single fetch after any command.
#[derive(serde::Serialize)]
pub struct StateView {
    phase: Phase,
    round: Option<usize>,
    pick: usize,
    set_code: Option<String>,
    pack: Vec<Card>,
    drafted: Vec<Card>,
    sideboard: Vec<Card>,
    deck: Vec<Card>,
    can_undo: bool,
    suggestion: Option<String>,
    deck_stats: DeckStats,
    average_win_rate: Option<f64>,
}

impl StateView {
    fn of(app: &App) -> Self {
        let human = app.draft.seats.get(HUMAN_SEAT);
        Self {
            phase: app.draft.phase,
            round: app.draft.round(),
            pick: app.draft.pick,
            set_code: app.set_code.clone(),
            pack: app.draft.current_pack().cloned().unwrap_or_default(),
            drafted: human.map(|s| s.drafted.clone()).unwrap_or_default(),
            sideboard: human.map(|s| s.sideboard.clone()).unwrap_or_default(),
            deck: app.deck.deck.clone(),
            can_undo: app.draft.can_undo(),
            suggestion: app.draft.suggestion.clone(),
            deck_stats: app.deck.stats(),
            average_win_rate: app.color_rates.get(ALL_DECKS).copied(),
        }
    }
}

pub async fn state(State(app): State<SharedApp>) -> Json<StateView> {
    let app = app.lock().await;
    Json(StateView::of(&app))
}

pub async fn pick(
    State(app): State<SharedApp>,
    Json(cmd): Json<CardCommand>,
) -> axum::response::Response<String> {
    let mut guard = app.lock().await;
    let app = &mut *guard;
    let ctx = ScoreContext {
        card_stats: &app.card_stats,
        color_rates: &app.color_rates,
    };
    // The whole turn runs under the lock: human move, AI moves, pass,
    // completion check.
    app.draft.pick(&cmd.id, &ctx);
    Resp::ok("ok")
}

pub async fn undo(State(app): State<SharedApp>) -> axum::response::Response<String> {
    let mut app = app.lock().await;
    app.draft.undo();
    Resp::ok("ok")
}

pub async fn suggest(State(app): State<SharedApp>) -> axum::response::Response<String> {
    let mut guard = app.lock().await;
    let app = &mut *guard;
    let ctx = ScoreContext {
        card_stats: &app.card_stats,
        color_rates: &app.color_rates,
    };
    app.draft.toggle_suggestion(&ctx);
    Resp::ok("ok")
}

pub async fn sideboard(
    State(app): State<SharedApp>,
    Json(cmd): Json<SideboardCommand>,
) -> axum::response::Response<String> {
    let mut app = app.lock().await;
    if cmd.to_sideboard {
        app.draft.move_to_sideboard(&cmd.id);
    } else {
        app.draft.move_from_sideboard(&cmd.id);
    }
    Resp::ok("ok")
}

pub async fn sort(
    State(app): State<SharedApp>,
    Json(cmd): Json<SortCommand>,
) -> axum::response::Response<String> {
    let mut app = app.lock().await;
    match cmd.zone {
        SortZone::Drafted => app.draft.sort_drafted(cmd.by),
        SortZone::Deck => app.deck.sort(cmd.by),
    }
    Resp::ok("ok")
}

pub async fn deck_add(
    State(app): State<SharedApp>,
    Json(cmd): Json<CardCommand>,
) -> axum::response::Response<String> {
    let mut app = app.lock().await;
    app.add_to_deck(&cmd.id);
    Resp::ok("ok")
}

pub async fn deck_remove(
    State(app): State<SharedApp>,
    Json(cmd): Json<CardCommand>,
) -> axum::response::Response<String> {
    let mut app = app.lock().await;
    app.deck.remove(&cmd.id);
    Resp::ok("ok")
}

pub async fn deck_lands(State(app): State<SharedApp>) -> axum::response::Response<String> {
    let mut app = app.lock().await;
    let lands = app.config.suggested_lands;
    app.deck.suggest_lands(lands);
    Resp::ok("ok")
}

/// Switch to a new set: fetch the pool and both statistics resources, then
/// reset the whole draft from them. Fetches complete before the state is
/// touched, so the machine never suspends mid-transition.
pub async fn change_set(
    State(app): State<SharedApp>,
    Json(cmd): Json<SetCommand>,
) -> axum::response::Response<String> {
    let pool = match scryfall::load_set(&cmd.code).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!("Failed to load card pool for {}: {e}", cmd.code);
            return Resp::e500(format!("Failed to load card pool: {e}"));
        }
    };
    let card_stats = stats::load_card_stats(&cmd.code).await;
    let color_rates = stats::load_color_stats(&cmd.code).await;

    let mut app = app.lock().await;
    match app.change_set(cmd.code, pool, card_stats, color_rates) {
        Ok(()) => Resp::ok("ok"),
        Err(e) => Resp::e422(e),
    }
}
