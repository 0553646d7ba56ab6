use std::sync::Arc;

use axum::{
    http::{Response, StatusCode},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

use cards::{
    stats::{CardStatsMap, ColorWinRates},
    Card,
};
use deck::DeckBuilder;
use draft::{
    game::{DraftState, Phase},
    DraftConfig,
};

mod cards;
mod deck;
mod draft;

pub type Res<T> = Result<T, String>;

pub fn err<T, S: ToString>(message: S) -> Res<T> {
    Err(message.to_string())
}

#[derive(serde::Serialize)]
struct Resp {
    message: String,
    success: bool,
}

impl Resp {
    fn axum<S: ToString>(message: S, status: StatusCode) -> Response<String> {
        match serde_json::ser::to_string(&Self {
            message: message.to_string(),
            success: status == StatusCode::OK,
        }) {
            Ok(body) => {
                let mut resp = Response::new(body);
                *resp.status_mut() = status;
                resp
            }
            Err(e) => {
                let mut resp = Response::new(format!("Failed to JSON encode response: {e}"));
                *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                resp
            }
        }
    }

    fn ok<S: ToString>(message: S) -> Response<String> {
        Self::axum(message, StatusCode::OK)
    }

    fn e500<S: ToString>(message: S) -> Response<String> {
        Self::axum(message, StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn e422<S: ToString>(message: S) -> Response<String> {
        Self::axum(message, StatusCode::UNPROCESSABLE_ENTITY)
    }
}

/// All mutable application state: the selected set's pool statistics, the
/// draft in progress and the deck under construction. Held behind one mutex
/// so every command runs atomically with respect to the frontend.
pub struct App {
    pub config: DraftConfig,
    pub set_code: Option<String>,
    pub card_stats: CardStatsMap,
    pub color_rates: ColorWinRates,
    pub draft: DraftState,
    pub deck: DeckBuilder,
}

pub type SharedApp = Arc<tokio::sync::Mutex<App>>;

impl App {
    pub fn new(config: DraftConfig) -> Self {
        Self {
            config,
            set_code: None,
            card_stats: CardStatsMap::new(),
            color_rates: ColorWinRates::new(),
            draft: DraftState::new(config),
            deck: DeckBuilder::new(),
        }
    }

    /// Swap in a freshly fetched set: new statistics, fresh seats and packs,
    /// empty deck and history. An empty pool leaves the draft in `Loading`.
    pub fn change_set(
        &mut self,
        code: String,
        pool: Vec<Card>,
        card_stats: CardStatsMap,
        color_rates: ColorWinRates,
    ) -> Res<()> {
        self.card_stats = card_stats;
        self.color_rates = color_rates;
        self.deck.clear();
        let initialized = self.draft.initialize(&pool);
        self.set_code = Some(code);
        if initialized {
            Ok(())
        } else {
            err("No packs available: the set's card pool is empty.")
        }
    }

    /// Copy a card from the human's drafted pile or sideboard into the built
    /// deck. Only meaningful once the draft is complete; ignored otherwise.
    pub fn add_to_deck(&mut self, card_id: &str) {
        if self.draft.phase != Phase::Complete {
            tracing::debug!("Deck building before draft completion ignored.");
            return;
        }
        let card = self.draft.human().and_then(|seat| {
            seat.drafted
                .iter()
                .chain(seat.sideboard.iter())
                .find(|c| c.id == card_id)
                .cloned()
        });
        if let Some(card) = card {
            self.deck.add(card);
        }
    }
}

#[tokio::main]
async fn main() {
    const USAGE: &str = "Usage: draftsim <static path> <port>";

    let content = std::env::args().nth(1).expect(USAGE);
    let port = std::env::args()
        .nth(2)
        .map(|s| u16::from_str_radix(&s, 10).expect(&format!("Invalid port number: {s}")))
        .expect(USAGE);

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let state: SharedApp = Arc::new(tokio::sync::Mutex::new(App::new(DraftConfig::default())));

    let app = Router::new()
        .fallback_service(ServeDir::new(content).append_index_html_on_directories(true))
        .route("/api/state", get(draft::handlers::state))
        .route("/api/pick", post(draft::handlers::pick))
        .route("/api/undo", post(draft::handlers::undo))
        .route("/api/suggest", post(draft::handlers::suggest))
        .route("/api/sideboard", post(draft::handlers::sideboard))
        .route("/api/sort", post(draft::handlers::sort))
        .route("/api/deck/add", post(draft::handlers::deck_add))
        .route("/api/deck/remove", post(draft::handlers::deck_remove))
        .route("/api/deck/lands", post(draft::handlers::deck_lands))
        .route("/api/set", post(draft::handlers::change_set))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect(&format!("Failed to open port {port}"));

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Closed due to error: {e}");
    }
}
