//! Single binary web server: JSON API over the tournament engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT. Set SHUFFLE_SEED to make group draws and
//! schedules reproducible across restarts (demos, screenshots).

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use doubles_tournament_web::{
    create_player, create_tournament, enroll_player, get_tournament, group_standings,
    list_players, list_tournaments, record_result, regenerate_groups, regenerate_matches,
    tournament_groups, tournament_matches, tournament_roster, EngineError, EngineResult, GroupId,
    MatchId, MemoryStore, NewTournament, PlayerId, Shuffler, TournamentId,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared server state: the store plus the optional fixed shuffle seed.
struct Engine {
    store: MemoryStore,
    shuffle_seed: Option<u64>,
    draws: AtomicU64,
}

impl Engine {
    /// Fresh random source for one request. With a fixed seed, the n-th request
    /// after startup always gets the same stream.
    fn shuffler(&self) -> Shuffler {
        match self.shuffle_seed {
            Some(seed) => {
                let n = self.draws.fetch_add(1, Ordering::Relaxed);
                Shuffler::seeded(seed.wrapping_add(n))
            }
            None => Shuffler::from_entropy(),
        }
    }
}

type AppState = Data<Engine>;

/// Server settings read from the environment.
struct ServerConfig {
    host: String,
    port: u16,
    shuffle_seed: Option<u64>,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let shuffle_seed = std::env::var("SHUFFLE_SEED").ok().and_then(|s| {
            let parsed = s.trim().parse().ok();
            if parsed.is_none() {
                log::warn!("Ignoring SHUFFLE_SEED={:?}: not an unsigned integer", s);
            }
            parsed
        });
        Self {
            host,
            port,
            shuffle_seed,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreatePlayerBody {
    name: String,
    email: String,
}

#[derive(Deserialize)]
struct EnrollPlayerBody {
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct MatchResultBody {
    home_score: u32,
    away_score: u32,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct GroupPath {
    id: GroupId,
}

#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

/// Map engine errors to status codes: validation 400, missing 404, storage 500.
fn error_response(e: &EngineError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        EngineError::Validation(_) => HttpResponse::BadRequest().json(body),
        EngineError::NotFound { .. } => HttpResponse::NotFound().json(body),
        EngineError::Storage(_) => {
            log::error!("{}", e);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

/// Run an engine call off the async workers (the store locks) and render the result as JSON.
async fn respond<T, F>(state: &AppState, work: F) -> HttpResponse
where
    F: FnOnce(&Engine) -> EngineResult<T> + Send + 'static,
    T: Serialize + Send + 'static,
{
    let engine = state.clone();
    match tokio::task::spawn_blocking(move || work(&engine)).await {
        Ok(Ok(value)) => HttpResponse::Ok().json(value),
        Ok(Err(e)) => error_response(&e),
        Err(e) => {
            log::error!("Engine task failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": "internal error" }))
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "doubles-tournament-web",
    })
}

/// Register a player.
#[post("/api/players")]
async fn api_create_player(state: AppState, body: Json<CreatePlayerBody>) -> HttpResponse {
    let body = body.into_inner();
    respond(&state, move |e| create_player(&e.store, &body.name, &body.email)).await
}

#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    respond(&state, |e| list_players(&e.store)).await
}

/// Create a tournament (max_players defaults to 16).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<NewTournament>) -> HttpResponse {
    let body = body.into_inner();
    respond(&state, move |e| create_tournament(&e.store, body)).await
}

#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    respond(&state, |e| list_tournaments(&e.store)).await
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let id = path.id;
    respond(&state, move |e| get_tournament(&e.store, id)).await
}

/// Add a registered player to the tournament roster.
#[post("/api/tournaments/{id}/players")]
async fn api_enroll_player(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<EnrollPlayerBody>,
) -> HttpResponse {
    let (id, player_id) = (path.id, body.player_id);
    respond(&state, move |e| enroll_player(&e.store, id, player_id)).await
}

#[get("/api/tournaments/{id}/players")]
async fn api_tournament_players(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let id = path.id;
    respond(&state, move |e| tournament_roster(&e.store, id)).await
}

/// Draw new groups from the current roster (replaces groups and matches).
#[post("/api/tournaments/{id}/groups/generate")]
async fn api_generate_groups(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let id = path.id;
    respond(&state, move |e| regenerate_groups(&e.store, &mut e.shuffler(), id)).await
}

#[get("/api/tournaments/{id}/groups")]
async fn api_tournament_groups(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let id = path.id;
    respond(&state, move |e| tournament_groups(&e.store, id)).await
}

/// Rebuild every group's schedule.
#[post("/api/tournaments/{id}/matches/generate")]
async fn api_generate_matches(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let id = path.id;
    respond(&state, move |e| regenerate_matches(&e.store, &mut e.shuffler(), id)).await
}

#[get("/api/tournaments/{id}/matches")]
async fn api_tournament_matches(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let id = path.id;
    respond(&state, move |e| tournament_matches(&e.store, id)).await
}

/// Record a match score.
#[put("/api/matches/{id}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<MatchResultBody>,
) -> HttpResponse {
    let (id, home, away) = (path.id, body.home_score, body.away_score);
    respond(&state, move |e| record_result(&e.store, id, home, away)).await
}

#[get("/api/groups/{id}/standings")]
async fn api_group_standings(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    let id = path.id;
    respond(&state, move |e| group_standings(&e.store, id)).await
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    if let Some(seed) = config.shuffle_seed {
        log::info!("Using fixed shuffle seed {}", seed);
    }

    let state = Data::new(Engine {
        store: MemoryStore::new(),
        shuffle_seed: config.shuffle_seed,
        draws: AtomicU64::new(0),
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_player)
            .service(api_list_players)
            .service(api_create_tournament)
            .service(api_list_tournaments)
            .service(api_get_tournament)
            .service(api_enroll_player)
            .service(api_tournament_players)
            .service(api_generate_groups)
            .service(api_tournament_groups)
            .service(api_generate_matches)
            .service(api_tournament_matches)
            .service(api_record_result)
            .service(api_group_standings)
    })
    .bind(bind)?
    .run()
    .await
}
