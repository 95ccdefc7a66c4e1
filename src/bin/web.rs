//! Single binary web server: JSON REST API over the fixture engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tournament_fixtures::{
    champion, correct_result, current_round, generate_next_round, kill_death_leaderboard,
    mvp_leaderboard, podium, record_result, standings, summarize, top_scorers, winner, MatchId,
    Outcome, ParticipantId, StandingsEntry, Tournament, TournamentConfig, TournamentError,
    TournamentId, DEFAULT_SEED_VALUE,
};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

/// Size of each leaderboard in the stats response.
const LEADERBOARD_LIMIT: usize = 10;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    config: TournamentConfig,
}

#[derive(Deserialize)]
struct AddParticipantBody {
    name: String,
    #[serde(default = "default_seed_value")]
    seed_value: u32,
}

fn default_seed_value() -> u32 {
    DEFAULT_SEED_VALUE
}

#[derive(Deserialize)]
struct ResultBody {
    score_a: u32,
    score_b: u32,
    outcome: Outcome,
}

#[derive(Serialize)]
struct StatsResponse {
    podium: Vec<StandingsEntry>,
    top_scorers: Vec<StandingsEntry>,
    mvp_leaderboard: Vec<StandingsEntry>,
    kill_death_leaderboard: Vec<StandingsEntry>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and participant id.
#[derive(Deserialize)]
struct ParticipantPath {
    id: TournamentId,
    participant_id: ParticipantId,
}

/// Path segments: tournament id and match id.
#[derive(Deserialize)]
struct MatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::UnknownMatch(_) | TournamentError::ParticipantNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Look up a tournament, refresh its activity time and run `f` on it.
fn with_tournament<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.tournament)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-fixtures",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let tournament = Tournament::new(body.name.trim(), body.config);
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(&tournament);
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    log::info!("Created tournament {}", id);
    response
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(&*t))
}

/// Register a participant (Setup only).
#[post("/api/tournaments/{id}/participants")]
async fn api_add_participant(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddParticipantBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        match t.add_participant(body.name.as_str(), body.seed_value) {
            Ok(_) => HttpResponse::Ok().json(&*t),
            Err(e) => error_response(&e),
        }
    })
}

/// Remove a participant by id (Setup only).
#[delete("/api/tournaments/{id}/participants/{participant_id}")]
async fn api_remove_participant(state: AppState, path: Path<ParticipantPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match t.remove_participant(path.participant_id) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(&e),
    })
}

/// Give every participant a random distinct seed (Setup only).
#[post("/api/tournaments/{id}/participants/shuffle-seeds")]
async fn api_shuffle_seeds(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        match t.shuffle_seeds(&mut rand::thread_rng()) {
            Ok(()) => HttpResponse::Ok().json(&*t),
            Err(e) => error_response(&e),
        }
    })
}

/// Generate the next round (the first call locks the roster).
#[post("/api/tournaments/{id}/rounds")]
async fn api_generate_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match generate_next_round(t) {
        Ok(round) => HttpResponse::Ok().json(round),
        Err(e) => error_response(&e),
    })
}

/// Latest generated round, or null before the first one.
#[get("/api/tournaments/{id}/rounds/current")]
async fn api_current_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(current_round(t)))
}

/// Record the result of a pending match.
#[put("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_record_result(state: AppState, path: Path<MatchPath>, body: Json<ResultBody>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        match record_result(t, path.match_id, body.score_a, body.score_b, body.outcome) {
            Ok(m) => HttpResponse::Ok().json(m),
            Err(e) => error_response(&e),
        }
    })
}

/// Correct the result of a played match in the current round.
#[put("/api/tournaments/{id}/matches/{match_id}/correction")]
async fn api_correct_result(state: AppState, path: Path<MatchPath>, body: Json<ResultBody>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        match correct_result(t, path.match_id, body.score_a, body.score_b, body.outcome) {
            Ok(m) => HttpResponse::Ok().json(m),
            Err(e) => error_response(&e),
        }
    })
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(standings(t)))
}

/// Standings as a CSV download.
#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match standings_csv(&standings(t)) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"standings-{}.csv\"", t.id),
            ))
            .body(csv),
        Err(e) => {
            log::error!("CSV export failed for {}: {}", t.id, e);
            HttpResponse::InternalServerError().body("csv export error")
        }
    })
}

/// Knockout champion (400 for other formats, null until decided).
#[get("/api/tournaments/{id}/champion")]
async fn api_champion(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match champion(t) {
        Ok(p) => HttpResponse::Ok().json(p),
        Err(e) => error_response(&e),
    })
}

/// Overview numbers plus the winner once the tournament is complete.
#[get("/api/tournaments/{id}/summary")]
async fn api_summary(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        HttpResponse::Ok().json(serde_json::json!({
            "summary": summarize(t),
            "winner": winner(t),
        }))
    })
}

/// Podium and leaderboards.
#[get("/api/tournaments/{id}/stats")]
async fn api_stats(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let table = standings(t);
        HttpResponse::Ok().json(StatsResponse {
            podium: podium(&table).to_vec(),
            top_scorers: top_scorers(&table, LEADERBOARD_LIMIT),
            mvp_leaderboard: mvp_leaderboard(&table, LEADERBOARD_LIMIT),
            kill_death_leaderboard: kill_death_leaderboard(&table, LEADERBOARD_LIMIT),
        })
    })
}

#[derive(Serialize)]
struct CsvRow<'a> {
    rank: usize,
    name: &'a str,
    played: u32,
    won: u32,
    drawn: u32,
    lost: u32,
    points: u64,
    score_for: u64,
    score_against: u64,
    score_diff: i64,
    mvps: u32,
    rating: String,
    kill_death: String,
}

fn standings_csv(table: &[StandingsEntry]) -> Result<String, Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for e in table {
        writer.serialize(CsvRow {
            rank: e.rank,
            name: &e.name,
            played: e.played,
            won: e.wins,
            drawn: e.draws,
            lost: e.losses,
            points: e.points,
            score_for: e.score_for,
            score_against: e.score_against,
            score_diff: e.score_diff,
            mvps: e.mvp_count,
            rating: format!("{:.0}", e.rating),
            kill_death: e.kill_death_ratio.map(|r| format!("{:.2}", r)).unwrap_or_default(),
        })?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_participant)
            .service(api_remove_participant)
            .service(api_shuffle_seeds)
            .service(api_generate_round)
            .service(api_current_round)
            .service(api_record_result)
            .service(api_correct_result)
            .service(api_standings)
            .service(api_standings_csv)
            .service(api_champion)
            .service(api_summary)
            .service(api_stats)
    })
    .bind(bind)?
    .run()
    .await
}
