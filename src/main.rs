//! Hex Arena native entry point
//!
//! The browser build is driven from JS through `platform::web`. Natively this
//! runs a headless demo match with the player on autopilot.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use hex_arena::consts::SIM_DT;
    use hex_arena::highscores::format_duration;
    use hex_arena::sim::{GameState, Outcome, Session};
    use hex_arena::{HighScores, Settings};

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| hex_arena::platform::now_ms() as u64);

    let settings = Settings::load();
    log::info!(
        "Hex Arena (native) starting: seed {}, {} difficulty",
        seed,
        settings.difficulty.as_str()
    );

    let state = GameState::new(seed, settings.rules.clone(), settings.difficulty);
    let mut session = Session::new(state);
    session.set_autopilot(true);

    // Unlimited matches still need a stopping point for the demo
    let max_frames = 60 * 60 * 10;
    let mut frames = 0u32;
    while !session.state.is_over() && frames < max_frames {
        session.frame(SIM_DT);
        for event in session.state.drain_events() {
            log::debug!("{:?}", event);
        }
        frames += 1;
    }

    let state = &session.state;
    println!("Match finished after {}", format_duration(state.elapsed_secs()));
    for (id, score) in state.scores() {
        println!("  {:<8} {:>4}", id.to_string(), score);
    }
    match state.outcome {
        Some(Outcome::Winner(id)) => println!("Winner: {}", id),
        Some(Outcome::Draw) => println!("Draw"),
        None => println!("No result (demo frame limit reached)"),
    }

    if let Some(result) = session.take_result() {
        let mut scores = HighScores::load();
        if let Some(rank) = scores.add_score(
            result.score,
            result.won,
            result.secs,
            hex_arena::platform::now_ms(),
        ) {
            println!("New high score! Rank #{}", rank);
            scores.save();
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
