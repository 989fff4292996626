//! Fever Break entry point
//!
//! Headless demo run: a scripted "physics collaborator" feeds collision
//! events into the session at a fixed timestep, and the resulting cues
//! drive the audio director, floating text feed, and haptics exactly the
//! way a real frontend would. Prints a JSON run summary when done.

use glam::Vec2;
use serde::Serialize;

use fever_break::audio::{AudioDirector, SoundEffect};
use fever_break::consts::*;
use fever_break::floating_text::FloatingScoreFeed;
use fever_break::ranking::RankingBook;
use fever_break::settings::Settings;
use fever_break::sim::{CollisionEvent, ComboConfig, ComboSnapshot, Cue, GamePhase, Session};

/// Scripted hit cadence: one brick (or boss hit) every 30 ticks = 0.25s,
/// fast enough to build and hold a fever combo
const HIT_EVERY_TICKS: u64 = 30;
/// Drop a ball once, mid-level, to exercise the lives ledger
const DROP_BALL_AT_TICK: u64 = 615;
/// Hard stop for the demo loop
const MAX_DEMO_TICKS: u64 = 200_000;

#[derive(Serialize)]
struct RunSummary<'a> {
    seed: u64,
    level: u32,
    final_phase: GamePhase,
    score: u64,
    lives: u8,
    combo: ComboSnapshot,
    ranking: &'a RankingBook,
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    let level = 1;

    // The frontend wires every collaborator up once and passes them
    // around explicitly; nothing global.
    let settings = Settings::default();
    let mut audio = AudioDirector::from_settings(&settings);
    let mut feed = FloatingScoreFeed::new(seed);
    let mut ranking = RankingBook::new();

    let mut session = match Session::new(level, seed, &settings, ComboConfig::default()) {
        Ok(session) => session,
        Err(err) => {
            log::error!("invalid combo configuration: {err}");
            return;
        }
    };

    let mut tick_count: u64 = 0;
    while !session.is_over() && tick_count < MAX_DEMO_TICKS {
        let mut cues = Vec::new();

        match session.phase() {
            GamePhase::Playing => {
                if tick_count % HIT_EVERY_TICKS == 0 {
                    if let Some(brick) = session.bricks().first() {
                        let id = brick.id;
                        cues.extend(session.handle_collision(CollisionEvent::Brick { id }));
                    } else if session.boss().is_some() {
                        cues.extend(session.handle_collision(CollisionEvent::Boss {
                            position: Vec2::ZERO,
                        }));
                    }
                } else if tick_count % HIT_EVERY_TICKS == HIT_EVERY_TICKS / 2 {
                    cues.extend(session.handle_collision(CollisionEvent::Paddle));
                }
                if tick_count == DROP_BALL_AT_TICK {
                    cues.extend(session.handle_collision(CollisionEvent::BallLost));
                }
            }
            GamePhase::Serve => {
                cues.extend(session.launch());
            }
            _ => {}
        }

        // Events for this step are in; now advance the clock
        cues.extend(session.tick(SIM_DT));

        for cue in &cues {
            dispatch(cue, &audio, &mut feed);
        }
        audio.tick(SIM_DT, session.combo().fever);
        feed.tick(SIM_DT);
        tick_count += 1;
    }

    ranking.add_score(session.level(), "DEMO", session.score());

    let summary = RunSummary {
        seed,
        level: session.level(),
        final_phase: session.phase(),
        score: session.score(),
        lives: session.lives(),
        combo: session.combo(),
        ranking: &ranking,
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("summary serialization failed: {err}"),
    }
}

/// Route one cue to the collaborator that renders it
fn dispatch(cue: &Cue, audio: &AudioDirector, feed: &mut FloatingScoreFeed) {
    match cue {
        Cue::BrickDestroyed { hit } => {
            feed.spawn(hit);
            play(audio.play_pitched(SoundEffect::BrickBreak, hit.audio_pitch));
            if let Some(ms) = hit.vibration_ms {
                log::debug!("haptic pulse {ms}ms");
            }
        }
        Cue::BossHit { hit, hp_left } => {
            feed.spawn(hit);
            play(audio.play_pitched(SoundEffect::BossHit, hit.audio_pitch));
            log::info!("boss hit, {hp_left} hp left");
        }
        Cue::PaddleBounce => play(audio.play(SoundEffect::PaddleHit)),
        Cue::WallBounce => play(audio.play(SoundEffect::WallHit)),
        Cue::PowerUpCollected { kind, .. } => {
            log::info!("power-up: {kind:?}");
            play(audio.play(SoundEffect::PowerUpCollect));
        }
        Cue::CountdownBeat { value } => {
            log::info!("countdown: {value}");
            play(audio.play(SoundEffect::CountdownBeep));
        }
        Cue::CountdownGo => {
            log::info!("GO!");
            play(audio.play(SoundEffect::CountdownGo));
        }
        Cue::FeverStarted => log::info!("fever mode on"),
        Cue::FeverEnded => log::info!("fever mode off"),
        Cue::BallLost { balls_left } => log::info!("ball lost, {balls_left} left"),
        Cue::LifeLost { lives_left } => {
            log::info!("life lost, {lives_left} left");
            play(audio.play(SoundEffect::BallLost));
        }
        Cue::LevelCompleted { score } => {
            log::info!("level complete, score {score}");
            play(audio.play(SoundEffect::LevelClear));
        }
        Cue::GameOver { score } => {
            log::info!("game over, score {score}");
            play(audio.play(SoundEffect::GameOver));
        }
        _ => {}
    }
}

/// Stand-in for the platform audio backend
fn play(command: Option<fever_break::audio::PlaybackCommand>) {
    if let Some(command) = command {
        log::debug!(
            "sfx {:?} vol {:.2} pitch {:.2}",
            command.effect,
            command.volume,
            command.pitch
        );
    }
}
