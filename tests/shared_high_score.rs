//! Several sessions sharing one store

use flappy_egg::platform::{Clock, FrameQueue, ManualClock};
use flappy_egg::sim::{GameEvent, GamePhase, Obstacle};
use flappy_egg::{GameConfig, GameSession, MemoryScoreStore, RemoteScoreStore};

const KEY: &str = "highscore";
const FRAME_MS: f64 = 1000.0 / 60.0;

fn client(store: &MemoryScoreStore, seed: u64) -> GameSession {
    GameSession::new(GameConfig::default(), Box::new(store.clone()), FrameQueue::new(), seed)
}

/// Start a run, score `points` in one frame, then crash into the floor
fn play_to(session: &mut GameSession, clock: &ManualClock, points: u32) -> u64 {
    session.jump(clock.now_ms());

    session.state_mut().obstacles = (0..points)
        .map(|i| Obstacle::new(500 + i, 0.0, 50.0, 200.0, 160.0))
        .collect();
    clock.advance(FRAME_MS);
    session.pump(clock.now_ms());

    let state = session.state_mut();
    state.bird.y = 570.0;
    state.bird.velocity = 20.0;
    clock.advance(FRAME_MS);
    let events = session.pump(clock.now_ms());

    events
        .iter()
        .find_map(|e| match e {
            GameEvent::GameOver { score, .. } => Some(*score),
            _ => None,
        })
        .expect("run should end")
}

#[test]
fn new_best_is_shown_then_overridden_by_other_client() {
    let store = MemoryScoreStore::new();
    store.write(KEY, 10).unwrap();
    let clock = ManualClock::new(0.0);

    let mut me = client(&store, 1);
    let mut other = client(&store, 2);
    assert_eq!(me.high_score().displayed(), 10);

    assert_eq!(play_to(&mut me, &clock, 12), 12);
    assert_eq!(me.high_score().displayed(), 12);
    assert_eq!(store.read(KEY), Some(12));

    // The other client hears about it on its next frame
    other.pump(clock.now_ms());
    assert_eq!(other.high_score().displayed(), 12);

    assert_eq!(play_to(&mut other, &clock, 15), 15);
    me.pump(clock.now_ms());
    assert_eq!(me.high_score().displayed(), 15);
}

#[test]
fn lower_write_wins_in_store_but_not_on_own_display() {
    let store = MemoryScoreStore::new();
    store.write(KEY, 5).unwrap();
    let clock = ManualClock::new(0.0);

    let mut a = client(&store, 1);
    let mut b = client(&store, 2);
    assert_eq!(play_to(&mut a, &clock, 20), 20);

    // Some other writer knocks the stored value back down
    store.write(KEY, 7).unwrap();
    a.pump(clock.now_ms());
    b.pump(clock.now_ms());

    assert_eq!(store.read(KEY), Some(7));
    assert_eq!(a.high_score().last_remote(), 7);
    assert_eq!(a.high_score().displayed(), 20);
    assert_eq!(b.high_score().displayed(), 7);
}

#[test]
fn closed_client_stops_hearing_updates() {
    let store = MemoryScoreStore::new();
    let clock = ManualClock::new(0.0);
    let mut a = client(&store, 1);
    let mut b = client(&store, 2);

    b.close();
    assert!(!b.is_subscribed());

    play_to(&mut a, &clock, 3);
    b.pump(clock.now_ms());
    assert_eq!(b.high_score().displayed(), 0);
    assert_eq!(store.subscriber_count(), 1);
}

#[test]
fn spawn_cadence_ignores_frame_rate() {
    let mut config = GameConfig::default();
    // One huge gap so the bird can sit still
    config.pipe_gap = 500.0;
    let run_at = |fps: f64| -> usize {
        let store = MemoryScoreStore::new();
        let mut session = GameSession::new(config.clone(), Box::new(store), FrameQueue::new(), 3);
        let clock = ManualClock::new(0.0);
        session.jump(0.0);

        let mut spawned = 0;
        while clock.now_ms() < 3200.0 {
            clock.advance(1000.0 / fps);
            let state = session.state_mut();
            state.bird.y = 300.0;
            state.bird.velocity = 0.0;
            spawned += session
                .pump(clock.now_ms())
                .iter()
                .filter(|e| matches!(e, GameEvent::Spawned { .. }))
                .count();
        }
        assert_eq!(session.phase(), GamePhase::Playing);
        spawned
    };

    assert_eq!(run_at(30.0), 2);
    assert_eq!(run_at(144.0), 2);
}

#[test]
fn offline_session_still_plays() {
    let mut config = GameConfig::default();
    config.store.key = String::new();
    let mut session = GameSession::connect(config, FrameQueue::new(), 9);
    let clock = ManualClock::new(0.0);

    assert_eq!(play_to(&mut session, &clock, 4), 4);
    assert_eq!(session.high_score().displayed(), 4);
}
