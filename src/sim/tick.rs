//! Per-frame simulation tick
//!
//! One call advances a Playing game by one step:
//! physics → scroll/despawn pipes → spawn → collisions → scoring.

use super::collision;
use super::physics;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// A jump was pressed since the last tick
    pub jump: bool,
}

/// Advance the game by one tick at wall-clock time `now_ms`.
///
/// Does nothing outside `Playing`. Returns what happened, in order.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;

    // Motion. A position outside the playfield is never committed.
    let motion = physics::step_bird(&state.bird, input.jump, &state.config);
    state.bird.velocity = motion.velocity;
    if !collision::out_of_bounds(motion.y, &state.config) {
        state.bird.y = motion.y;
    }

    physics::advance_obstacles(&mut state.obstacles, &state.config);

    if let Some(obstacle) = state.spawner.spawn_if_due(&state.config, now_ms) {
        events.push(GameEvent::Spawned { id: obstacle.id });
        state.obstacles.push(obstacle);
    }

    let report = collision::detect(&state.bird, motion.y, &state.obstacles, &state.config);
    if let Some(cause) = report.cause() {
        if let Some(score) = state.end_run(cause) {
            events.push(GameEvent::GameOver { score, cause });
        }
        return events;
    }

    let bird_left = state.bird.left();
    let awarded = state.scoring.award_passed(&mut state.obstacles, bird_left);
    if awarded > 0 {
        events.push(GameEvent::Scored {
            score: state.score(),
        });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;
    use crate::sim::state::{GameOverCause, Obstacle};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(GameConfig::default(), seed);
        state.start(0.0);
        state
    }

    #[test]
    fn test_tick_does_nothing_before_start() {
        let mut state = GameState::new(GameConfig::default(), 1);
        let events = tick(&mut state, &TickInput { jump: true }, 16.0);
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.bird.velocity, 0.0);
    }

    #[test]
    fn test_gravity_then_jump() {
        let mut state = playing(1);
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert!((state.bird.velocity - 0.4).abs() < 1e-6);

        tick(&mut state, &TickInput { jump: true }, FRAME_MS * 2.0);
        assert_eq!(state.bird.velocity, -7.5);

        tick(&mut state, &TickInput::default(), FRAME_MS * 3.0);
        assert!((state.bird.velocity - (-7.1)).abs() < 1e-5);
    }

    #[test]
    fn test_pipes_scroll_each_tick() {
        let mut state = playing(1);
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.obstacles[0].x, 447.0);
    }

    #[test]
    fn test_bottom_boundary_is_inclusive() {
        let mut state = playing(1);
        state.obstacles.clear();

        state.bird.y = 570.0;
        state.bird.velocity = -0.4;
        tick(&mut state, &TickInput::default(), 10.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bird.y, 570.0);

        state.bird.velocity = 0.6;
        let events = tick(&mut state, &TickInput::default(), 20.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            events,
            vec![GameEvent::GameOver {
                score: 0,
                cause: GameOverCause::Boundary
            }]
        );
        // The out-of-bounds position is not committed
        assert_eq!(state.bird.y, 570.0);
    }

    #[test]
    fn test_ceiling_ends_run() {
        let mut state = playing(1);
        state.obstacles.clear();
        state.bird.y = 3.0;
        let events = tick(&mut state, &TickInput { jump: true }, 10.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(matches!(events.last(), Some(GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_simultaneous_hits_end_once() {
        let mut state = playing(1);
        state.obstacles = vec![
            Obstacle::new(100, 63.0, 50.0, 100.0, 160.0),
            Obstacle::new(101, 70.0, 50.0, 120.0, 160.0),
        ];
        state.bird.y = 570.0;
        state.bird.velocity = 5.0;

        let events = tick(&mut state, &TickInput::default(), 10.0);
        let game_overs: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(game_overs.len(), 1);
        assert!(matches!(
            game_overs[0],
            GameEvent::GameOver {
                cause: GameOverCause::BoundaryAndObstacle,
                ..
            }
        ));

        // Pipeline is stopped now
        let before = state.bird;
        assert!(tick(&mut state, &TickInput::default(), 30.0).is_empty());
        assert_eq!(state.bird, before);
    }

    #[test]
    fn test_passing_pipe_scores() {
        let mut state = playing(1);
        // Right edge at 62 -> 59 after scrolling, left of the bird at 60
        state.obstacles = vec![Obstacle::new(100, 12.0, 50.0, 200.0, 160.0)];
        state.bird.y = 250.0;

        let events = tick(&mut state, &TickInput::default(), 10.0);
        assert_eq!(events, vec![GameEvent::Scored { score: 1 }]);
        assert!(state.obstacles[0].passed());

        let events = tick(&mut state, &TickInput::default(), 20.0);
        assert!(events.is_empty());
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_spawn_follows_wall_clock() {
        let mut state = playing(1);
        let start = state.obstacles.len();

        // One tick, but 1.6 seconds of wall clock
        let events = tick(&mut state, &TickInput::default(), 1600.0);
        assert!(matches!(events.first(), Some(GameEvent::Spawned { .. })));
        assert_eq!(state.obstacles.len(), start + 1);
        assert_eq!(state.obstacles.last().map(|o| o.x), Some(450.0));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = playing(99999);
        let mut state2 = playing(99999);

        for i in 1..400 {
            let input = TickInput { jump: i % 14 == 0 };
            let now = i as f64 * FRAME_MS;
            let e1 = tick(&mut state1, &input, now);
            let e2 = tick(&mut state2, &input, now);
            assert_eq!(e1, e2);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.bird, state2.bird);
    }
}
