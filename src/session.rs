//! Game session: lifecycle state machine and frame scheduling
//!
//! A `GameSession` is one open game view. It owns the simulation, the
//! displayed high score and the store subscription, and is the only thing
//! that mutates them.
//!
//! ```text
//!   Start ──jump──▶ Playing ──collision──▶ GameOver
//!     ▲               │  ▲                    │
//!     └────close──────┘  └────jump / retry────┘
//! ```
//!
//! While Playing, every frame callback runs one tick and requests the next
//! frame. Leaving Playing cancels the outstanding request. Store pushes are
//! drained between frames and only ever touch the high score.

use serde::Serialize;

use crate::highscores::HighScore;
use crate::platform::frame::{FrameHandle, FrameQueue, FrameScheduler};
use crate::settings::GameConfig;
use crate::sim::{Bird, GameEvent, GamePhase, GameState, Obstacle, TickInput, tick};
use crate::store::{self, RemoteScoreStore, Subscription};

/// Counters across all runs of this session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub runs: u32,
    pub best_score: u64,
    pub new_high_scores: u32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub width: f32,
    pub height: f32,
    pub bird: Bird,
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub high_score: u64,
}

impl RenderSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One open game view
pub struct GameSession<F: FrameScheduler = FrameQueue> {
    state: GameState,
    high_score: HighScore,
    store: Box<dyn RemoteScoreStore>,
    subscription: Option<Subscription>,
    frames: F,
    pending_frame: Option<FrameHandle>,
    /// Jump pressed since the last tick
    pending_jump: bool,
    open: bool,
    stats: SessionStats,
}

impl<F: FrameScheduler> GameSession<F> {
    /// Open a session in the Start phase and subscribe to the high score
    pub fn new(config: GameConfig, store: Box<dyn RemoteScoreStore>, frames: F, seed: u64) -> Self {
        let mut session = Self {
            state: GameState::new(config, seed),
            high_score: HighScore::new(),
            store,
            subscription: None,
            frames,
            pending_frame: None,
            pending_jump: false,
            open: false,
            stats: SessionStats::default(),
        };
        session.mount();
        session
    }

    /// Open a session against the store named in `config`, playing offline
    /// if it can't be reached
    pub fn connect(config: GameConfig, frames: F, seed: u64) -> Self {
        let store = store::connect_or_offline(&config.store);
        Self::new(config, store, frames, seed)
    }

    /// Subscribe to the high score if not already open
    pub fn mount(&mut self) {
        if self.open {
            return;
        }
        self.open = true;

        let key = &self.state.config.store.key;
        match self.store.subscribe(key) {
            Ok(sub) => {
                log::info!("Subscribed to '{}' on {} store", key, self.store.name());
                self.subscription = Some(sub);
                self.poll_remote();
            }
            Err(e) => log::warn!("High score subscription failed: {}", e),
        }
    }

    /// Jump input. Starts a run from Start/GameOver, flaps while Playing.
    pub fn jump(&mut self, now_ms: f64) {
        if !self.open {
            self.mount();
        }
        match self.state.phase {
            GamePhase::Playing => self.pending_jump = true,
            GamePhase::Start | GamePhase::GameOver => self.start_run(now_ms),
        }
    }

    /// Explicit retry from the game over screen
    pub fn retry(&mut self, now_ms: f64) {
        if self.state.phase == GamePhase::GameOver {
            self.start_run(now_ms);
        }
    }

    /// Close the view: cancel the pending frame, unsubscribe, back to Start.
    /// A write already sent to the store is not recalled.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.cancel_frame();
        if let Some(sub) = self.subscription.take() {
            sub.unsubscribe();
        }
        self.pending_jump = false;
        self.state.close();
        self.open = false;
        log::info!("Game closed");
    }

    /// Frame callback. Runs one tick if `handle` is the outstanding request;
    /// stale or cancelled handles are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle, now_ms: f64) -> Vec<GameEvent> {
        if self.pending_frame != Some(handle) {
            log::debug!("Ignoring stale frame {:?}", handle);
            return Vec::new();
        }
        self.pending_frame = None;

        self.poll_remote();
        if self.state.phase != GamePhase::Playing {
            return Vec::new();
        }

        let input = TickInput {
            jump: std::mem::take(&mut self.pending_jump),
        };
        let events = tick(&mut self.state, &input, now_ms);

        for event in &events {
            if let GameEvent::GameOver { score, .. } = *event {
                self.finish_run(score);
            }
        }

        if self.state.phase == GamePhase::Playing {
            self.pending_frame = Some(self.frames.request_frame());
        }
        events
    }

    /// Apply store pushes. Returns true if the displayed high score changed.
    pub fn poll_remote(&mut self) -> bool {
        let Some(sub) = &self.subscription else {
            return false;
        };
        let mut changed = false;
        for value in sub.try_iter() {
            changed |= self.high_score.observe_remote(value);
        }
        changed
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            phase: self.state.phase,
            width: self.state.config.width,
            height: self.state.config.height,
            bird: self.state.bird,
            obstacles: self.state.obstacles.clone(),
            score: self.state.score(),
            high_score: self.high_score.displayed(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for tools and demos. Game rules are not re-checked.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn high_score(&self) -> &HighScore {
        &self.high_score
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    pub fn frames(&self) -> &F {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut F {
        &mut self.frames
    }

    fn start_run(&mut self, now_ms: f64) {
        self.cancel_frame();
        self.pending_jump = false;
        self.state.start(now_ms);
        self.stats.runs += 1;
        self.pending_frame = Some(self.frames.request_frame());
    }

    fn finish_run(&mut self, score: u64) {
        self.stats.best_score = self.stats.best_score.max(score);
        let key = &self.state.config.store.key;
        if self
            .high_score
            .submit(score, self.store.as_ref(), key)
            .is_some()
        {
            self.stats.new_high_scores += 1;
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.frames.cancel_frame(handle);
        }
    }
}

impl GameSession<FrameQueue> {
    /// Run the due frame, if any. Hosts call this once per display refresh.
    pub fn pump(&mut self, now_ms: f64) -> Vec<GameEvent> {
        match self.frames.take_due() {
            Some(handle) => self.on_frame(handle, now_ms),
            None => {
                self.poll_remote();
                Vec::new()
            }
        }
    }
}
