//! Flappy Egg entry point
//!
//! On the web this hooks the game into the page: a requestAnimationFrame
//! loop, keyboard/click input and a small DOM HUD. Natively it runs
//! autopilot games headlessly against a shared in-memory store.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use flappy_egg::platform::{Clock, FrameQueue, SystemClock};
    use flappy_egg::sim::GamePhase;
    use flappy_egg::{GameConfig, GameSession};

    // Hands each frame's snapshot to the page, if it registered a renderer
    #[wasm_bindgen(inline_js = "
        export function render_snapshot(json) {
            if (typeof window.flappyEggRender === 'function') {
                window.flappyEggRender(json);
            }
        }
    ")]
    extern "C" {
        fn render_snapshot(json: &str);
    }

    /// Game instance holding all state
    struct Game {
        session: GameSession<FrameQueue>,
        clock: SystemClock,
        last_phase: GamePhase,
    }

    impl Game {
        fn new(config: GameConfig, seed: u64) -> Self {
            Self {
                session: GameSession::connect(config, FrameQueue::new(), seed),
                clock: SystemClock,
                last_phase: GamePhase::Start,
            }
        }

        fn now(&self) -> f64 {
            self.clock.now_ms()
        }

        fn update(&mut self) {
            let now = self.now();
            self.session.pump(now);
        }

        fn render(&self) {
            match self.session.snapshot().to_json() {
                Ok(json) => render_snapshot(&json),
                Err(e) => log::warn!("Snapshot encode failed: {}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&self.session.score().to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-high") {
                let high = self.session.high_score().displayed();
                el.set_text_content(Some(&format!("High Score: {}", high)));
            }

            // Overlays only change with the phase
            let phase = self.session.phase();
            if phase != self.last_phase {
                let show = |id: &str, visible: bool| {
                    if let Some(el) = document.get_element_by_id(id) {
                        let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
                    }
                };
                show("start-prompt", phase == GamePhase::Start);
                show("game-over", phase == GamePhase::GameOver);
                if phase == GamePhase::GameOver {
                    if let Some(el) = document.get_element_by_id("final-score") {
                        el.set_text_content(Some(&format!("Score: {}", self.session.score())));
                    }
                }
                self.last_phase = phase;
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Egg starting...");

        let config = GameConfig::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(config, seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());
        request_animation_frame(game);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Space bar
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    let now = g.now();
                    g.session.jump(now);
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click/tap on the playfield
        if let Some(field) = document.get_element_by_id("playfield") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
                event.stop_propagation();
                let mut g = game.borrow_mut();
                let now = g.now();
                g.session.jump(now);
            });
            let _ = field.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("retry-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
                event.stop_propagation();
                let mut g = game.borrow_mut();
                let now = g.now();
                g.session.retry(now);
                log::info!("Retry");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("close-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
                event.stop_propagation();
                game.borrow_mut().session.close();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use flappy_egg::platform::{Clock, FrameQueue, ManualClock, SystemClock};
    use flappy_egg::sim::{GameEvent, GamePhase, autopilot};
    use flappy_egg::store::{self, MemoryScoreStore, RemoteScoreStore};
    use flappy_egg::{GameConfig, GameSession, StoreBackend};

    /// Simulated display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up on a run after two simulated minutes
    const MAX_TICKS: u32 = 60 * 120;

    /// Two clients sharing one store take turns playing with the autopilot
    pub fn run(config: GameConfig, runs: u32) {
        let shared = MemoryScoreStore::new();
        let make_store = |config: &GameConfig| -> Box<dyn RemoteScoreStore> {
            match config.store.backend {
                StoreBackend::Memory => Box::new(shared.clone()),
                _ => store::connect_or_offline(&config.store),
            }
        };

        let seed = SystemClock.now_ms() as u64;
        let mut clients = [
            GameSession::new(config.clone(), make_store(&config), FrameQueue::new(), seed),
            GameSession::new(config.clone(), make_store(&config), FrameQueue::new(), seed ^ 0x5eed),
        ];
        let clock = ManualClock::new(SystemClock.now_ms());

        for run in 0..runs {
            let player = (run % 2) as usize;
            let score = play_one(&mut clients[player], &clock);
            for client in clients.iter_mut() {
                client.poll_remote();
            }
            println!(
                "run {:>2} client {} score {:>3} | high score seen by clients: {} / {}",
                run + 1,
                player,
                score,
                clients[0].high_score().displayed(),
                clients[1].high_score().displayed(),
            );
        }

        for (i, client) in clients.iter_mut().enumerate() {
            let stats = client.stats();
            log::info!(
                "client {}: {} runs, best {}, {} new high scores",
                i,
                stats.runs,
                stats.best_score,
                stats.new_high_scores
            );
            client.close();
        }
    }

    fn play_one(session: &mut GameSession<FrameQueue>, clock: &ManualClock) -> u64 {
        session.jump(clock.now_ms());

        for _ in 0..MAX_TICKS {
            clock.advance(FRAME_MS);
            if autopilot::should_flap(session.state()) {
                session.jump(clock.now_ms());
            }
            for event in session.pump(clock.now_ms()) {
                if let GameEvent::GameOver { score, cause } = event {
                    log::debug!("Run ended by {:?}", cause);
                    return score;
                }
            }
            if session.phase() != GamePhase::Playing {
                break;
            }
        }

        log::info!("Run capped at {} ticks", MAX_TICKS);
        let score = session.score();
        session.close();
        score
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Egg (native) starting...");
    log::info!("Web build required for play - running headless autopilot demo");

    // Usage: flappy-egg [runs] [memory|offline]
    let mut config = flappy_egg::GameConfig::load();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let runs = args
        .first()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(4);

    if let Some(arg) = args.get(1) {
        match flappy_egg::StoreBackend::parse(arg) {
            Some(backend) => config.store.backend = backend,
            None => log::warn!("Unknown store backend '{}', keeping {}", arg, config.store.backend.as_str()),
        }
    }
    log::info!("High score store: {}", config.store.backend.as_str());

    headless::run(config, runs);
}
