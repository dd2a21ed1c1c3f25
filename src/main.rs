//! PlayPoints Neon Snake entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use playpoints_snake::Settings;
    use playpoints_snake::leaderboard::Leaderboard;
    use playpoints_snake::ledger::{LocalLedger, Role};
    use playpoints_snake::platform;
    use playpoints_snake::renderer::CanvasRenderer;
    use playpoints_snake::rewards::{SettleOutcome, settle_session};
    use playpoints_snake::session::GameSession;
    use playpoints_snake::sim::{Direction, Grid};
    use playpoints_snake::{LedgerError, RewardLedger};

    /// Profile used until a hosted account backend is wired in
    const LOCAL_UID: &str = "local-player";
    const LOCAL_NAME: &str = "Player";
    const LOCAL_EMAIL: &str = "player@playpoints.local";

    /// App instance holding all state
    struct App {
        session: GameSession,
        ledger: LocalLedger,
        renderer: CanvasRenderer,
        settings: Settings,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl App {
        fn new(
            session: GameSession,
            ledger: LocalLedger,
            renderer: CanvasRenderer,
            settings: Settings,
        ) -> Self {
            Self {
                session,
                ledger,
                renderer,
                settings,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// One animation frame: advance fixed ticks, draw, settle if a run
        /// just ended.
        fn frame(&mut self, time: f64) {
            let elapsed = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;

            self.session.advance(elapsed);
            self.renderer.draw(&self.session.snapshot(), &self.settings);
            set_text("#currentScore", &self.session.snapshot().score.to_string());

            self.track_fps(time);
            if self.settings.show_fps {
                set_text("#fpsCounter", &format!("{} FPS", self.fps));
            }

            if let Some(final_score) = self.session.take_result() {
                self.finish_run(final_score);
            }
        }

        /// Rolling FPS over the last 60 frames
        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60_000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Reward conversion, off the tick path
        fn finish_run(&mut self, final_score: u32) {
            let outcome =
                settle_session(&mut self.ledger, LOCAL_UID, final_score, platform::now_ms());
            self.ledger.save();

            show_overlay(final_score);
            show_toast(&outcome.notice(), matches!(outcome, SettleOutcome::Failed { .. }));
            self.refresh_stats();
        }

        /// Points, games-played and leaderboard panels
        fn refresh_stats(&self) {
            if let Some(user) = self.ledger.user(LOCAL_UID) {
                set_text("#userPoints", &user.points.to_string());
                set_text("#totalGames", &user.games_played.to_string());
            }
            match self.render_leaderboard() {
                Ok(()) => {}
                Err(e) => log::warn!("leaderboard refresh failed: {e}"),
            }
        }

        fn render_leaderboard(&self) -> Result<(), LedgerError> {
            let board = Leaderboard::from_users(&self.ledger.users()?);
            let document = web_sys::window().unwrap().document().unwrap();
            let Some(tbody) = document
                .query_selector("#leaderboardTable tbody")
                .ok()
                .flatten()
            else {
                return Ok(());
            };

            if board.is_empty() {
                tbody.set_inner_html(
                    "<tr><td colspan=\"4\">No players yet. Be the first!</td></tr>",
                );
                return Ok(());
            }

            let your_rank = board.rank_of(LOCAL_EMAIL);
            let mut html = String::new();
            for row in &board.rows {
                let you = if Some(row.rank) == your_rank { " (You)" } else { "" };
                html.push_str(&format!(
                    "<tr><td>{}</td><td>{}{}</td><td>{}</td><td>{}</td></tr>",
                    row.rank, row.username, you, row.level, row.points
                ));
            }
            tbody.set_inner_html(&html);
            Ok(())
        }
    }

    fn set_text(selector: &str, text: &str) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn show_overlay(final_score: u32) {
        let document = web_sys::window().unwrap().document().unwrap();
        set_text("#overlayTitle", "Game Over");
        set_text("#overlayScore", &format!("Final Score: {final_score}"));
        if let Some(el) = document.get_element_by_id("gameOverlay") {
            let _ = el.class_list().remove_1("hidden");
        }
    }

    fn hide_overlay() {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(el) = document.get_element_by_id("gameOverlay") {
            let _ = el.class_list().add_1("hidden");
        }
    }

    fn show_toast(msg: &str, is_error: bool) {
        let document = web_sys::window().unwrap().document().unwrap();
        set_text("#toastMsg", msg);
        if let Some(toast) = document.get_element_by_id("toast") {
            let _ = toast.class_list().add_1("show");
            if is_error {
                let _ = toast.class_list().add_1("error");
            } else {
                let _ = toast.class_list().remove_1("error");
            }
        }
        // The toast hides itself via a CSS animation; no timer needed here
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let dir = match event.key().as_str() {
                "ArrowUp" => Some(Direction::Up),
                "ArrowDown" => Some(Direction::Down),
                "ArrowLeft" => Some(Direction::Left),
                "ArrowRight" => Some(Direction::Right),
                _ => None,
            };
            if let Some(dir) = dir {
                // Keep arrow keys from scrolling the page
                event.prevent_default();
                app.borrow_mut().session.set_direction(dir);
            }
        });
        let _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_start_button(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(btn) = document.get_element_by_id("startGameBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                hide_overlay();
                let mut app = app.borrow_mut();
                app.session.start();
                set_text("#currentScore", "0");
                log::info!("New run started");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Bind a settings checkbox/button that flips one flag and persists.
    /// Toggles take effect on the next frame; the grid size and tick rate
    /// are fixed per page load.
    fn setup_settings_toggle(
        app: Rc<RefCell<App>>,
        element_id: &str,
        apply: fn(&mut Settings) -> bool,
    ) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(btn) = document.get_element_by_id(element_id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut app = app.borrow_mut();
                let enabled = apply(&mut app.settings);
                app.settings.save();
                log::info!("setting toggled -> {enabled}");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(f: &Closure<dyn FnMut(f64)>) {
        web_sys::window()
            .unwrap()
            .request_animation_frame(f.as_ref().unchecked_ref())
            .expect("requestAnimationFrame failed");
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("PlayPoints Neon Snake starting...");

        let settings = Settings::load();

        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("snakeCanvas")
            .expect("missing #snakeCanvas")
            .dyn_into()
            .expect("#snakeCanvas is not a canvas");

        // A bad canvas/cell combination is refused before any game starts
        let grid = Grid::new(canvas.width(), canvas.height(), settings.cell_size)
            .expect("canvas too small for a playable grid");

        let mut ledger = LocalLedger::load();
        ledger.ensure_user(LOCAL_UID, LOCAL_NAME, LOCAL_EMAIL, Role::User);

        let renderer = CanvasRenderer::new(&canvas).expect("canvas 2d init failed");
        let seed = platform::now_ms() as u64;
        let session = GameSession::new(grid, seed, settings.tick_ms);

        let app = Rc::new(RefCell::new(App::new(session, ledger, renderer, settings)));
        {
            let app = app.borrow();
            app.renderer.clear(&app.settings);
            app.refresh_stats();
        }

        setup_keyboard(app.clone());
        setup_start_button(app.clone());
        setup_settings_toggle(app.clone(), "toggleGridBtn", |s| {
            s.show_grid = !s.show_grid;
            s.show_grid
        });
        setup_settings_toggle(app.clone(), "toggleContrastBtn", |s| {
            s.high_contrast = !s.high_contrast;
            s.high_contrast
        });
        setup_settings_toggle(app.clone(), "toggleFpsBtn", |s| {
            s.show_fps = !s.show_fps;
            if !s.show_fps {
                set_text("#fpsCounter", "");
            }
            s.show_fps
        });

        // requestAnimationFrame loop
        let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(Closure::new(move |time: f64| {
            app.borrow_mut().frame(time);
            request_animation_frame(f.borrow().as_ref().unwrap());
        }));
        request_animation_frame(g.borrow().as_ref().unwrap());
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use playpoints_snake::consts::*;
    use playpoints_snake::leaderboard::Leaderboard;
    use playpoints_snake::ledger::{LocalLedger, Role};
    use playpoints_snake::rewards::settle_session;
    use playpoints_snake::sim::{Direction, GameState, Grid, TickOutcome, tick};
    use playpoints_snake::{RewardLedger, platform};

    env_logger::init();
    log::info!("PlayPoints Neon Snake (native) starting...");
    log::info!("Native mode runs a headless demo session - build for wasm32 for the web version");

    let grid = Grid::new(CANVAS_WIDTH, CANVAS_HEIGHT, CELL_SIZE).expect("default grid is valid");
    let mut state = GameState::new(grid, platform::now_ms() as u64);
    state.start();

    // Greedy bot: close the food gap on one axis per tick
    let final_score = loop {
        let head = state.head();
        let dir = if state.food.x != head.x {
            if state.food.x > head.x {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if state.food.y > head.y {
            Direction::Down
        } else {
            Direction::Up
        };
        state.set_direction(dir);

        match tick(&mut state) {
            TickOutcome::GameOver { final_score } => break final_score,
            _ if state.time_ticks > 5_000 => {
                state.stop();
                break state.score;
            }
            _ => {}
        }
    };

    let mut ledger = LocalLedger::new();
    ledger.ensure_user("demo", "Demo Player", "demo@playpoints.local", Role::User);
    let outcome = settle_session(&mut ledger, "demo", final_score, platform::now_ms());
    println!("{}", outcome.notice());

    if let Ok(users) = ledger.users() {
        for row in &Leaderboard::from_users(&users).rows {
            println!(
                "#{} {} - level {} - {} pts",
                row.rank, row.username, row.level, row.points
            );
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
