//! Lifecycle host: mount/unmount, fixed-timestep loop, scoring hooks

use std::rc::Rc;

use glam::Vec2;

use super::input::Key;
use super::{Game, GameContext, GameInfo, GamePhase, LifecycleEvent, Overlay, Score};
use crate::consts::*;
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::storage::KeyValueStore;
use crate::surface::{Surface, TextAlign};
use crate::theme::Theme;

/// Outcome of the last finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub score: u64,
    pub best: u64,
    pub rank: Option<usize>,
    pub new_best: bool,
}

/// Wall-clock milliseconds for high score timestamps
#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Owns a game and drives its lifecycle
pub struct GameHost<G: Game> {
    game: G,
    info: GameInfo,
    ctx: GameContext,
    phase: GamePhase,
    store: Rc<dyn KeyValueStore>,
    high_scores: HighScores,
    settings: Settings,
    seed: u64,
    round: u64,
    accumulator: f32,
    /// Timestamp of the previous frame (None after mount, resume, unmount)
    last_time: Option<f64>,
    // FPS tracking
    frame_times: [Option<f64>; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
    events: Vec<LifecycleEvent>,
    last_reported_score: u64,
    new_best_reported: bool,
    milestone_step: Option<u64>,
    next_milestone: u64,
    last_result: Option<RoundResult>,
}

impl<G: Game> GameHost<G> {
    pub fn new(
        game: G,
        store: Rc<dyn KeyValueStore>,
        settings: Settings,
        theme: Theme,
        seed: u64,
    ) -> Self {
        let info = game.info();
        let high_scores = HighScores::load(store.as_ref(), info.id);
        let mut ctx = GameContext::new(seed, Vec2::ZERO, theme, settings.max_particles());
        ctx.score = Score::new(high_scores.top_score().unwrap_or(0));
        ctx.set_shake_enabled(settings.effective_screen_shake());
        Self {
            game,
            info,
            ctx,
            phase: GamePhase::Unmounted,
            store,
            high_scores,
            settings,
            seed,
            round: 0,
            accumulator: 0.0,
            last_time: None,
            frame_times: [None; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
            events: Vec::new(),
            last_reported_score: 0,
            new_best_reported: false,
            milestone_step: None,
            next_milestone: 0,
            last_result: None,
        }
    }

    /// Emit `Milestone` every `step` points (None disables)
    pub fn with_milestones(mut self, step: Option<u64>) -> Self {
        self.milestone_step = step.filter(|s| *s > 0);
        self.next_milestone = self.milestone_step.unwrap_or(0);
        self
    }

    pub fn info(&self) -> GameInfo {
        self.info
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    /// Input sink for platform event handlers
    pub fn input_mut(&mut self) -> &mut super::InputState {
        &mut self.ctx.input
    }

    pub fn score(&self) -> &Score {
        &self.ctx.score
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn last_result(&self) -> Option<RoundResult> {
        self.last_result
    }

    /// Attach to a surface of the given size; runs `setup` then `initialize`
    pub fn mount(&mut self, width: f32, height: f32) -> bool {
        if self.phase != GamePhase::Unmounted {
            log::warn!("{} is already mounted", self.info.id);
            return false;
        }
        self.ctx.size = Vec2::new(width, height);
        self.game.setup(&mut self.ctx);
        self.begin_round();
        self.phase = GamePhase::Ready;
        self.events.push(LifecycleEvent::Mounted);
        log::info!("Mounted {} ({}x{})", self.info.id, width, height);
        true
    }

    /// Detach; runs `cleanup`. An unfinished round is discarded.
    pub fn unmount(&mut self) -> bool {
        if self.phase == GamePhase::Unmounted {
            return false;
        }
        self.game.cleanup(&mut self.ctx);
        self.ctx.particles.clear();
        self.ctx.input.reset();
        self.phase = GamePhase::Unmounted;
        self.last_time = None;
        self.accumulator = 0.0;
        self.events.push(LifecycleEvent::Unmounted);
        log::info!("Unmounted {}", self.info.id);
        true
    }

    fn round_seed(&self) -> u64 {
        self.seed ^ self.round.wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }

    fn begin_round(&mut self) {
        self.round += 1;
        let seed = self.round_seed();
        self.ctx.begin_round(seed);
        self.game.initialize(&mut self.ctx);
        self.accumulator = 0.0;
        self.last_reported_score = self.ctx.score.value;
        self.new_best_reported = false;
        self.next_milestone = self.milestone_step.unwrap_or(0);
        self.last_result = None;
    }

    /// Ready -> Playing, or GameOver -> fresh round -> Playing
    pub fn start(&mut self) -> bool {
        match self.phase {
            GamePhase::Ready => {}
            GamePhase::GameOver => self.begin_round(),
            _ => return false,
        }
        self.phase = GamePhase::Playing;
        self.events.push(LifecycleEvent::Started);
        log::info!("{} round {} started", self.info.id, self.round);
        true
    }

    /// Abandon the current round and play a fresh one
    pub fn restart(&mut self) -> bool {
        if self.phase == GamePhase::Unmounted {
            return false;
        }
        self.begin_round();
        self.phase = GamePhase::Playing;
        self.events.push(LifecycleEvent::Started);
        log::info!("{} restarted (round {})", self.info.id, self.round);
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::Paused;
        // Releases are lost while paused; don't leave keys stuck down
        self.ctx.input.reset();
        self.events.push(LifecycleEvent::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.phase = GamePhase::Playing;
        // Don't fast-forward the time spent paused
        self.accumulator = 0.0;
        self.last_time = None;
        self.events.push(LifecycleEvent::Resumed);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Tab hidden or window blurred
    pub fn on_visibility_hidden(&mut self) {
        if self.pause() {
            log::info!("Auto-paused {} (page hidden)", self.info.id);
        }
    }

    /// End the round: record the score and persist high scores
    pub fn game_over(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let score = self.ctx.score.value;
        let new_best = self.ctx.score.is_new_best();
        let rank = self.high_scores.add_score(score, self.ctx.level, now_ms());
        if rank.is_some() {
            self.high_scores.save(self.store.as_ref(), self.info.id);
        }
        let best = self.ctx.score.best;
        self.last_result = Some(RoundResult {
            score,
            best,
            rank,
            new_best,
        });
        self.phase = GamePhase::GameOver;
        self.events.push(LifecycleEvent::GameOver { score, best, rank });
        log::info!(
            "{} game over: score {} (best {}, rank {:?})",
            self.info.id,
            score,
            best,
            rank
        );
        true
    }

    pub fn apply_theme(&mut self, theme: &Theme) {
        self.ctx.theme = theme.clone();
        self.game.on_theme_changed(theme);
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.ctx.particles.set_capacity(settings.max_particles());
        self.ctx.set_shake_enabled(settings.effective_screen_shake());
        self.settings = settings.clone();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.ctx.size = Vec2::new(width, height);
        self.game.on_resize(self.ctx.size);
    }

    /// Advance by the time since the previous animation frame
    ///
    /// Returns the number of fixed steps run.
    pub fn frame(&mut self, time_ms: f64) -> u32 {
        if self.phase == GamePhase::Unmounted {
            return 0;
        }
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => FIXED_DT,
        };
        self.last_time = Some(time_ms);
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= FIXED_DT && substeps < MAX_SUBSTEPS {
            self.step(FIXED_DT);
            self.accumulator -= FIXED_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS && self.accumulator >= FIXED_DT {
            // Too far behind to catch up; drop the backlog
            self.accumulator = 0.0;
        }

        self.track_fps(time_ms);
        substeps
    }

    fn track_fps(&mut self, time: f64) {
        self.frame_times[self.frame_index] = Some(time);
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample is the one we are about to overwrite next
        if let Some(oldest_time) = self.frame_times[self.frame_index] {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    /// One fixed update
    pub fn step(&mut self, dt: f32) {
        match self.phase {
            GamePhase::Unmounted => return,
            GamePhase::Ready => {
                if self.start_requested() {
                    self.start();
                }
            }
            GamePhase::GameOver => {
                self.ctx.particles.update(dt);
                self.ctx.decay_shake();
                if self.start_requested() {
                    self.start();
                }
            }
            GamePhase::Paused => {
                if self.ctx.input.just_pressed(Key::Pause) || self.start_requested() {
                    self.resume();
                }
            }
            GamePhase::Playing => {
                if self.ctx.input.just_pressed(Key::Pause) {
                    self.pause();
                } else {
                    self.play_step(dt);
                }
            }
        }
        self.ctx.input.end_frame();
    }

    fn start_requested(&self) -> bool {
        self.ctx.input.just_pressed(Key::Action) || self.ctx.input.tapped()
    }

    fn play_step(&mut self, dt: f32) {
        self.ctx.elapsed += dt;
        self.game.update(&mut self.ctx, dt);
        self.ctx.particles.update(dt);
        self.ctx.decay_shake();

        for cue in self.ctx.drain_cues() {
            self.events.push(LifecycleEvent::Cue(cue));
        }

        let score = self.ctx.score.value;
        if score != self.last_reported_score {
            self.last_reported_score = score;
            self.events.push(LifecycleEvent::ScoreChanged { score });
            if let Some(step) = self.milestone_step {
                while score >= self.next_milestone {
                    self.events.push(LifecycleEvent::Milestone {
                        score: self.next_milestone,
                    });
                    self.next_milestone += step;
                }
            }
            if !self.new_best_reported
                && self.ctx.score.is_new_best()
                && self.ctx.score.best_at_round_start() > 0
            {
                self.new_best_reported = true;
                self.events.push(LifecycleEvent::NewBest { score });
            }
        }

        if self.ctx.take_game_over_request() {
            self.game_over();
        }
    }

    /// Overlay for the current phase
    pub fn overlay(&self) -> Option<Overlay> {
        match self.phase {
            GamePhase::Ready => Some(Overlay::Start),
            GamePhase::Paused => Some(Overlay::Paused),
            GamePhase::GameOver => self.last_result.map(|r| Overlay::GameOver {
                score: r.score,
                best: r.best,
                rank: r.rank,
                new_best: r.new_best,
            }),
            GamePhase::Playing | GamePhase::Unmounted => None,
        }
    }

    /// Screen displacement for the current shake
    pub fn shake_offset(&self) -> Vec2 {
        let shake = self.ctx.screen_shake();
        if shake <= 0.0 {
            return Vec2::ZERO;
        }
        let t = self.ctx.elapsed * 60.0;
        Vec2::new((t * 1.7).sin(), (t * 2.3).cos()) * SHAKE_PIXELS * shake
    }

    /// Draw game, particles, overlay and HUD extras
    pub fn draw(&self, surface: &mut dyn Surface) {
        if self.phase == GamePhase::Unmounted {
            return;
        }
        surface.set_offset(self.shake_offset());
        self.game.draw(surface, &self.ctx);
        self.ctx.particles.draw(surface);
        surface.set_offset(Vec2::ZERO);

        if let Some(overlay) = self.overlay() {
            overlay.draw(surface, &self.ctx.theme, self.info.title);
        }
        if self.settings.show_fps {
            let size = surface.size();
            surface.text(
                &format!("{} FPS", self.fps),
                Vec2::new(size.x - 8.0, 14.0),
                12.0,
                self.ctx.theme.palette.text_muted,
                TextAlign::Right,
            );
        }
    }

    /// Drain events raised since the last call
    pub fn drain_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Text for the share button after a round
    pub fn share_message(&self) -> Option<String> {
        let result = self.last_result?;
        let brag = if result.new_best { " (new personal best!)" } else { "" };
        Some(format!(
            "I scored {} in {}{}. Can you beat it?",
            result.score, self.info.title, brag
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cue;
    use crate::storage::{FailingStore, MemoryStore};
    use crate::surface::RecordingSurface;

    /// Scores a point per step; ends when told to
    #[derive(Default)]
    struct Counter {
        setups: u32,
        inits: u32,
        cleanups: u32,
        updates: u32,
        end_after: Option<u32>,
        theme_changes: u32,
    }

    impl Game for Counter {
        fn info(&self) -> GameInfo {
            GameInfo {
                id: "counter",
                title: "Counter",
            }
        }

        fn setup(&mut self, _ctx: &mut GameContext) {
            self.setups += 1;
        }

        fn initialize(&mut self, _ctx: &mut GameContext) {
            self.inits += 1;
            self.updates = 0;
        }

        fn update(&mut self, ctx: &mut GameContext, _dt: f32) {
            self.updates += 1;
            ctx.score.add(1);
            if self.updates % 5 == 0 {
                ctx.cue(Cue::Collect);
            }
            if Some(self.updates) == self.end_after {
                ctx.end_game();
            }
        }

        fn draw(&self, surface: &mut dyn Surface, ctx: &GameContext) {
            surface.clear(ctx.theme.palette.background);
        }

        fn cleanup(&mut self, _ctx: &mut GameContext) {
            self.cleanups += 1;
        }

        fn on_theme_changed(&mut self, _theme: &Theme) {
            self.theme_changes += 1;
        }
    }

    fn host_with(store: Rc<dyn KeyValueStore>, end_after: Option<u32>) -> GameHost<Counter> {
        let game = Counter {
            end_after,
            ..Default::default()
        };
        GameHost::new(game, store, Settings::default(), Theme::builtin().remove(0), 1234)
    }

    fn host(end_after: Option<u32>) -> GameHost<Counter> {
        host_with(Rc::new(MemoryStore::new()), end_after)
    }

    #[test]
    fn test_mount_runs_setup_then_initialize_once() {
        let mut host = host(None);
        assert_eq!(host.phase(), GamePhase::Unmounted);
        assert!(host.mount(320.0, 240.0));
        assert!(!host.mount(320.0, 240.0));
        assert_eq!(host.phase(), GamePhase::Ready);
        assert_eq!(host.game().setups, 1);
        assert_eq!(host.game().inits, 1);
        assert_eq!(host.context().size, Vec2::new(320.0, 240.0));
        assert_eq!(host.drain_events(), vec![LifecycleEvent::Mounted]);
    }

    #[test]
    fn test_no_updates_until_started() {
        let mut host = host(None);
        host.mount(100.0, 100.0);
        for _ in 0..10 {
            host.step(FIXED_DT);
        }
        assert_eq!(host.game().updates, 0);
        assert_eq!(host.overlay(), Some(Overlay::Start));

        host.input_mut().key_down(Key::Action);
        host.step(FIXED_DT);
        assert_eq!(host.phase(), GamePhase::Playing);
        // The press that started the round is not replayed into the game
        assert_eq!(host.game().updates, 0);
        host.step(FIXED_DT);
        assert_eq!(host.game().updates, 1);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut host = host(None);
        host.mount(100.0, 100.0);
        assert!(!host.pause(), "cannot pause before starting");
        host.start();
        host.step(FIXED_DT);
        assert!(host.toggle_pause());
        assert_eq!(host.phase(), GamePhase::Paused);
        for _ in 0..10 {
            host.step(FIXED_DT);
        }
        assert_eq!(host.game().updates, 1);
        assert_eq!(host.overlay(), Some(Overlay::Paused));

        host.input_mut().key_down(Key::Pause);
        host.step(FIXED_DT);
        assert_eq!(host.phase(), GamePhase::Playing);
        let events = host.drain_events();
        assert!(events.contains(&LifecycleEvent::Paused));
        assert!(events.contains(&LifecycleEvent::Resumed));
    }

    #[test]
    fn test_visibility_auto_pause_only_while_playing() {
        let mut host = host(None);
        host.mount(100.0, 100.0);
        host.on_visibility_hidden();
        assert_eq!(host.phase(), GamePhase::Ready);
        host.start();
        host.on_visibility_hidden();
        assert_eq!(host.phase(), GamePhase::Paused);
    }

    #[test]
    fn test_game_over_records_high_score() {
        let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
        let mut host = host_with(store.clone(), Some(7));
        host.mount(100.0, 100.0);
        host.start();
        for _ in 0..10 {
            host.step(FIXED_DT);
        }
        assert_eq!(host.phase(), GamePhase::GameOver);
        assert_eq!(host.game().updates, 7);
        let result = host.last_result().unwrap();
        assert_eq!(result.score, 7);
        assert_eq!(result.rank, Some(1));
        assert!(result.new_best);
        assert!(host.drain_events().contains(&LifecycleEvent::GameOver {
            score: 7,
            best: 7,
            rank: Some(1)
        }));

        // A new host for the same game sees the persisted best
        let again = host_with(store, None);
        assert_eq!(again.score().best, 7);
        assert_eq!(again.high_scores().top_score(), Some(7));
    }

    #[test]
    fn test_start_after_game_over_begins_fresh_round() {
        let mut host = host(Some(3));
        host.mount(100.0, 100.0);
        host.start();
        for _ in 0..3 {
            host.step(FIXED_DT);
        }
        assert_eq!(host.phase(), GamePhase::GameOver);
        assert!(host.share_message().unwrap().contains("I scored 3 in Counter"));

        host.input_mut().pointer_press(Vec2::new(5.0, 5.0));
        host.step(FIXED_DT);
        assert_eq!(host.phase(), GamePhase::Playing);
        assert_eq!(host.game().inits, 2);
        assert_eq!(host.score().value, 0);
        assert_eq!(host.score().best, 3);
        assert!(host.last_result().is_none());
    }

    #[test]
    fn test_cues_score_and_milestones() {
        let mut host = host(None).with_milestones(Some(4));
        host.mount(100.0, 100.0);
        host.start();
        host.drain_events();
        for _ in 0..10 {
            host.step(FIXED_DT);
        }
        let events = host.drain_events();
        let cues = events
            .iter()
            .filter(|e| matches!(e, LifecycleEvent::Cue(Cue::Collect)))
            .count();
        assert_eq!(cues, 2);
        let milestones: Vec<u64> = events
            .iter()
            .filter_map(|e| match e {
                LifecycleEvent::Milestone { score } => Some(*score),
                _ => None,
            })
            .collect();
        assert_eq!(milestones, vec![4, 8]);
        assert!(events.contains(&LifecycleEvent::ScoreChanged { score: 10 }));
    }

    #[test]
    fn test_new_best_reported_once_when_beating_stored_best() {
        let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
        let mut first = host_with(store.clone(), Some(3));
        first.mount(100.0, 100.0);
        first.start();
        for _ in 0..3 {
            first.step(FIXED_DT);
        }
        // No stored best to beat on the very first round
        assert!(!first
            .drain_events()
            .iter()
            .any(|e| matches!(e, LifecycleEvent::NewBest { .. })));

        let mut second = host_with(store, Some(6));
        second.mount(100.0, 100.0);
        second.start();
        for _ in 0..6 {
            second.step(FIXED_DT);
        }
        let bests: Vec<_> = second
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, LifecycleEvent::NewBest { .. }))
            .collect();
        assert_eq!(bests, vec![LifecycleEvent::NewBest { score: 4 }]);
    }

    #[test]
    fn test_frame_fixed_steps_and_backlog_drop() {
        let mut host = host(None);
        host.mount(100.0, 100.0);
        host.start();
        // First frame runs exactly one step
        assert_eq!(host.frame(1000.0), 1);
        // 60ms later: three 1/60s steps, remainder carried
        assert_eq!(host.frame(1060.0), 3);
        // A multi-second stall is clamped and capped
        assert_eq!(host.frame(5000.0), MAX_SUBSTEPS);
        assert_eq!(host.frame(5000.0), 0);
    }

    #[test]
    fn test_unmount_runs_cleanup_and_stops_frames() {
        let mut host = host(None);
        host.mount(100.0, 100.0);
        host.start();
        assert!(host.unmount());
        assert!(!host.unmount());
        assert_eq!(host.game().cleanups, 1);
        assert_eq!(host.frame(16.0), 0);
        assert!(host.drain_events().contains(&LifecycleEvent::Unmounted));

        // Remounting runs setup again
        assert!(host.mount(100.0, 100.0));
        assert_eq!(host.game().setups, 2);
    }

    #[test]
    fn test_settings_and_theme_applied() {
        let mut host = host(None);
        host.mount(100.0, 100.0);
        let mut settings = Settings::default();
        settings.particles = false;
        settings.show_fps = true;
        host.apply_settings(&settings);
        assert_eq!(host.context().particles.capacity(), 0);

        let neon = Theme::builtin().remove(1);
        host.apply_theme(&neon);
        assert_eq!(host.game().theme_changes, 1);
        assert_eq!(host.context().theme.name, "neon");

        let mut surface = RecordingSurface::new(100.0, 100.0);
        host.draw(&mut surface);
        let texts = surface.texts();
        assert!(texts.contains(&"Counter"));
        assert!(texts.iter().any(|t| t.ends_with("FPS")));
    }

    #[test]
    fn test_game_over_survives_failing_store() {
        let mut host = host_with(Rc::new(FailingStore), Some(4));
        assert!(host.high_scores().is_empty());
        host.mount(100.0, 100.0);
        host.start();
        for _ in 0..4 {
            host.step(FIXED_DT);
        }
        assert_eq!(host.phase(), GamePhase::GameOver);
        assert_eq!(host.last_result().map(|r| r.rank), Some(Some(1)));
        assert!(host.drain_events().contains(&LifecycleEvent::GameOver {
            score: 4,
            best: 4,
            rank: Some(1)
        }));
        // The in-memory table still has the round
        assert_eq!(host.high_scores().top_score(), Some(4));
    }

    #[test]
    fn test_fps_over_full_window() {
        let mut host = host(None);
        host.mount(100.0, 100.0);
        host.start();
        let frame_ms = 1000.0 / 60.0;
        for i in 0..FPS_WINDOW - 1 {
            host.frame(1000.0 + i as f64 * frame_ms);
        }
        assert_eq!(host.fps(), 0, "no reading until the window fills");
        for i in FPS_WINDOW - 1..FPS_WINDOW + 5 {
            host.frame(1000.0 + i as f64 * frame_ms);
        }
        assert_eq!(host.fps(), 60);
    }

    #[test]
    fn test_frame_at_time_zero_is_a_real_timestamp() {
        let mut host = host(None);
        host.mount(100.0, 100.0);
        host.start();
        assert_eq!(host.frame(0.0), 1);
        // 60ms after a zero timestamp is three steps, not a fresh first frame
        assert_eq!(host.frame(60.0), 3);
    }

    #[test]
    fn test_restart_mid_round() {
        let mut host = host(None);
        assert!(!host.restart());
        host.mount(100.0, 100.0);
        host.start();
        for _ in 0..4 {
            host.step(FIXED_DT);
        }
        assert!(host.restart());
        assert_eq!(host.score().value, 0);
        assert_eq!(host.phase(), GamePhase::Playing);
        // Abandoned rounds are not recorded
        assert!(host.high_scores().is_empty());
    }
}
