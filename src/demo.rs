//! Orb Runner: a small endless runner built from the shared components
//!
//! Dodge incoming blocks, grab orbs for points, pick up power-up capsules.
//! A collision ends the round unless a shield is up.

use glam::Vec2;
use rand::Rng;

use crate::components::{
    CollectibleConfig, CollectibleManager, GameTimer, LayerStyle, ObstacleSpawner,
    PowerUpManager, ScrollingBackground, SpawnerConfig,
};
use crate::game::{Cue, Game, GameContext, GameInfo};
use crate::geometry::Rect;
use crate::surface::{Surface, TextAlign};
use crate::theme::{Color, Theme};

const PLAYER_X: f32 = 80.0;
const PLAYER_RADIUS: f32 = 14.0;
/// Vertical speed (pixels/s)
const PLAYER_SPEED: f32 = 320.0;
/// Seconds between orb spawns
const ORB_INTERVAL: f32 = 0.7;
/// Chance an orb spawn is a power-up capsule instead
const CAPSULE_CHANCE: f64 = 0.12;
const MAGNET_RADIUS: f32 = 180.0;
const MAGNET_PULL: f32 = 420.0;
/// Points per obstacle dodged
const DODGE_POINTS: u64 = 5;

/// Timed effects granted by capsules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Power {
    /// Absorbs one collision
    Shield,
    /// Pulls nearby orbs in
    Magnet,
    DoublePoints,
}

impl Power {
    const ALL: [Power; 3] = [Power::Shield, Power::Magnet, Power::DoublePoints];

    pub fn duration(&self) -> f32 {
        match self {
            Power::Shield => 6.0,
            Power::Magnet => 8.0,
            Power::DoublePoints => 10.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Power::Shield => "Shield",
            Power::Magnet => "Magnet",
            Power::DoublePoints => "2x",
        }
    }

    fn color(&self, theme: &Theme) -> Color {
        match self {
            Power::Shield => theme.palette.secondary,
            Power::Magnet => theme.palette.warning,
            Power::DoublePoints => theme.palette.success,
        }
    }
}

/// What a collectible gives when picked up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pickup {
    Orb,
    Capsule(Power),
}

pub struct OrbRunner {
    player: Vec2,
    spawner: ObstacleSpawner,
    pickups: CollectibleManager<Pickup>,
    powers: PowerUpManager<Power>,
    survival: GameTimer,
    background: ScrollingBackground,
    orb_countdown: f32,
    /// Background layers to draw (quality setting)
    pub background_layers: usize,
}

impl Default for OrbRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbRunner {
    pub fn new() -> Self {
        Self {
            player: Vec2::new(PLAYER_X, 0.0),
            spawner: ObstacleSpawner::new(SpawnerConfig::default(), 0),
            pickups: CollectibleManager::new(CollectibleConfig {
                radius: 9.0,
                value: 10,
                lifetime: Some(8.0),
                max_items: 24,
            }),
            powers: PowerUpManager::new(),
            survival: GameTimer::stopwatch(),
            background: ScrollingBackground::new(0.0, 0.0, 0.0, 0),
            orb_countdown: ORB_INTERVAL,
            background_layers: 3,
        }
    }

    pub fn player(&self) -> Vec2 {
        self.player
    }

    pub fn powers(&self) -> &PowerUpManager<Power> {
        &self.powers
    }

    fn player_rect(&self) -> Rect {
        Rect::from_center(self.player, Vec2::splat(PLAYER_RADIUS * 1.6))
    }

    fn layout(&mut self, size: Vec2) {
        let lanes = [0.2, 0.4, 0.6, 0.8];
        self.spawner.config.lanes = lanes.iter().map(|f| size.y * f).collect();
        self.spawner.config.spawn_x = size.x;
        self.background.resize(size.x, size.y);
        self.player.y = self
            .player
            .y
            .clamp(PLAYER_RADIUS, (size.y - PLAYER_RADIUS).max(PLAYER_RADIUS));
    }

    fn steer(&mut self, ctx: &GameContext, dt: f32) {
        let mut dy = ctx.input.vertical_axis() * PLAYER_SPEED * dt;
        if ctx.input.pointer_down {
            if let Some(pointer) = ctx.input.pointer {
                let to = pointer.y - self.player.y;
                dy = to.clamp(-PLAYER_SPEED * dt, PLAYER_SPEED * dt);
            }
        }
        let max_y = (ctx.size.y - PLAYER_RADIUS).max(PLAYER_RADIUS);
        self.player.y = (self.player.y + dy).clamp(PLAYER_RADIUS, max_y);
    }

    fn spawn_pickups(&mut self, ctx: &mut GameContext, dt: f32) {
        self.orb_countdown -= dt;
        if self.orb_countdown > 0.0 {
            return;
        }
        self.orb_countdown += ORB_INTERVAL;

        let radius = self.pickups.config.radius;
        let y = ctx.rng.random_range(radius..=(ctx.size.y - radius).max(radius));
        let pos = Vec2::new(ctx.size.x, y);
        let vel = Vec2::new(-self.spawner.current_speed(), 0.0);
        let kind = if ctx.rng.random_bool(CAPSULE_CHANCE) {
            Pickup::Capsule(Power::ALL[ctx.rng.random_range(0..Power::ALL.len())])
        } else {
            Pickup::Orb
        };
        self.pickups.spawn(kind, pos, vel);
    }

    fn collect(&mut self, ctx: &mut GameContext) {
        for item in self.pickups.collect_circle(self.player, PLAYER_RADIUS) {
            match item.kind {
                Pickup::Orb => {
                    ctx.score.add(item.value as u64);
                    ctx.burst(item.pos, 8);
                    ctx.cue(Cue::Collect);
                }
                Pickup::Capsule(power) => {
                    self.powers.activate(power, power.duration());
                    if power == Power::DoublePoints {
                        ctx.score.set_multiplier(2.0);
                    }
                    ctx.burst(item.pos, 16);
                    ctx.cue(Cue::PowerUp);
                }
            }
        }
    }

    fn expire_powers(&mut self, ctx: &mut GameContext, dt: f32) {
        for power in self.powers.update(dt) {
            if power == Power::DoublePoints {
                ctx.score.set_multiplier(1.0);
            }
            log::debug!("{} expired", power.label());
            ctx.cue(Cue::PowerDown);
        }
    }

    fn check_crash(&mut self, ctx: &mut GameContext) {
        let Some(hit) = self.spawner.first_collision(&self.player_rect()) else {
            return;
        };
        let (id, at) = (hit.id, hit.rect.center());
        ctx.cue(Cue::Hit);
        if self.powers.deactivate(Power::Shield) {
            self.spawner.remove(id);
            ctx.burst(at, 20);
            ctx.shake(0.4);
        } else {
            ctx.burst(self.player, 40);
            ctx.shake(1.0);
            ctx.end_game();
        }
    }
}

impl Game for OrbRunner {
    fn info(&self) -> GameInfo {
        GameInfo {
            id: "orb_runner",
            title: "Orb Runner",
        }
    }

    fn setup(&mut self, ctx: &mut GameContext) {
        self.background = ScrollingBackground::new(ctx.size.x, ctx.size.y, 0.0, 7)
            .with_layer(0.15, 240.0, LayerStyle::Dots, 12)
            .with_layer(0.4, 320.0, LayerStyle::Skyline, 6)
            .with_layer(1.0, 160.0, LayerStyle::Stripes, 4);
        self.layout(ctx.size);
    }

    fn initialize(&mut self, ctx: &mut GameContext) {
        let seed = ctx.rng.random::<u64>();
        self.spawner.reseed(seed);
        self.pickups.clear();
        self.powers.clear();
        self.background.reset();
        self.survival.reset();
        self.survival.start();
        self.orb_countdown = ORB_INTERVAL;
        self.player = Vec2::new(PLAYER_X, ctx.size.y / 2.0);
        ctx.level = 0;
    }

    fn update(&mut self, ctx: &mut GameContext, dt: f32) {
        self.survival.update(dt);
        // Level recorded with high scores: whole seconds survived
        ctx.level = self.survival.elapsed() as u32;

        self.steer(ctx, dt);

        self.spawner.update(dt);
        self.background.speed = self.spawner.current_speed();
        self.background.update(dt);
        let dodged = self.spawner.take_passed(PLAYER_X - PLAYER_RADIUS);
        if dodged > 0 {
            ctx.score.add(dodged as u64 * DODGE_POINTS);
        }

        self.spawn_pickups(ctx, dt);
        let margin = 40.0;
        let bounds = Rect::new(
            -margin,
            -margin,
            ctx.size.x + 2.0 * margin,
            ctx.size.y + 2.0 * margin,
        );
        self.pickups.update(dt, Some(bounds));
        if self.powers.is_active(Power::Magnet) {
            self.pickups.attract(self.player, MAGNET_RADIUS, MAGNET_PULL, dt);
        }

        self.expire_powers(ctx, dt);
        self.collect(ctx);
        self.check_crash(ctx);
    }

    fn draw(&self, surface: &mut dyn Surface, ctx: &GameContext) {
        let theme = &ctx.theme;
        let palette = &theme.palette;
        surface.clear(palette.background);
        self.background.draw(surface, theme, self.background_layers);

        for obstacle in self.spawner.iter() {
            surface.fill_rect(obstacle.rect, palette.danger);
        }
        for item in self.pickups.iter() {
            let pos = item.pos + Vec2::new(0.0, item.bob());
            let color = match item.kind {
                Pickup::Orb => palette.accent,
                Pickup::Capsule(power) => power.color(theme),
            };
            surface.fill_circle(pos, item.radius, color.with_alpha(item.fade()));
        }

        if self.powers.is_active(Power::Shield) {
            let pulse = 0.35 + 0.15 * (ctx.elapsed * 6.0).sin();
            surface.fill_circle(
                self.player,
                PLAYER_RADIUS + 6.0,
                Power::Shield.color(theme).with_alpha(pulse),
            );
        }
        surface.fill_circle(self.player, PLAYER_RADIUS, palette.primary);

        surface.text(
            &format!("{}", ctx.score.value),
            Vec2::new(12.0, 28.0),
            24.0,
            palette.text,
            TextAlign::Left,
        );
        surface.text(
            &self.survival.format(),
            Vec2::new(ctx.size.x / 2.0, 28.0),
            18.0,
            palette.text_muted,
            TextAlign::Center,
        );
        for (i, active) in self.powers.iter().enumerate() {
            let power = active.kind;
            let y = 52.0 + 20.0 * i as f32;
            let width = 60.0 * self.powers.progress(power);
            surface.fill_rect(Rect::new(12.0, y - 8.0, width, 6.0), power.color(theme));
            surface.text(power.label(), Vec2::new(80.0, y), 12.0, palette.text, TextAlign::Left);
        }
    }

    fn on_resize(&mut self, size: Vec2) {
        self.layout(size);
    }
}
