//! Obstacle spawning with a difficulty ramp (runner-style games)

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::geometry::Rect;

/// Floor on the spawn interval so a zero-interval config cannot stall `update`
const MIN_SPAWN_INTERVAL: f32 = 0.05;

/// Spawner tuning
#[derive(Debug, Clone)]
pub struct SpawnerConfig {
    /// Seconds between spawns at the start
    pub base_interval: f32,
    /// Shortest interval the ramp reaches
    pub min_interval: f32,
    /// Interval reduction per second of play
    pub interval_ramp: f32,
    /// Scroll speed at the start (pixels/s)
    pub base_speed: f32,
    pub max_speed: f32,
    /// Speed gained per second of play
    pub speed_ramp: f32,
    /// Obstacle size range (inclusive)
    pub min_size: Vec2,
    pub max_size: Vec2,
    /// Vertical centers obstacles may spawn on
    pub lanes: Vec<f32>,
    /// X coordinate where obstacles appear (usually the right edge)
    pub spawn_x: f32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            base_interval: 1.6,
            min_interval: 0.5,
            interval_ramp: 0.02,
            base_speed: 220.0,
            max_speed: 560.0,
            speed_ramp: 6.0,
            min_size: Vec2::new(24.0, 24.0),
            max_size: Vec2::new(40.0, 64.0),
            lanes: vec![100.0, 200.0, 300.0],
            spawn_x: 800.0,
        }
    }
}

/// An obstacle entity
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
    /// Lane index it spawned in
    pub lane: usize,
    /// Already counted by `take_passed`
    pub passed: bool,
}

/// Spawns, moves and retires obstacles
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    pub config: SpawnerConfig,
    obstacles: Vec<Obstacle>,
    /// Seconds until the next spawn
    countdown: f32,
    /// Seconds since the round started
    elapsed: f32,
    next_id: u32,
    seed: u64,
    rng: Pcg32,
}

impl ObstacleSpawner {
    pub fn new(config: SpawnerConfig, seed: u64) -> Self {
        let countdown = config.base_interval;
        Self {
            config,
            obstacles: Vec::new(),
            countdown,
            elapsed: 0.0,
            next_id: 1,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Current spawn interval after the difficulty ramp
    pub fn current_interval(&self) -> f32 {
        (self.config.base_interval - self.config.interval_ramp * self.elapsed)
            .max(self.config.min_interval)
            .max(MIN_SPAWN_INTERVAL)
    }

    /// Current scroll speed after the difficulty ramp
    pub fn current_speed(&self) -> f32 {
        (self.config.base_speed + self.config.speed_ramp * self.elapsed).min(self.config.max_speed)
    }

    /// Advance the spawner; returns how many obstacles spawned this step
    pub fn update(&mut self, dt: f32) -> usize {
        self.elapsed += dt;
        let dx = -self.current_speed() * dt;
        for o in self.obstacles.iter_mut() {
            o.rect.x += dx;
        }
        self.obstacles.retain(|o| o.rect.right() > 0.0);

        let mut spawned = 0;
        self.countdown -= dt;
        while self.countdown <= 0.0 {
            if self.spawn_one() {
                spawned += 1;
            }
            self.countdown += self.current_interval();
        }
        spawned
    }

    /// Spawn in a random lane; false when no lanes are configured
    fn spawn_one(&mut self) -> bool {
        let lanes = self.config.lanes.len();
        if lanes == 0 {
            return false;
        }
        let lane = self.rng.random_range(0..lanes);
        let min = self.config.min_size;
        let max = self.config.max_size.max(min);
        let size = Vec2::new(
            self.rng.random_range(min.x..=max.x),
            self.rng.random_range(min.y..=max.y),
        );
        let center_y = self.config.lanes[lane];
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            rect: Rect::new(self.config.spawn_x, center_y - size.y / 2.0, size.x, size.y),
            lane,
            passed: false,
        });
        true
    }

    /// Count obstacles that moved fully left of `x` since the last call
    pub fn take_passed(&mut self, x: f32) -> u32 {
        let mut count = 0;
        for o in self.obstacles.iter_mut().filter(|o| !o.passed && o.rect.right() < x) {
            o.passed = true;
            count += 1;
        }
        count
    }

    /// First obstacle overlapping `rect`
    pub fn first_collision(&self, rect: &Rect) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.rect.intersects(rect))
    }

    pub fn remove(&mut self, id: u32) -> Option<Obstacle> {
        let idx = self.obstacles.iter().position(|o| o.id == id)?;
        Some(self.obstacles.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Back to the start of the ramp with the same seed
    pub fn reset(&mut self) {
        self.reseed(self.seed);
    }

    /// Back to the start of the ramp with a new seed
    pub fn reseed(&mut self, seed: u64) {
        self.obstacles.clear();
        self.countdown = self.config.base_interval;
        self.elapsed = 0.0;
        self.next_id = 1;
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SpawnerConfig {
        SpawnerConfig {
            base_interval: 1.0,
            min_interval: 0.5,
            interval_ramp: 0.1,
            base_speed: 100.0,
            max_speed: 200.0,
            speed_ramp: 10.0,
            min_size: Vec2::new(20.0, 20.0),
            max_size: Vec2::new(20.0, 20.0),
            lanes: vec![50.0, 150.0],
            spawn_x: 400.0,
        }
    }

    #[test]
    fn test_difficulty_ramp_is_clamped() {
        let mut spawner = ObstacleSpawner::new(config(), 1);
        assert_eq!(spawner.current_interval(), 1.0);
        assert_eq!(spawner.current_speed(), 100.0);
        for _ in 0..100 {
            spawner.update(0.5);
        }
        assert_eq!(spawner.current_interval(), 0.5);
        assert_eq!(spawner.current_speed(), 200.0);
    }

    #[test]
    fn test_spawns_on_interval_in_lanes() {
        let mut spawner = ObstacleSpawner::new(config(), 42);
        assert_eq!(spawner.update(0.5), 0);
        assert_eq!(spawner.update(0.5), 1);
        let o = spawner.iter().next().cloned().unwrap();
        assert_eq!(o.rect.x, 400.0);
        assert!([50.0, 150.0].contains(&o.rect.center().y));
    }

    #[test]
    fn test_obstacles_move_and_retire() {
        let mut spawner = ObstacleSpawner::new(config(), 3);
        spawner.update(1.0);
        assert_eq!(spawner.len(), 1);
        spawner.update(0.1);
        let x = spawner.iter().next().map(|o| o.rect.x).unwrap();
        assert!(x < 400.0);

        // Long enough to carry the first obstacle off the left edge
        for _ in 0..60 {
            spawner.update(0.1);
        }
        assert!(spawner.iter().all(|o| o.rect.right() > 0.0));
        assert!(spawner.iter().all(|o| o.id != 1));
    }

    #[test]
    fn test_take_passed_counts_once() {
        let mut spawner = ObstacleSpawner::new(config(), 5);
        spawner.update(1.0);
        // ~107 px in 0.9s puts the first obstacle's right edge near 313
        spawner.update(0.9);
        assert_eq!(spawner.take_passed(350.0), 1);
        assert_eq!(spawner.take_passed(350.0), 0);
    }

    #[test]
    fn test_collision_and_remove() {
        let mut spawner = ObstacleSpawner::new(config(), 9);
        spawner.update(1.0);
        let rect = spawner.iter().next().map(|o| o.rect).unwrap();
        let hit = spawner.first_collision(&rect).map(|o| o.id);
        assert_eq!(hit, Some(1));
        assert!(spawner.remove(1).is_some());
        assert!(spawner.first_collision(&rect).is_none());
    }

    #[test]
    fn test_zero_interval_config_is_floored() {
        let mut spawner = ObstacleSpawner::new(
            SpawnerConfig {
                base_interval: 0.5,
                min_interval: 0.0,
                interval_ramp: 1.0,
                ..config()
            },
            11,
        );
        let mut total = 0;
        for _ in 0..10 {
            total += spawner.update(0.1);
        }
        assert_eq!(spawner.current_interval(), MIN_SPAWN_INTERVAL);
        assert_eq!(total, spawner.len());
        // One spawn per floor interval at most
        assert!(total <= (1.0 / MIN_SPAWN_INTERVAL).ceil() as usize);

        let zero = ObstacleSpawner::new(
            SpawnerConfig {
                base_interval: 0.0,
                min_interval: 0.0,
                ..config()
            },
            12,
        );
        assert!(zero.current_interval() > 0.0);
    }

    #[test]
    fn test_no_lanes_spawns_nothing() {
        let mut spawner = ObstacleSpawner::new(
            SpawnerConfig {
                lanes: vec![],
                ..config()
            },
            13,
        );
        assert_eq!(spawner.update(2.0), 0);
        assert!(spawner.is_empty());
    }

    #[test]
    fn test_reset_is_deterministic() {
        let mut spawner = ObstacleSpawner::new(config(), 77);
        spawner.update(3.0);
        let first: Vec<usize> = spawner.iter().map(|o| o.lane).collect();
        spawner.reset();
        assert!(spawner.is_empty());
        spawner.update(3.0);
        let second: Vec<usize> = spawner.iter().map(|o| o.lane).collect();
        assert_eq!(first, second);
    }
}
