//! Capped particle pool for bursts (pickups, crashes, line clears)

use glam::Vec2;
use rand::Rng;

use crate::surface::Surface;
use crate::theme::Color;

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    /// 1.0 at spawn, removed at 0.0
    pub life: f32,
    /// Life lost per second
    pub decay: f32,
    pub size: f32,
}

/// Burst parameters
#[derive(Debug, Clone, Copy)]
pub struct BurstStyle {
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Seconds a particle lives
    pub lifetime: f32,
}

impl Default for BurstStyle {
    fn default() -> Self {
        Self {
            min_speed: 40.0,
            max_speed: 180.0,
            min_size: 2.0,
            max_size: 5.0,
            lifetime: 0.8,
        }
    }
}

/// Particle pool shared by a game and its host
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    capacity: usize,
    /// Constant acceleration (pixels/s²)
    pub gravity: Vec2,
    /// Fraction of velocity kept per second
    pub drag: f32,
}

impl ParticleSystem {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity.min(256)),
            capacity,
            gravity: Vec2::new(0.0, 220.0),
            drag: 0.35,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Change the cap, dropping the oldest particles if over it
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        if self.particles.len() > capacity {
            let excess = self.particles.len() - capacity;
            self.particles.drain(..excess);
        }
    }

    /// Spawn up to `count` particles radiating from `pos`; returns how many fit
    pub fn burst<R: Rng>(
        &mut self,
        pos: Vec2,
        count: usize,
        colors: &[Color],
        style: BurstStyle,
        rng: &mut R,
    ) -> usize {
        let room = self.capacity.saturating_sub(self.particles.len());
        let spawned = count.min(room);
        for i in 0..spawned {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(style.min_speed..=style.max_speed);
            let color = colors.get(i % colors.len().max(1)).copied().unwrap_or(Color::WHITE);
            self.particles.push(Particle {
                pos,
                vel: Vec2::from_angle(angle) * speed,
                color,
                life: 1.0,
                decay: 1.0 / style.lifetime.max(0.01),
                size: rng.random_range(style.min_size..=style.max_size),
            });
        }
        spawned
    }

    pub fn update(&mut self, dt: f32) {
        let keep = self.drag.clamp(0.0, 1.0).powf(dt);
        for p in self.particles.iter_mut() {
            p.vel += self.gravity * dt;
            p.vel *= keep;
            p.pos += p.vel * dt;
            p.life -= p.decay * dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for p in &self.particles {
            surface.fill_circle(p.pos, p.size * p.life.max(0.2), p.color.with_alpha(p.life));
        }
    }
}
