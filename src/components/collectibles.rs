//! Collectible items (coins, orbs, letters, power-up capsules)

use glam::Vec2;

use crate::geometry::{Rect, circle_intersects_rect, circles_overlap};

/// Defaults applied to spawned items
#[derive(Debug, Clone, Copy)]
pub struct CollectibleConfig {
    pub radius: f32,
    /// Points awarded on pickup
    pub value: u32,
    /// Seconds before an uncollected item disappears (None = forever)
    pub lifetime: Option<f32>,
    pub max_items: usize,
}

impl Default for CollectibleConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            value: 10,
            lifetime: None,
            max_items: 32,
        }
    }
}

/// A collectible entity
#[derive(Debug, Clone, PartialEq)]
pub struct Collectible<T> {
    pub id: u32,
    pub kind: T,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub value: u32,
    /// Seconds since spawn
    pub age: f32,
    pub lifetime: Option<f32>,
}

impl<T> Collectible<T> {
    /// 0..1 fade for items about to expire (last second of life)
    pub fn fade(&self) -> f32 {
        match self.lifetime {
            Some(life) => (life - self.age).clamp(0.0, 1.0),
            None => 1.0,
        }
    }

    /// Vertical bob for drawing, so items read as pickups
    pub fn bob(&self) -> f32 {
        (self.age * 4.0 + self.id as f32).sin() * 3.0
    }
}

/// Owns the live collectibles of one game
#[derive(Debug, Clone)]
pub struct CollectibleManager<T> {
    pub config: CollectibleConfig,
    items: Vec<Collectible<T>>,
    next_id: u32,
}

impl<T: Clone> CollectibleManager<T> {
    pub fn new(config: CollectibleConfig) -> Self {
        Self {
            config,
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Spawn with the configured defaults; None when at `max_items`
    pub fn spawn(&mut self, kind: T, pos: Vec2, vel: Vec2) -> Option<u32> {
        if self.items.len() >= self.config.max_items {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Collectible {
            id,
            kind,
            pos,
            vel,
            radius: self.config.radius,
            value: self.config.value,
            age: 0.0,
            lifetime: self.config.lifetime,
        });
        Some(id)
    }

    /// Spawn with an explicit point value
    pub fn spawn_valued(&mut self, kind: T, pos: Vec2, vel: Vec2, value: u32) -> Option<u32> {
        let id = self.spawn(kind, pos, vel)?;
        if let Some(item) = self.items.last_mut() {
            item.value = value;
        }
        Some(id)
    }

    /// Move and age items; drops expired ones and, when `bounds` is given,
    /// ones that left it entirely. Returns how many were dropped.
    pub fn update(&mut self, dt: f32, bounds: Option<Rect>) -> usize {
        for item in self.items.iter_mut() {
            item.pos += item.vel * dt;
            item.age += dt;
        }
        let before = self.items.len();
        self.items.retain(|item| {
            let alive = item.lifetime.is_none_or(|life| item.age < life);
            let inside = bounds.is_none_or(|b| circle_intersects_rect(item.pos, item.radius, &b));
            alive && inside
        });
        before - self.items.len()
    }

    /// Pull items within `radius` of `target` toward it (magnet effect)
    pub fn attract(&mut self, target: Vec2, radius: f32, strength: f32, dt: f32) {
        for item in self.items.iter_mut() {
            let to_target = target - item.pos;
            let dist = to_target.length();
            if dist > 0.5 && dist < radius {
                let step = (strength * dt).min(dist);
                item.pos += to_target / dist * step;
            }
        }
    }

    /// Remove and return every item touching the circle
    pub fn collect_circle(&mut self, center: Vec2, radius: f32) -> Vec<Collectible<T>> {
        self.take_where(|item| circles_overlap(item.pos, item.radius, center, radius))
    }

    /// Remove and return every item touching the rectangle
    pub fn collect_rect(&mut self, rect: &Rect) -> Vec<Collectible<T>> {
        self.take_where(|item| circle_intersects_rect(item.pos, item.radius, rect))
    }

    fn take_where(&mut self, pred: impl Fn(&Collectible<T>) -> bool) -> Vec<Collectible<T>> {
        let mut taken = Vec::new();
        let mut i = 0;
        while i < self.items.len() {
            if pred(&self.items[i]) {
                taken.push(self.items.remove(i));
            } else {
                i += 1;
            }
        }
        taken
    }

    pub fn iter(&self) -> impl Iterator<Item = &Collectible<T>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> CollectibleManager<&'static str> {
        CollectibleManager::new(CollectibleConfig {
            radius: 5.0,
            value: 10,
            lifetime: Some(2.0),
            max_items: 3,
        })
    }

    #[test]
    fn test_spawn_cap_and_ids() {
        let mut items = manager();
        assert_eq!(items.spawn("coin", Vec2::ZERO, Vec2::ZERO), Some(1));
        assert_eq!(items.spawn("coin", Vec2::ZERO, Vec2::ZERO), Some(2));
        assert_eq!(items.spawn_valued("gem", Vec2::ZERO, Vec2::ZERO, 50), Some(3));
        assert_eq!(items.spawn("coin", Vec2::ZERO, Vec2::ZERO), None);
        assert_eq!(items.iter().last().map(|c| c.value), Some(50));
    }

    #[test]
    fn test_update_moves_and_expires() {
        let mut items = manager();
        items.spawn("coin", Vec2::new(50.0, 50.0), Vec2::new(-10.0, 0.0));
        assert_eq!(items.update(1.0, None), 0);
        assert_eq!(items.iter().next().map(|c| c.pos), Some(Vec2::new(40.0, 50.0)));
        assert_eq!(items.update(1.0, None), 1);
        assert!(items.is_empty());
    }

    #[test]
    fn test_update_drops_out_of_bounds() {
        let mut items = manager();
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        items.spawn("coin", Vec2::new(2.0, 50.0), Vec2::new(-20.0, 0.0));
        items.spawn("coin", Vec2::new(50.0, 50.0), Vec2::ZERO);
        assert_eq!(items.update(0.5, Some(bounds)), 1);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_collect_circle_and_rect() {
        let mut items = manager();
        items.spawn("near", Vec2::new(10.0, 0.0), Vec2::ZERO);
        items.spawn("far", Vec2::new(100.0, 0.0), Vec2::ZERO);
        let got = items.collect_circle(Vec2::ZERO, 6.0);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].kind, "near");

        let got = items.collect_rect(&Rect::new(90.0, -5.0, 8.0, 10.0));
        assert_eq!(got.len(), 1);
        assert!(items.is_empty());
    }

    #[test]
    fn test_attract_pulls_only_nearby() {
        let mut items = manager();
        items.spawn("near", Vec2::new(50.0, 0.0), Vec2::ZERO);
        items.spawn("far", Vec2::new(500.0, 0.0), Vec2::ZERO);
        items.attract(Vec2::ZERO, 100.0, 20.0, 1.0);
        let positions: Vec<Vec2> = items.iter().map(|c| c.pos).collect();
        assert_eq!(positions, vec![Vec2::new(30.0, 0.0), Vec2::new(500.0, 0.0)]);
    }

    #[test]
    fn test_fade_near_expiry() {
        let mut items = manager();
        items.spawn("coin", Vec2::ZERO, Vec2::ZERO);
        items.update(1.5, None);
        let fade = items.iter().next().map(|c| c.fade()).unwrap();
        assert!((fade - 0.5).abs() < 1e-6);
    }
}
