//! Reusable gameplay components
//!
//! Small, game-agnostic pieces that concrete games compose. None of them
//! know about the lifecycle host; games own them and call `update` from
//! their own `Game::update`.

pub mod background;
pub mod collectibles;
pub mod obstacles;
pub mod particles;
pub mod powerups;
pub mod timer;

pub use background::{LayerStyle, ParallaxLayer, ScrollingBackground};
pub use collectibles::{Collectible, CollectibleConfig, CollectibleManager};
pub use obstacles::{Obstacle, ObstacleSpawner, SpawnerConfig};
pub use particles::{BurstStyle, Particle, ParticleSystem};
pub use powerups::{Activation, ActivePowerUp, PowerUpManager};
pub use timer::{GameTimer, TimerMode};
