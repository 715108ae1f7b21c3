/// All game entity types — pure data, no logic.

use crate::geometry::{Rect, Vec2};
use crate::pool::Pool;

/// Which screen the game is currently showing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Screen {
    Logo,
    Title,
    Gameplay,
    Pause,
    Ending,
}

/// Starting difficulty, selected on the title screen.
/// Seeds the initial enemy-spawn interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// The closed set of power-up effects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    /// Raise the active-bullet watermark by one.
    MaxBulletUp,
    /// Clear every active enemy, scoring one point per enemy.
    EnemyWipe,
    /// Raise the player's movement speed.
    IncreaseSpeed,
    Plus10Score,
    Plus50Score,
    /// Restore one hit point.
    HealthUp,
}

/// Everything that moves is an entity: the player, bullets, and enemies.
#[derive(Clone, Debug)]
pub struct Entity {
    /// Remaining hit points; bullets and enemies carry 1.
    pub health: i32,
    /// Distance moved per frame along `direction`.
    pub speed: f32,
    /// The hitbox. Also the render footprint — always square here.
    pub body: Rect,
    /// Current heading, unit length or zero. Fixed at creation for
    /// bullets, recomputed toward the player every frame for enemies.
    pub direction: Vec2,
}

/// The single shared power-up slot. Not pooled: at most one exists,
/// cycling through effects and positions on a respawn timer.
#[derive(Clone, Debug)]
pub struct PowerUp {
    pub position: Vec2,
    pub effect: Effect,
    pub is_active: bool,
}

/// The entire game state, owned by the main loop and passed by
/// reference to every phase function. No globals.
#[derive(Clone, Debug)]
pub struct GameState {
    pub screen: Screen,
    pub difficulty: Difficulty,
    pub frame: u64,
    pub score: u32,
    /// Score at the last difficulty-growth event, so each milestone
    /// fires exactly once.
    pub last_growth_score: u32,
    /// Best score seen this session (shown on the ending screen).
    pub best_score: u32,
    /// Frames between forced enemy spawns. Shrinks as score grows,
    /// clamped to a minimum of 1.
    pub spawn_interval: u64,
    pub player: Entity,
    pub bullets: Pool,
    pub enemies: Pool,
    pub powerup: PowerUp,
}
