/// Game-logic phase functions.
///
/// Every public function takes the explicit `GameState` context by
/// mutable reference (and, where spawning or shuffling happens, an RNG
/// handle) — there are no globals. `tick` is the one documented phase
/// pipeline; its ordering is load-bearing: enemies recompute their
/// heading from the current player position before moving, and the
/// collision sweep runs only after every entity has moved.

use log::{debug, info};
use rand::Rng;

use crate::entities::{Difficulty, Effect, Entity, GameState, PowerUp, Screen};
use crate::geometry::{circle_overlaps_rect, Rect, Vec2};
use crate::pool::Pool;

// ── Arena & entity constants ─────────────────────────────────────────────────

/// Simulation runs in a fixed abstract arena; the display layer scales
/// it to whatever terminal it finds.
pub const ARENA_WIDTH: f32 = 1280.0;
pub const ARENA_HEIGHT: f32 = 720.0;

pub const MAX_BULLETS: usize = 10;
pub const MAX_ENEMIES: usize = 50;
pub const INITIAL_MAX_BULLETS: usize = 1;
pub const INITIAL_MAX_ENEMIES: usize = 1;

pub const PLAYER_SIZE: f32 = 25.0;
pub const PLAYER_HEALTH: i32 = 5;
pub const PLAYER_SPEED: f32 = 3.0;

pub const BULLET_SIZE: f32 = 10.0;
pub const BULLET_SPEED: f32 = 8.0;
/// Bullets spawn nudged off the player's corner so they don't sit
/// inside the player's own hitbox on their first frame.
const BULLET_SPAWN_OFFSET: f32 = 5.0;

pub const ENEMY_SIZE: f32 = 65.5;
const ENEMY_MIN_SPEED: i32 = 1;
const ENEMY_MAX_SPEED: i32 = 5;

pub const POWERUP_RADIUS: f32 = 15.0;
/// Power-ups keep this much clearance from every arena edge.
const POWERUP_MARGIN: f32 = 50.0;
pub const POWERUP_RESPAWN_INTERVAL: u64 = 300;

pub const LOGO_FRAMES: u64 = 130;

/// Every this many points, one more enemy slot opens up and the spawn
/// interval tightens.
const GROWTH_SCORE_STEP: u32 = 5;
const SPAWN_INTERVAL_STEP: u64 = 10;
/// A non-positive interval would mean modulo-by-zero; 1 means "spawn
/// every frame" and is the hard floor.
const MIN_SPAWN_INTERVAL: u64 = 1;

const SPEED_INCREMENT: f32 = 0.5;

/// Frames between forced enemy spawns at score 0.
pub fn initial_spawn_interval(difficulty: Difficulty) -> u64 {
    match difficulty {
        Difficulty::Easy => 100,
        Difficulty::Medium => 50,
        Difficulty::Hard => 25,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

fn initial_player() -> Entity {
    Entity {
        health: PLAYER_HEALTH,
        speed: PLAYER_SPEED,
        body: Rect::new(
            ARENA_WIDTH / 2.0,
            ARENA_HEIGHT / 2.0,
            PLAYER_SIZE,
            PLAYER_SIZE,
        ),
        direction: Vec2::ZERO,
    }
}

/// Build the initial game state. The power-up starts live somewhere on
/// the field, so the RNG is needed up front.
pub fn init_state(difficulty: Difficulty, rng: &mut impl Rng) -> GameState {
    let mut powerup = PowerUp {
        position: Vec2::ZERO,
        effect: Effect::MaxBulletUp,
        is_active: false,
    };
    respawn_powerup(&mut powerup, rng);

    GameState {
        screen: Screen::Logo,
        difficulty,
        frame: 0,
        score: 0,
        last_growth_score: 0,
        best_score: 0,
        spawn_interval: initial_spawn_interval(difficulty),
        player: initial_player(),
        bullets: Pool::new(MAX_BULLETS, INITIAL_MAX_BULLETS),
        enemies: Pool::new(MAX_ENEMIES, INITIAL_MAX_ENEMIES),
        powerup,
    }
}

/// Restart after the ending screen: release every pooled entity, return
/// counters and watermarks to their initial values, re-center the
/// player. The session best score survives.
pub fn reset(state: &mut GameState) {
    state.player = initial_player();
    state.bullets.clear();
    state.enemies.clear();
    state.bullets.reset_watermark(INITIAL_MAX_BULLETS);
    state.enemies.reset_watermark(INITIAL_MAX_ENEMIES);
    state.score = 0;
    state.last_growth_score = 0;
    state.frame = 0;
    state.spawn_interval = initial_spawn_interval(state.difficulty);
}

// ── Screen transitions ───────────────────────────────────────────────────────

/// One frame of the logo screen; auto-advances to the title after
/// `LOGO_FRAMES`.
pub fn advance_logo(state: &mut GameState) {
    state.frame += 1;
    if state.frame > LOGO_FRAMES {
        state.screen = Screen::Title;
    }
}

pub fn toggle_pause(state: &mut GameState) {
    state.screen = match state.screen {
        Screen::Gameplay => Screen::Pause,
        Screen::Pause => Screen::Gameplay,
        other => other,
    };
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Move the player one frame's worth in the held directions, clamped to
/// the arena.
pub fn move_player(state: &mut GameState, up: bool, down: bool, left: bool, right: bool) {
    let p = &mut state.player;
    if right {
        p.body.x += p.speed;
    }
    if left {
        p.body.x -= p.speed;
    }
    if down {
        p.body.y += p.speed;
    }
    if up {
        p.body.y -= p.speed;
    }
    p.body.x = p.body.x.clamp(0.0, ARENA_WIDTH - p.body.width);
    p.body.y = p.body.y.clamp(0.0, ARENA_HEIGHT - p.body.height);
}

/// Fire a bullet from the player toward `aim` (arena coordinates). The
/// heading is fixed at creation. A full bullet pool discards the shot.
pub fn fire_bullet(state: &mut GameState, aim: Vec2) {
    let origin = state.player.body.position();
    let bullet = Entity {
        health: 1,
        speed: BULLET_SPEED,
        body: Rect::new(
            origin.x + BULLET_SPAWN_OFFSET,
            origin.y + BULLET_SPAWN_OFFSET,
            BULLET_SIZE,
            BULLET_SIZE,
        ),
        direction: aim.sub(origin).normalized(),
    };
    state.bullets.allocate(bullet);
}

// ── Spawner ──────────────────────────────────────────────────────────────────

/// Place a new enemy on a uniformly random arena edge, at a random
/// coordinate along it (clamped so the whole hitbox stays in bounds),
/// heading toward the player. Speed is rolled once and held for life.
/// A full enemy pool discards the spawn.
pub fn spawn_enemy(state: &mut GameState, rng: &mut impl Rng) {
    let (x, y) = match rng.gen_range(0..4) {
        0 => (rng.gen_range(0.0..=ARENA_WIDTH - ENEMY_SIZE), ARENA_HEIGHT - ENEMY_SIZE),
        1 => (rng.gen_range(0.0..=ARENA_WIDTH - ENEMY_SIZE), 0.0),
        2 => (0.0, rng.gen_range(0.0..=ARENA_HEIGHT - ENEMY_SIZE)),
        _ => (ARENA_WIDTH - ENEMY_SIZE, rng.gen_range(0.0..=ARENA_HEIGHT - ENEMY_SIZE)),
    };

    let position = Vec2::new(x, y);
    let enemy = Entity {
        health: 1,
        speed: rng.gen_range(ENEMY_MIN_SPEED..=ENEMY_MAX_SPEED) as f32,
        body: Rect::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
        direction: state.player.body.position().sub(position).normalized(),
    };
    state.enemies.allocate(enemy);
}

// ── Mover ────────────────────────────────────────────────────────────────────

/// Advance every active bullet along its fixed heading.
pub fn update_bullets(bullets: &mut Pool) {
    for (_, bullet) in bullets.iter_active_mut() {
        bullet.body.x += bullet.direction.x * bullet.speed;
        bullet.body.y += bullet.direction.y * bullet.speed;
    }
}

/// Advance every active enemy one frame toward `target` (the player's
/// position *this* frame). Heading is recomputed before the move, so
/// enemies pursue rather than fly ballistically.
pub fn update_enemies(enemies: &mut Pool, target: Vec2) {
    for (_, enemy) in enemies.iter_active_mut() {
        enemy.direction = target.sub(enemy.body.position()).normalized();
        enemy.body.x += enemy.direction.x * enemy.speed;
        enemy.body.y += enemy.direction.y * enemy.speed;
    }
}

/// Release any bullet that has left the arena.
pub fn cull_bullets(bullets: &mut Pool) {
    let gone: Vec<usize> = bullets
        .iter_active()
        .filter(|(_, b)| {
            b.body.x > ARENA_WIDTH || b.body.x < 0.0 || b.body.y > ARENA_HEIGHT || b.body.y < 0.0
        })
        .map(|(i, _)| i)
        .collect();
    for i in gone {
        debug!("bullet {i} left the arena");
        bullets.release(i);
    }
}

// ── Collision resolver ───────────────────────────────────────────────────────

/// Resolve one frame of collisions, in fixed order:
///
/// 1. player × power-up — apply the effect once, deactivate (first,
///    because EnemyWipe changes the enemy pool the sweep below sees);
/// 2. bullet × enemy — pairwise sweep over the active watermark ranges;
///    overlap releases both slots and scores a point, and a slot freed
///    mid-sweep is skipped for the rest of the sweep;
/// 3. enemy × player — the first overlapping enemy is destroyed and the
///    scan stops: one contact costs at most one hit point per frame.
///
/// Returns the damage (0 or 1) to apply to the player.
pub fn resolve_collisions(state: &mut GameState) -> i32 {
    if state.powerup.is_active
        && circle_overlaps_rect(state.powerup.position, POWERUP_RADIUS, &state.player.body)
    {
        apply_effect(state);
        state.powerup.is_active = false;
    }

    for ei in 0..state.enemies.watermark() {
        for bi in 0..state.bullets.watermark() {
            let hit = match (state.enemies.get(ei), state.bullets.get(bi)) {
                (Some(enemy), Some(bullet)) => enemy.body.overlaps(&bullet.body),
                _ => false,
            };
            if hit {
                state.enemies.release(ei);
                state.bullets.release(bi);
                state.score += 1;
            }
        }

        let contact = state
            .enemies
            .get(ei)
            .is_some_and(|enemy| enemy.body.overlaps(&state.player.body));
        if contact {
            state.enemies.release(ei);
            return 1;
        }
    }
    0
}

fn apply_effect(state: &mut GameState) {
    debug!("power-up collected: {:?}", state.powerup.effect);
    match state.powerup.effect {
        Effect::MaxBulletUp => {
            state.bullets.raise_watermark();
        }
        Effect::EnemyWipe => {
            state.score += state.enemies.clear() as u32;
        }
        Effect::IncreaseSpeed => state.player.speed += SPEED_INCREMENT,
        Effect::Plus10Score => state.score += 10,
        Effect::Plus50Score => state.score += 50,
        Effect::HealthUp => state.player.health += 1,
    }
}

// ── Power-up controller ──────────────────────────────────────────────────────

/// Re-roll the power-up's effect and position and make it live. Runs on
/// the respawn timer whether or not the previous one was claimed — an
/// unclaimed power-up is shuffled, never stacked.
pub fn respawn_powerup(powerup: &mut PowerUp, rng: &mut impl Rng) {
    powerup.effect = match rng.gen_range(0..6) {
        0 => Effect::MaxBulletUp,
        1 => Effect::EnemyWipe,
        2 => Effect::IncreaseSpeed,
        3 => Effect::Plus10Score,
        4 => Effect::Plus50Score,
        _ => Effect::HealthUp,
    };
    powerup.position = Vec2::new(
        rng.gen_range(POWERUP_MARGIN..=ARENA_WIDTH - POWERUP_MARGIN),
        rng.gen_range(POWERUP_MARGIN..=ARENA_HEIGHT - POWERUP_MARGIN),
    );
    powerup.is_active = true;
}

// ── Difficulty growth ────────────────────────────────────────────────────────

/// Each time the score lands on a new multiple of `GROWTH_SCORE_STEP`,
/// open one more enemy slot and tighten the spawn interval (floored at
/// `MIN_SPAWN_INTERVAL` so the frame-modulo gate stays well-defined).
pub fn apply_difficulty_growth(state: &mut GameState) {
    if state.score > 0
        && state.score % GROWTH_SCORE_STEP == 0
        && state.score != state.last_growth_score
    {
        state.enemies.raise_watermark();
        state.spawn_interval = state
            .spawn_interval
            .saturating_sub(SPAWN_INTERVAL_STEP)
            .max(MIN_SPAWN_INTERVAL);
        state.last_growth_score = state.score;
        debug!(
            "difficulty up: {} enemy slots, spawn interval {}",
            state.enemies.watermark(),
            state.spawn_interval
        );
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one gameplay frame. Input (movement and
/// firing) has already been applied by the driver. All randomness comes
/// through `rng` so tests can seed it.
pub fn tick(state: &mut GameState, rng: &mut impl Rng) {
    apply_difficulty_growth(state);

    if state.frame % state.spawn_interval == 0 {
        spawn_enemy(state, rng);
    }

    if state.frame > 0 && state.frame % POWERUP_RESPAWN_INTERVAL == 0 {
        respawn_powerup(&mut state.powerup, rng);
    }

    update_bullets(&mut state.bullets);
    update_enemies(&mut state.enemies, state.player.body.position());
    cull_bullets(&mut state.bullets);

    state.player.health -= resolve_collisions(state);
    state.best_score = state.best_score.max(state.score);
    if state.player.health <= 0 {
        info!("player down at score {}", state.score);
        state.screen = Screen::Ending;
    }

    state.frame += 1;
}
