/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::entities::{
    Bullet, GameState, GameStatus, Particle, Pigeon, Poop, SoundCue, Tank,
};

// ── World constants ──────────────────────────────────────────────────────────

pub const WORLD_W: f32 = 1344.0;
pub const WORLD_H: f32 = 1024.0;

/// Fixed simulation step (≈30 ticks per second).
pub const TICK_MS: u32 = 33;
const DT: f32 = TICK_MS as f32 / 1000.0;

// Entity bounding boxes (world units).
pub const TANK_W: f32 = 96.0;
pub const TANK_H: f32 = 64.0;
pub const PIGEON_W: f32 = 64.0;
pub const PIGEON_H: f32 = 48.0;
const BULLET_W: f32 = 8.0;
const BULLET_H: f32 = 16.0;
const POOP_W: f32 = 12.0;
const POOP_H: f32 = 12.0;

// Speeds (world units per second).
const TANK_SPEED: f32 = 200.0;
const BULLET_SPEED: f32 = 400.0;
const POOP_SPEED: f32 = 150.0;
const PIGEON_SPEED: f32 = 120.0;

/// Per-pigeon, per-tick chance of dropping a poop (independent Bernoulli
/// trial — not a timer).
const POOP_CHANCE: f64 = 0.01;

pub const WAVE_SIZE: usize = 10;
const WAVE_BONUS: u32 = 10;
pub const STARTING_LIVES: u32 = 5;

/// Scene names cycled through on each wave clear.
pub const BACKGROUNDS: [&str; 3] = ["City Park", "Rooftops", "Harbour"];

// ── Constructors ─────────────────────────────────────────────────────────────

/// One full wave: pigeons in a row along the top, evenly spaced.
fn spawn_wave() -> Vec<Pigeon> {
    (0..WAVE_SIZE)
        .map(|i| Pigeon {
            x: 50.0 + 75.0 * i as f32,
            y: 50.0,
            vx: PIGEON_SPEED,
            flipped: false,
        })
        .collect()
}

/// Build the initial session state: tank centred at the bottom, a fresh
/// wave of pigeons, full lives.
pub fn init_state() -> GameState {
    GameState {
        tank: Tank {
            x: WORLD_W / 2.0 - TANK_W / 2.0,
            y: WORLD_H - TANK_H - 16.0,
        },
        pigeons: spawn_wave(),
        bullets: Vec::new(),
        poops: Vec::new(),
        particles: Vec::new(),
        score: 0,
        lives: STARTING_LIVES,
        background_index: 0,
        status: GameStatus::Playing,
        frame: 0,
        sounds: Vec::new(),
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_tank_left(state: &GameState) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let new_x = (state.tank.x - TANK_SPEED * DT).max(0.0);
    GameState {
        tank: Tank { x: new_x, ..state.tank.clone() },
        ..state.clone()
    }
}

pub fn move_tank_right(state: &GameState) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let new_x = (state.tank.x + TANK_SPEED * DT).min(WORLD_W - TANK_W);
    GameState {
        tank: Tank { x: new_x, ..state.tank.clone() },
        ..state.clone()
    }
}

/// Fire a bullet from the tank's muzzle.  Ignored after game over.
pub fn tank_shoot(state: &GameState) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet {
        x: state.tank.x + TANK_W / 2.0,
        y: state.tank.y,
    });
    let mut sounds = state.sounds.clone();
    sounds.push(SoundCue::Shoot);
    GameState {
        bullets,
        sounds,
        ..state.clone()
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle overlap.
fn overlaps(ax: f32, ay: f32, aw: f32, ah: f32, bx: f32, by: f32, bw: f32, bh: f32) -> bool {
    ax < bx + bw && bx < ax + aw && ay < by + bh && by < ay + ah
}

/// Burst of fragments at a pigeon's death position: N ∈ [10, 100] particles,
/// each with independent velocity components in [-200, 200] and an
/// independent lifetime in [1000, 3000] ms.
fn explosion_burst(x: f32, y: f32, rng: &mut impl Rng) -> Vec<Particle> {
    let count = rng.gen_range(10..=100);
    (0..count)
        .map(|_| Particle {
            x,
            y,
            vx: rng.gen_range(-200.0..=200.0),
            vy: rng.gen_range(-200.0..=200.0),
            ttl_ms: rng.gen_range(1000..=3000),
        })
        .collect()
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one fixed step.  All randomness comes through
/// `rng` so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    let frame = state.frame + 1;
    let mut sounds = state.sounds.clone();

    // ── 1. Move bullets, cull above the top edge ─────────────────────────────
    let bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .filter_map(|b| {
            let new_y = b.y - BULLET_SPEED * DT;
            if new_y < 0.0 {
                None
            } else {
                Some(Bullet { y: new_y, ..b.clone() })
            }
        })
        .collect();

    // ── 2. Move poops, cull below the bottom edge ────────────────────────────
    let mut poops: Vec<Poop> = state
        .poops
        .iter()
        .filter_map(|p| {
            let new_y = p.y + POOP_SPEED * DT;
            if new_y > WORLD_H {
                None
            } else {
                Some(Poop { y: new_y, ..p.clone() })
            }
        })
        .collect();

    // ── 3. Move pigeons (edge reflection) and roll for pooping ───────────────
    let pigeons: Vec<Pigeon> = state
        .pigeons
        .iter()
        .map(|p| {
            let mut x = p.x + p.vx * DT;
            let mut vx = p.vx;
            let mut flipped = p.flipped;
            if x < 0.0 || x > WORLD_W - PIGEON_W {
                x = x.clamp(0.0, WORLD_W - PIGEON_W);
                vx = -vx;
                flipped = !flipped;
            }
            let pigeon = Pigeon { x, vx, flipped, ..p.clone() };
            if rng.gen_bool(POOP_CHANCE) {
                poops.push(Poop {
                    x: pigeon.x + PIGEON_W / 2.0,
                    y: pigeon.y + PIGEON_H,
                });
            }
            pigeon
        })
        .collect();

    // ── 4. Move particles; expire on TTL or bottom exit, whichever first ─────
    let mut particles: Vec<Particle> = state
        .particles
        .iter()
        .filter_map(|p| {
            let new_y = p.y + p.vy * DT;
            let ttl = p.ttl_ms.saturating_sub(TICK_MS);
            if ttl == 0 || new_y > WORLD_H {
                None
            } else {
                Some(Particle {
                    x: p.x + p.vx * DT,
                    y: new_y,
                    ttl_ms: ttl,
                    ..p.clone()
                })
            }
        })
        .collect();

    // ── 5. Collision: bullets ↔ pigeons ──────────────────────────────────────
    let mut killed_pigeons: Vec<usize> = Vec::new();
    let mut used_bullets: Vec<usize> = Vec::new();

    for (bi, bullet) in bullets.iter().enumerate() {
        for (pi, pigeon) in pigeons.iter().enumerate() {
            if overlaps(
                bullet.x, bullet.y, BULLET_W, BULLET_H,
                pigeon.x, pigeon.y, PIGEON_W, PIGEON_H,
            ) && !killed_pigeons.contains(&pi)
            {
                killed_pigeons.push(pi);
                used_bullets.push(bi);
                break;
            }
        }
    }

    for &pi in &killed_pigeons {
        sounds.push(SoundCue::Scream);
        particles.extend(explosion_burst(pigeons[pi].x, pigeons[pi].y, rng));
    }
    let kills = killed_pigeons.len() as u32;

    let mut pigeons: Vec<Pigeon> = pigeons
        .iter()
        .enumerate()
        .filter(|(i, _)| !killed_pigeons.contains(i))
        .map(|(_, p)| p.clone())
        .collect();

    let bullets: Vec<Bullet> = bullets
        .iter()
        .enumerate()
        .filter(|(i, _)| !used_bullets.contains(i))
        .map(|(_, b)| b.clone())
        .collect();

    // ── 6. Collision: poops ↔ tank ───────────────────────────────────────────
    let mut hits: u32 = 0;
    let poops: Vec<Poop> = poops
        .into_iter()
        .filter(|p| {
            let hit = overlaps(
                p.x, p.y, POOP_W, POOP_H,
                state.tank.x, state.tank.y, TANK_W, TANK_H,
            );
            if hit {
                hits += 1;
            }
            !hit
        })
        .collect();

    let lives = state.lives.saturating_sub(hits);
    if hits > 0 {
        sounds.push(SoundCue::TankHit);
    }

    // ── 7. Wave controller: empty pool → bonus, next background, respawn ─────
    let mut score = state.score + kills;
    let mut background_index = state.background_index;
    if pigeons.is_empty() {
        score += WAVE_BONUS;
        sounds.push(SoundCue::WaveCleared);
        background_index = (background_index + 1) % BACKGROUNDS.len();
        pigeons = spawn_wave();
    }

    // ── 8. Game-over check ───────────────────────────────────────────────────
    let status = if lives == 0 {
        GameStatus::GameOver
    } else {
        GameStatus::Playing
    };

    GameState {
        tank: state.tank.clone(),
        pigeons,
        bullets,
        poops,
        particles,
        score,
        lives,
        background_index,
        status,
        frame,
        sounds,
    }
}
