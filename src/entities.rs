/// All game entity types — pure data, no logic.
///
/// Positions and velocities are in world units (the 1344×1024 play field);
/// the display layer scales them to terminal cells.

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Audio events emitted by the simulation.  The simulation never plays
/// anything itself; cues accumulate in `GameState::sounds` until the front
/// end drains them after each frame.
#[derive(Clone, Debug, PartialEq)]
pub enum SoundCue {
    /// A bullet left the tank's muzzle.
    Shoot,
    /// A pigeon was shot down.
    Scream,
    /// A poop landed on the tank.
    TankHit,
    /// The last pigeon of a wave died.
    WaveCleared,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Tank {
    pub x: f32,
    pub y: f32,
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Pigeon {
    pub x: f32,
    pub y: f32,
    /// Horizontal velocity; the sign reflects at the screen edges.
    pub vx: f32,
    /// Facing flag, toggled on every edge reflection.
    pub flipped: bool,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Travels straight up; removed above the top edge or on hitting a pigeon.
#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
}

/// Travels straight down; removed below the bottom edge or on hitting the tank.
#[derive(Clone, Debug)]
pub struct Poop {
    pub x: f32,
    pub y: f32,
}

// ── Visual effects ────────────────────────────────────────────────────────────

/// One fragment of a pigeon-death burst.  Visual only — no collisions.
#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Remaining lifetime in milliseconds; the tick sweep decrements it and
    /// removes the particle when it reaches zero.
    pub ttl_ms: u32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire session state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub tank: Tank,
    pub pigeons: Vec<Pigeon>,
    pub bullets: Vec<Bullet>,
    pub poops: Vec<Poop>,
    pub particles: Vec<Particle>,
    pub score: u32,
    /// Starts at 5; saturating decrement, game over at 0.
    pub lives: u32,
    /// Index into `compute::BACKGROUNDS`, advanced cyclically per wave.
    pub background_index: usize,
    pub status: GameStatus,
    pub frame: u64,
    /// Sound cues accumulated since the front end last drained them.
    pub sounds: Vec<SoundCue>,
}
