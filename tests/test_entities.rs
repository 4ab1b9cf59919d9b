use pigeon_patrol::entities::*;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_eq!(SoundCue::Scream, SoundCue::Scream);
    assert_ne!(SoundCue::Scream, SoundCue::TankHit);

    // Clone must produce an equal value
    let cue = SoundCue::WaveCleared;
    assert_eq!(cue.clone(), SoundCue::WaveCleared);
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        tank: Tank { x: 624.0, y: 944.0 },
        pigeons: Vec::new(),
        bullets: Vec::new(),
        poops: Vec::new(),
        particles: Vec::new(),
        score: 0,
        lives: 5,
        background_index: 0,
        status: GameStatus::Playing,
        frame: 0,
        sounds: Vec::new(),
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.tank.x = 99.0;
    cloned.score = 999;
    cloned.pigeons.push(Pigeon { x: 5.0, y: 5.0, vx: 120.0, flipped: false });
    cloned.sounds.push(SoundCue::Shoot);

    assert_eq!(original.tank.x, 624.0);
    assert_eq!(original.score, 0);
    assert!(original.pigeons.is_empty());
    assert!(original.sounds.is_empty());
}
