use std::fs;

use pigeon_patrol::leaderboard::{self, Entry, MAX_ENTRIES};

fn temp_scores() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");
    (dir, path)
}

#[test]
fn missing_file_is_empty_list() {
    let (_dir, path) = temp_scores();
    assert!(leaderboard::load(&path).is_empty());
}

#[test]
fn malformed_file_is_empty_list() {
    let (_dir, path) = temp_scores();
    fs::write(&path, "this is not json {").unwrap();
    assert!(leaderboard::load(&path).is_empty());
}

#[test]
fn save_recovers_from_malformed_file() {
    let (_dir, path) = temp_scores();
    fs::write(&path, "[{\"broken\":").unwrap();
    let entries = leaderboard::save_score(&path, "A", 50).unwrap();
    assert_eq!(entries, vec![Entry { name: "A".into(), score: 50 }]);
}

#[test]
fn saved_list_persists() {
    let (_dir, path) = temp_scores();
    let written = leaderboard::save_score(&path, "A", 50).unwrap();
    assert_eq!(leaderboard::load(&path), written);
}

#[test]
fn sorted_descending_with_stable_ties() {
    // B wins on score; A precedes C on insertion order for the 50-point tie.
    let (_dir, path) = temp_scores();
    leaderboard::save_score(&path, "A", 50).unwrap();
    leaderboard::save_score(&path, "B", 80).unwrap();
    let entries = leaderboard::save_score(&path, "C", 50).unwrap();

    assert_eq!(
        entries,
        vec![
            Entry { name: "B".into(), score: 80 },
            Entry { name: "A".into(), score: 50 },
            Entry { name: "C".into(), score: 50 },
        ]
    );
}

#[test]
fn truncated_to_top_ten() {
    let (_dir, path) = temp_scores();
    for i in 1..=12u32 {
        leaderboard::save_score(&path, &format!("P{}", i), i).unwrap();
    }
    let entries = leaderboard::load(&path);
    assert_eq!(entries.len(), MAX_ENTRIES);
    // Highest scores kept, lowest two dropped
    assert_eq!(entries[0].score, 12);
    assert_eq!(entries[MAX_ENTRIES - 1].score, 3);
}

#[test]
fn no_deduplication_by_name() {
    let (_dir, path) = temp_scores();
    leaderboard::save_score(&path, "A", 10).unwrap();
    let entries = leaderboard::save_score(&path, "A", 30).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].score, 30);
    assert_eq!(entries[1].score, 10);
}
