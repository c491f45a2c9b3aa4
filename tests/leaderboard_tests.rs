//! Leaderboard persistence against real files

use hexsort::leaderboard::{Leaderboard, ScoreEntry};
use std::fs;
use tempfile::TempDir;

fn times(entries: &[ScoreEntry]) -> Vec<f64> {
    entries.iter().map(|e| e.time_seconds).collect()
}

#[test]
fn test_record_result_sorts_by_time() {
    let dir = TempDir::new().unwrap();
    let board = Leaderboard::new(dir.path().join("table.csv"));

    board.record_result("SLOW", 12.34);
    board.record_result("FAST", 5.00);
    let entries = board.record_result("SLOWEST", 100.0);

    assert_eq!(times(&entries), vec![5.00, 12.34, 100.0]);
    assert_eq!(times(&board.load().unwrap()), vec![5.00, 12.34, 100.0]);

    let text = fs::read_to_string(board.path()).unwrap();
    assert_eq!(
        text,
        "name,time_seconds\nFAST,5.00\nSLOW,12.34\nSLOWEST,100.00\n"
    );
}

#[test]
fn test_save_of_load_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let board = Leaderboard::new(dir.path().join("table.csv"));
    board
        .save(&[
            ScoreEntry::new("B", 7.777),
            ScoreEntry::new("A", 3.0),
            ScoreEntry::new("C, THE THIRD", 7.78),
        ])
        .unwrap();

    let first = board.load().unwrap();
    let first_text = fs::read_to_string(board.path()).unwrap();
    board.save(&first).unwrap();
    let second = board.load().unwrap();

    assert_eq!(first, second);
    assert_eq!(first_text, fs::read_to_string(board.path()).unwrap());
    // 7.777 was stored as 7.78, so the tie keeps insertion order
    let names: Vec<_> = second.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "C, THE THIRD"]);
}

#[test]
fn test_save_overwrites_previous_contents() {
    let dir = TempDir::new().unwrap();
    let board = Leaderboard::new(dir.path().join("table.csv"));
    board.save(&[ScoreEntry::new("OLD", 1.0)]).unwrap();
    board.save(&[ScoreEntry::new("NEW", 2.0)]).unwrap();

    assert_eq!(board.load().unwrap(), vec![ScoreEntry::new("NEW", 2.0)]);
}

#[test]
fn test_unwritable_board_still_returns_scores() {
    let dir = TempDir::new().unwrap();
    let board = Leaderboard::new(dir.path().join("missing-dir").join("table.csv"));

    assert!(board.save(&[ScoreEntry::new("X", 1.0)]).is_err());
    let entries = board.record_result("ME", 9.0);
    assert_eq!(entries, vec![ScoreEntry::new("ME", 9.0)]);
    assert!(!board.path().exists());
}

#[test]
fn test_unreadable_board_counts_as_empty() {
    let dir = TempDir::new().unwrap();
    // a directory where the file should be
    let path = dir.path().join("table.csv");
    fs::create_dir(&path).unwrap();
    let board = Leaderboard::new(&path);

    assert!(board.load().is_err());
    let entries = board.record_result("ME", 4.0);
    assert_eq!(entries, vec![ScoreEntry::new("ME", 4.0)]);
    assert!(path.is_dir());
    assert!(!dir.path().join("table.csv.tmp").exists());
}

#[cfg(unix)]
#[test]
fn test_unreadable_board_is_not_overwritten() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let board = Leaderboard::new(dir.path().join("table.csv"));
    board
        .save(&[
            ScoreEntry::new("A", 1.0),
            ScoreEntry::new("B", 2.0),
            ScoreEntry::new("C", 3.0),
        ])
        .unwrap();
    let before = fs::read_to_string(board.path()).unwrap();

    fs::set_permissions(board.path(), fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read(board.path()).is_ok() {
        // root ignores file modes, so the board can't be made unreadable
        fs::set_permissions(board.path(), fs::Permissions::from_mode(0o644)).unwrap();
        return;
    }
    assert!(board.load().is_err());

    let entries = board.record_result("ME", 9.0);
    assert_eq!(entries, vec![ScoreEntry::new("ME", 9.0)]);

    fs::set_permissions(board.path(), fs::Permissions::from_mode(0o644)).unwrap();
    assert_eq!(fs::read_to_string(board.path()).unwrap(), before);
    assert_eq!(times(&board.load().unwrap()), vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_failed_save_keeps_old_board() {
    let dir = TempDir::new().unwrap();
    let board = Leaderboard::new(dir.path().join("table.csv"));
    board.save(&[ScoreEntry::new("KEEP", 3.0)]).unwrap();

    // the temporary sibling can't be created as a file
    fs::create_dir(dir.path().join("table.csv.tmp")).unwrap();
    assert!(board.save(&[ScoreEntry::new("LOST", 1.0)]).is_err());

    assert_eq!(board.load().unwrap(), vec![ScoreEntry::new("KEEP", 3.0)]);
}
