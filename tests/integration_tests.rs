use fileprune::cli::{CliError, Command, FilterArgs, MoveArgs, run_cli_with};
use fileprune::errors::TrashError;
use fileprune::mover::{NoProgress, Trasher};
use fileprune::session::{AssumeYes, MoveResult, PruneSession};
use fileprune::{ScanOptions, SessionError, ValidationError};
/// Integration tests for fileprune
///
/// These tests drive the preview and move workflows end to end against real
/// temporary folders. The trash is replaced by a "bin" directory so moved
/// files can be inspected afterwards.
///
/// Test categories:
/// 1. Preview and classification
/// 2. Moving all non-matching files
/// 3. Moving a selection
/// 4. Confirmation and configuration
/// 5. Edge cases and error scenarios
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// A scanned folder plus a separate scratch area for the bin and config.
struct TestFixture {
    temp_dir: TempDir,
    aux_dir: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let aux_dir = TempDir::new().expect("Failed to create aux directory");
        fs::create_dir(aux_dir.path().join("bin")).expect("Failed to create bin");
        fs::write(aux_dir.path().join("config.toml"), "").expect("Failed to write config");
        TestFixture { temp_dir, aux_dir }
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    fn bin(&self) -> PathBuf {
        self.aux_dir.path().join("bin")
    }

    fn config_path(&self) -> PathBuf {
        self.aux_dir.path().join("config.toml")
    }

    fn write_config(&self, content: &str) {
        fs::write(self.config_path(), content).expect("Failed to write config");
    }

    /// Create a file, creating parent directories as needed.
    fn create_file(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, rel_path).expect("Failed to write file");
    }

    fn create_files(&self, rel_paths: &[&str]) {
        for rel_path in rel_paths {
            self.create_file(rel_path);
        }
    }

    fn assert_file_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(path.is_file(), "File should exist: {}", path.display());
    }

    fn assert_file_not_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(!path.exists(), "File should not exist: {}", path.display());
    }

    fn trashed(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.bin())
            .expect("Failed to read bin")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    fn filter(&self, name: &str, formats: &str, recursive: bool) -> FilterArgs {
        FilterArgs {
            folder: self.path().to_path_buf(),
            name: Some(name.to_string()),
            formats: Some(formats.to_string()),
            recursive,
            no_recursive: !recursive,
        }
    }
}

/// Moves files into a bin directory; refuses names containing "locked".
struct BinTrash {
    bin: PathBuf,
    attempts: RefCell<Vec<PathBuf>>,
}

impl BinTrash {
    fn new(bin: PathBuf) -> Self {
        Self {
            bin,
            attempts: RefCell::new(Vec::new()),
        }
    }
}

impl Trasher for BinTrash {
    fn send_to_trash(&self, path: &Path) -> Result<(), TrashError> {
        self.attempts.borrow_mut().push(path.to_path_buf());
        let name = path
            .file_name()
            .ok_or_else(|| TrashError::new(path, "no file name"))?;
        if name.to_string_lossy().contains("locked") {
            return Err(TrashError::new(path, "file is locked"));
        }
        fs::rename(path, self.bin.join(name)).map_err(|e| TrashError::new(path, e.to_string()))
    }
}

fn never_asked(prompt: &str) -> bool {
    panic!("confirmation should not be requested: {}", prompt);
}

// ============================================================================
// Test Suite 1: Preview and Classification
// ============================================================================

#[test]
fn test_recursive_format_filter_with_empty_name() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.txt", "sub/b.txt", "c.jpg"]);

    let mut session = PruneSession::new(ScanOptions::default());
    session.set_folder(fixture.path());
    let result = session.preview("", "txt", true).expect("Preview failed");

    let mut matched: Vec<&str> = result.matched.iter().map(|r| r.name.as_str()).collect();
    matched.sort();
    assert_eq!(matched, vec!["a.txt", "b.txt"]);
    assert!(result.unmatched.is_empty());
    assert!(session.unmatched().is_empty());

    let trash = BinTrash::new(fixture.bin());
    let err = session
        .move_all_unmatched(&trash, &mut AssumeYes, &mut NoProgress)
        .unwrap_err();
    assert_eq!(err, ValidationError::NothingToMove);
    assert!(trash.attempts.borrow().is_empty());
}

#[test]
fn test_preview_does_not_touch_files() {
    let fixture = TestFixture::new();
    fixture.create_files(&["keep_1.txt", "junk.txt", "sub/junk2.txt"]);

    let result = run_cli_with(
        &Command::Preview(fixture.filter("keep", "", true)),
        Some(&fixture.config_path()),
        &BinTrash::new(fixture.bin()),
        &mut never_asked,
    );

    assert!(result.is_ok());
    fixture.assert_file_exists("junk.txt");
    fixture.assert_file_exists("sub/junk2.txt");
    assert!(fixture.trashed().is_empty());
}

#[test]
fn test_non_recursive_ignores_subfolders() {
    let fixture = TestFixture::new();
    fixture.create_files(&["top.txt", "nested/deep.txt", "nested/more/deeper.txt"]);

    let mut session = PruneSession::new(ScanOptions::default());
    session.set_folder(fixture.path());
    let result = session.preview("nothing", "", false).unwrap();

    let names: Vec<&str> = result.unmatched.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["top.txt"]);

    let result = session.preview("nothing", "", true).unwrap();
    assert_eq!(result.unmatched.len(), 3);
}

// ============================================================================
// Test Suite 2: Moving All Non-Matching Files
// ============================================================================

#[test]
fn test_move_all_unmatched() {
    let fixture = TestFixture::new();
    fixture.create_files(&[
        "report.txt",
        "note.md",
        "report_v2.doc",
        "archive/old_notes.txt",
        "archive/REPORT_2020.txt",
    ]);

    let command = Command::Move(MoveArgs {
        filter: fixture.filter("report", "", true),
        yes: true,
        ..Default::default()
    });
    let result = run_cli_with(
        &command,
        Some(&fixture.config_path()),
        &BinTrash::new(fixture.bin()),
        &mut never_asked,
    );

    assert!(result.is_ok());
    fixture.assert_file_exists("report.txt");
    fixture.assert_file_exists("report_v2.doc");
    fixture.assert_file_exists("archive/REPORT_2020.txt");
    fixture.assert_file_not_exists("note.md");
    fixture.assert_file_not_exists("archive/old_notes.txt");
    assert_eq!(fixture.trashed(), vec!["note.md", "old_notes.txt"]);
}

#[test]
fn test_move_all_only_considers_listed_formats() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.jpg", "b.PNG", "c.txt", "keep.jpg"]);

    let command = Command::Move(MoveArgs {
        filter: fixture.filter("keep", "jpg, .png", false),
        yes: true,
        ..Default::default()
    });
    let result = run_cli_with(
        &command,
        Some(&fixture.config_path()),
        &BinTrash::new(fixture.bin()),
        &mut never_asked,
    );

    assert!(result.is_ok());
    assert_eq!(fixture.trashed(), vec!["a.jpg", "b.PNG"]);
    fixture.assert_file_exists("c.txt");
    fixture.assert_file_exists("keep.jpg");
}

#[test]
fn test_move_all_with_failures_reports_and_clears_view() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.txt", "b_locked.txt", "c.txt"]);

    let mut session = PruneSession::new(ScanOptions::default());
    session.set_folder(fixture.path());
    session.preview("zzz", "", false).unwrap();

    let trash = BinTrash::new(fixture.bin());
    let MoveResult::Completed(outcome) = session
        .move_all_unmatched(&trash, &mut AssumeYes, &mut NoProgress)
        .unwrap()
    else {
        panic!("expected the batch to run");
    };

    assert_eq!(outcome.moved_count() + outcome.error_count(), 3);
    assert_eq!(outcome.error_count(), 1);
    assert!(session.unmatched().is_empty());
    fixture.assert_file_exists("b_locked.txt");
    assert_eq!(session.status(), "moved 2, failed 1");
}

#[test]
fn test_partial_failure_exit_and_report() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.txt", "b_locked.txt"]);
    let report_path = fixture.aux_dir.path().join("report.json");

    let command = Command::Move(MoveArgs {
        filter: fixture.filter("zzz", "", false),
        yes: true,
        report: Some(report_path.clone()),
        ..Default::default()
    });
    let result = run_cli_with(
        &command,
        Some(&fixture.config_path()),
        &BinTrash::new(fixture.bin()),
        &mut never_asked,
    );

    assert!(matches!(result, Err(CliError::PartialFailure(1))));

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).expect("Report missing"))
            .expect("Report is not JSON");
    assert_eq!(report["mode"], "all");
    assert_eq!(report["moved_count"], 1);
    assert_eq!(report["error_count"], 1);
    assert_eq!(
        report["failed"][0]["path"],
        fixture.path().join("b_locked.txt").to_string_lossy().to_string()
    );
    assert_eq!(report["failed"][0]["reason"], "file is locked");
}

// ============================================================================
// Test Suite 3: Moving a Selection
// ============================================================================

#[test]
fn test_move_selected_entries() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.txt", "b.txt", "c.txt"]);

    let command = Command::Move(MoveArgs {
        filter: fixture.filter("zzz", "", false),
        select: vec![1, 3],
        yes: true,
        ..Default::default()
    });
    let result = run_cli_with(
        &command,
        Some(&fixture.config_path()),
        &BinTrash::new(fixture.bin()),
        &mut never_asked,
    );

    assert!(result.is_ok());
    assert_eq!(fixture.trashed(), vec!["a.txt", "c.txt"]);
    fixture.assert_file_exists("b.txt");
}

#[test]
fn test_selection_out_of_range_is_warning() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.txt", "b.txt"]);

    for (select, position) in [(vec![0], 0), (vec![2, 3], 3)] {
        let command = Command::Move(MoveArgs {
            filter: fixture.filter("zzz", "", false),
            select,
            yes: true,
            ..Default::default()
        });
        let trash = BinTrash::new(fixture.bin());
        let result = run_cli_with(
            &command,
            Some(&fixture.config_path()),
            &trash,
            &mut never_asked,
        );

        match result {
            Err(CliError::Warning(message)) => assert_eq!(
                message,
                format!(
                    "selection {} is out of range (the list has 2 entries)",
                    position
                )
            ),
            other => panic!("expected a warning, got {:?}", other),
        }
        assert!(trash.attempts.borrow().is_empty());
    }
}

#[test]
fn test_selected_move_keeps_failures_in_view() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a_locked.txt", "b.txt", "c.txt"]);

    let mut session = PruneSession::new(ScanOptions::default());
    session.set_folder(fixture.path());
    session.preview("zzz", "txt", false).unwrap();
    session.select([0, 1]).unwrap();

    let trash = BinTrash::new(fixture.bin());
    let MoveResult::Completed(outcome) = session
        .move_selected(&trash, &mut AssumeYes, &mut NoProgress)
        .unwrap()
    else {
        panic!("expected the batch to run");
    };

    assert_eq!(outcome.summary(), "moved 1, failed 1");
    let listed: Vec<&str> = session.unmatched().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(listed, vec!["a_locked.txt", "c.txt"]);
    assert_eq!(fixture.trashed(), vec!["b.txt"]);
}

// ============================================================================
// Test Suite 4: Confirmation and Configuration
// ============================================================================

#[test]
fn test_declined_confirmation_moves_nothing() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.txt", "b.txt"]);

    let prompts = RefCell::new(Vec::new());
    let mut decline = |prompt: &str| {
        prompts.borrow_mut().push(prompt.to_string());
        false
    };

    let command = Command::Move(MoveArgs {
        filter: fixture.filter("zzz", "", false),
        ..Default::default()
    });
    let trash = BinTrash::new(fixture.bin());
    let result = run_cli_with(&command, Some(&fixture.config_path()), &trash, &mut decline);

    assert!(result.is_ok());
    assert_eq!(
        *prompts.borrow(),
        vec!["Move all 2 non-matching files to the trash?".to_string()]
    );
    assert!(trash.attempts.borrow().is_empty());
    fixture.assert_file_exists("a.txt");
    fixture.assert_file_exists("b.txt");
}

#[test]
fn test_config_assume_yes_skips_prompt() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.txt"]);
    fixture.write_config("[confirm]\nassume_yes = true\n");

    let command = Command::Move(MoveArgs {
        filter: fixture.filter("zzz", "", false),
        ..Default::default()
    });
    let result = run_cli_with(
        &command,
        Some(&fixture.config_path()),
        &BinTrash::new(fixture.bin()),
        &mut never_asked,
    );

    assert!(result.is_ok());
    assert_eq!(fixture.trashed(), vec!["a.txt"]);
}

#[test]
fn test_config_defaults_fill_missing_flags() {
    let fixture = TestFixture::new();
    fixture.create_files(&["final.png", "draft.png", "draft.txt", "sub/draft2.png"]);
    fixture.write_config(
        "[defaults]\nname_contains = \"final\"\nformats = \"png\"\nrecursive = false\n",
    );

    let command = Command::Move(MoveArgs {
        filter: FilterArgs {
            folder: fixture.path().to_path_buf(),
            ..Default::default()
        },
        yes: true,
        ..Default::default()
    });
    let result = run_cli_with(
        &command,
        Some(&fixture.config_path()),
        &BinTrash::new(fixture.bin()),
        &mut never_asked,
    );

    assert!(result.is_ok());
    assert_eq!(fixture.trashed(), vec!["draft.png"]);
    fixture.assert_file_exists("draft.txt");
    fixture.assert_file_exists("sub/draft2.png");
}

#[test]
fn test_skip_hidden_from_config() {
    let fixture = TestFixture::new();
    fixture.create_files(&[".env", "visible.txt"]);
    fixture.write_config("[scan]\nskip_hidden = true\n");

    let command = Command::Move(MoveArgs {
        filter: fixture.filter("zzz", "", true),
        yes: true,
        ..Default::default()
    });
    let result = run_cli_with(
        &command,
        Some(&fixture.config_path()),
        &BinTrash::new(fixture.bin()),
        &mut never_asked,
    );

    assert!(result.is_ok());
    assert_eq!(fixture.trashed(), vec!["visible.txt"]);
    fixture.assert_file_exists(".env");
}

#[test]
fn test_invalid_config_is_failure() {
    let fixture = TestFixture::new();
    fixture.write_config("[defaults]\nformats = \"png,\"\n");

    let result = run_cli_with(
        &Command::Preview(FilterArgs {
            folder: fixture.path().to_path_buf(),
            ..Default::default()
        }),
        Some(&fixture.config_path()),
        &BinTrash::new(fixture.bin()),
        &mut never_asked,
    );

    assert!(matches!(result, Err(CliError::Failure(_))));
}

// ============================================================================
// Test Suite 5: Edge Cases and Error Scenarios
// ============================================================================

#[test]
fn test_malformed_formats_are_rejected_before_any_work() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.txt"]);

    let command = Command::Move(MoveArgs {
        filter: fixture.filter("zzz", "txt,,jpg", false),
        yes: true,
        ..Default::default()
    });
    let trash = BinTrash::new(fixture.bin());
    let result = run_cli_with(
        &command,
        Some(&fixture.config_path()),
        &trash,
        &mut never_asked,
    );

    assert!(matches!(result, Err(CliError::Warning(_))));
    assert!(trash.attempts.borrow().is_empty());
    fixture.assert_file_exists("a.txt");
}

#[test]
fn test_missing_folder_is_reported_not_fatal() {
    let fixture = TestFixture::new();
    let command = Command::Preview(FilterArgs {
        folder: fixture.path().join("does_not_exist"),
        ..Default::default()
    });

    let result = run_cli_with(
        &command,
        Some(&fixture.config_path()),
        &BinTrash::new(fixture.bin()),
        &mut never_asked,
    );

    match result {
        Err(CliError::Failure(message)) => assert!(message.contains("does_not_exist")),
        other => panic!("expected a failure, got {:?}", other),
    }
}

#[test]
fn test_empty_folder_argument_is_missing_folder() {
    let mut session = PruneSession::new(ScanOptions::default());
    let err = session.preview("", "", true).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Validation(ValidationError::MissingFolder)
    ));

    let fixture = TestFixture::new();
    let result = run_cli_with(
        &Command::Preview(FilterArgs::default()),
        Some(&fixture.config_path()),
        &BinTrash::new(fixture.bin()),
        &mut never_asked,
    );
    assert!(matches!(result, Err(CliError::Warning(_))));
}

#[test]
fn test_file_removed_between_preview_and_move() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.txt", "b.txt"]);

    let mut session = PruneSession::new(ScanOptions::default());
    session.set_folder(fixture.path());
    session.preview("zzz", "", false).unwrap();
    fs::remove_file(fixture.path().join("a.txt")).unwrap();

    let trash = BinTrash::new(fixture.bin());
    let MoveResult::Completed(outcome) = session
        .move_all_unmatched(&trash, &mut AssumeYes, &mut NoProgress)
        .unwrap()
    else {
        panic!("expected the batch to run");
    };

    assert_eq!(outcome.moved_count(), 1);
    assert_eq!(outcome.error_count(), 1);
    assert_eq!(fixture.trashed(), vec!["b.txt"]);
}

#[test]
fn test_many_files_partition_exactly() {
    let fixture = TestFixture::new();
    for i in 0..40 {
        let name = if i % 4 == 0 {
            format!("keep_{}.log", i)
        } else {
            format!("other_{}.log", i)
        };
        fixture.create_file(&name);
    }

    let mut session = PruneSession::new(ScanOptions::default());
    session.set_folder(fixture.path());
    let result = session.preview("KEEP", "log", true).unwrap();

    assert_eq!(result.matched.len(), 10);
    assert_eq!(result.unmatched.len(), 30);
    assert_eq!(
        session.status(),
        "found 10 matching files, 30 non-matching files (will be moved to trash)"
    );
}
