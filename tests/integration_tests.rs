use dirsize::error::ErrorKind;
use dirsize::fs::{FsDirectory, SizeMode};
use dirsize::measure::{Measurer, measure_directory};
use dirsize::report::{measure_paths, total_size};
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Sums every non-directory entry beneath `root` without following links.
fn walkdir_total(root: &Path) -> u64 {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| !e.file_type().is_dir())
        .map(|e| e.metadata().expect("Failed to stat entry").len())
        .sum()
}

fn create_test_directory_structure(dir: &Path, depth: usize, files_per_dir: usize) {
    if depth == 0 {
        return;
    }

    for i in 0..files_per_dir {
        let file_path = dir.join(format!("file_{}.txt", i));
        fs::write(&file_path, "x".repeat(i * 7 + depth)).unwrap();
    }

    for i in 0..3 {
        let subdir_path = dir.join(format!("subdir_{}", i));
        fs::create_dir_all(&subdir_path).unwrap();
        create_test_directory_structure(&subdir_path, depth - 1, files_per_dir);
    }
}

async fn measure_fs(path: &Path) -> Result<u64, dirsize::MeasureError> {
    let dir = FsDirectory::open(path, SizeMode::Apparent).await?;
    measure_directory(dir).await
}

#[tokio::test]
async fn test_scenario_tree_on_disk() {
    // temp/a/
    // ├── one    (10 bytes)
    // ├── two    (20 bytes)
    // └── b/
    //     └── three  (5 bytes)
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let a = temp_dir.path().join("a");
    let b = a.join("b");
    fs::create_dir_all(&b).expect("Failed to create b");
    fs::write(a.join("one"), vec![0u8; 10]).expect("Failed to write one");
    fs::write(a.join("two"), vec![0u8; 20]).expect("Failed to write two");
    fs::write(b.join("three"), vec![0u8; 5]).expect("Failed to write three");

    assert_eq!(measure_fs(&a).await.unwrap(), 35);
    assert_eq!(measure_fs(&b).await.unwrap(), 5);
}

#[tokio::test]
async fn test_empty_directory_on_disk() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    assert_eq!(measure_fs(temp_dir.path()).await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_matches_walkdir_on_generated_tree() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    create_test_directory_structure(temp_dir.path(), 4, 5);

    let expected = walkdir_total(temp_dir.path());
    assert!(expected > 0);
    assert_eq!(measure_fs(temp_dir.path()).await.unwrap(), expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_bounded_measurer_matches_unbounded() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    create_test_directory_structure(temp_dir.path(), 3, 4);

    let unbounded = measure_fs(temp_dir.path()).await.unwrap();

    let dir = FsDirectory::open(temp_dir.path(), SizeMode::Apparent)
        .await
        .unwrap();
    let bounded = Measurer::with_max_in_flight(NonZeroUsize::new(2).unwrap())
        .measure(dir)
        .await
        .unwrap();

    assert_eq!(bounded, unbounded);
}

#[tokio::test]
async fn test_nonexistent_path_is_not_found() {
    let err = measure_fs(Path::new("NotValidPath")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[cfg(unix)]
#[tokio::test]
async fn test_overlong_path_is_path_too_long() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let err = measure_fs(&temp_dir.path().join("a".repeat(260)))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PathTooLong);
}

#[cfg(unix)]
#[tokio::test]
async fn test_unreadable_subdirectory_fails_whole_tree() {
    use std::os::unix::fs::PermissionsExt;

    // permission bits do not stop root
    if unsafe { libc::geteuid() } == 0 {
        eprintln!(
            "test_unreadable_subdirectory_fails_whole_tree: running as root, skipping..."
        );
        return;
    }

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    let open = root.join("open");
    let locked = root.join("nested").join("locked");
    fs::create_dir_all(&open).unwrap();
    fs::create_dir_all(&locked).unwrap();
    fs::write(open.join("file"), "data").unwrap();
    fs::write(locked.join("secret"), "data").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let result = measure_fs(root).await;

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Access);
    assert_eq!(err.path(), locked.as_path());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_measure_paths_reports_each_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let first = temp_dir.path().join("first");
    let second = temp_dir.path().join("second");
    fs::create_dir(&first).unwrap();
    fs::create_dir(&second).unwrap();
    fs::write(first.join("f"), vec![0u8; 100]).unwrap();
    fs::write(second.join("g"), vec![0u8; 23]).unwrap();

    let paths = vec![first.clone(), second.clone()];
    let reports = measure_paths(&paths, &Measurer::new(), SizeMode::Apparent).await;

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].path, first);
    assert_eq!(reports[0].size(), Some(100));
    assert_eq!(reports[1].path, second);
    assert_eq!(reports[1].size(), Some(23));
    assert_eq!(total_size(&reports), Some(123));
}

#[tokio::test]
async fn test_measure_paths_keeps_failures_separate() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("f"), vec![0u8; 8]).unwrap();

    let paths = vec![
        temp_dir.path().to_path_buf(),
        PathBuf::from("/definitely/not/here"),
    ];
    let reports = measure_paths(&paths, &Measurer::new(), SizeMode::Apparent).await;

    assert_eq!(reports[0].size(), Some(8));
    assert_eq!(
        reports[1].error().map(|err| err.kind()),
        Some(ErrorKind::NotFound)
    );
    assert_eq!(total_size(&reports), None);
}
