//! Measures a tree with thousands of directories under a small descriptor
//! limit. Kept in its own test binary because it lowers `RLIMIT_NOFILE` for
//! the whole process.

#![cfg(unix)]

use dirsize::fs::{FsDirectory, SizeMode};
use dirsize::measure::Measurer;
use dirsize::thread_pool::{MAX_BLOCKING_THREADS, ThreadPoolStrategy, build_runtime};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const FD_LIMIT: libc::rlim_t = 256;

/// `outer` directories, each holding `inner` subdirectories with
/// `files_per_leaf` one-byte files.
fn create_wide_tree(root: &Path, outer: usize, inner: usize, files_per_leaf: usize) {
    for i in 0..outer {
        for j in 0..inner {
            let leaf = root.join(format!("d{}", i)).join(format!("e{}", j));
            fs::create_dir_all(&leaf).expect("Failed to create leaf dir");
            for k in 0..files_per_leaf {
                fs::write(leaf.join(format!("f{}", k)), "x").expect("Failed to write file");
            }
        }
    }
}

/// Lowers the soft descriptor limit to `limit` unless it is already lower.
fn lower_fd_limit(limit: libc::rlim_t) {
    let mut current = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };
    assert_eq!(
        unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &mut current) },
        0,
        "getrlimit failed"
    );
    if current.rlim_cur > limit {
        let lowered = libc::rlimit {
            rlim_cur: limit,
            rlim_max: current.rlim_max,
        };
        assert_eq!(
            unsafe { libc::setrlimit(libc::RLIMIT_NOFILE, &lowered) },
            0,
            "setrlimit failed"
        );
    }
}

#[test]
fn test_wide_tree_under_low_fd_limit() {
    assert!((MAX_BLOCKING_THREADS as libc::rlim_t) < FD_LIMIT);

    // temp/
    // ├── d0/
    // │   ├── e0/ f0 f1 f2
    // │   └── ... (60 leaves)
    // └── ... (60 outer dirs)
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    create_wide_tree(temp_dir.path(), 60, 60, 3);

    lower_fd_limit(FD_LIMIT);

    let runtime = build_runtime(ThreadPoolStrategy::Fixed, Some(4)).expect("Failed to build runtime");
    let result = runtime.block_on(async {
        let dir = FsDirectory::open(temp_dir.path(), SizeMode::Apparent).await?;
        Measurer::new().measure(dir).await
    });

    assert_eq!(result.expect("wide tree measurement failed"), 60 * 60 * 3);
}
