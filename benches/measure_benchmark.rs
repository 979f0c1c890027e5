use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use dirsize::fs::{FsDirectory, SizeMode};
use dirsize::measure::Measurer;
use dirsize::synthetic::SyntheticDir;
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use tokio::runtime::Runtime;

fn create_test_directory_structure(dir: &Path, depth: usize, files_per_dir: usize) {
    if depth == 0 {
        return;
    }

    for i in 0..files_per_dir {
        let file_path = dir.join(format!("file_{}.txt", i));
        fs::write(&file_path, format!("Content of file {}", i)).unwrap();
    }

    for i in 0..3 {
        let subdir_path = dir.join(format!("subdir_{}", i));
        fs::create_dir_all(&subdir_path).unwrap();
        create_test_directory_structure(&subdir_path, depth - 1, files_per_dir);
    }
}

fn synthetic_tree(name: &str, depth: usize, width: usize) -> SyntheticDir {
    let mut dir = SyntheticDir::new(name).file("a", 10).file("b", 20);
    if depth > 0 {
        for i in 0..width {
            dir = dir.dir(synthetic_tree(&format!("d{i}"), depth - 1, width));
        }
    }
    dir
}

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn bench_filesystem(c: &mut Criterion) {
    let rt = runtime();
    let temp_dir = TempDir::new().unwrap();
    create_test_directory_structure(temp_dir.path(), 5, 10);

    let mut group = c.benchmark_group("filesystem");
    let limits = [None, NonZeroUsize::new(4), NonZeroUsize::new(32)];
    for limit in limits {
        let label = limit.map_or("unbounded".to_string(), |n| n.to_string());
        let measurer = match limit {
            Some(n) => Measurer::with_max_in_flight(n),
            None => Measurer::new(),
        };
        group.bench_with_input(BenchmarkId::new("max_in_flight", label), &measurer, |b, m| {
            b.iter(|| {
                rt.block_on(async {
                    let dir = FsDirectory::open(temp_dir.path(), SizeMode::Apparent)
                        .await
                        .unwrap();
                    black_box(m.measure(dir).await.unwrap())
                })
            })
        });
    }
    group.finish();
}

fn bench_synthetic_latency(c: &mut Criterion) {
    let rt = runtime();
    // listings that wait on I/O are where fan-out pays off
    let tree = synthetic_tree("/bench", 3, 4).with_latency(Duration::from_millis(1));

    let mut group = c.benchmark_group("synthetic_latency");
    group.sample_size(20);
    group.bench_function("unbounded", |b| {
        b.iter(|| rt.block_on(Measurer::new().measure(black_box(tree.clone()))).unwrap())
    });
    group.bench_function("serial", |b| {
        let serial = Measurer::with_max_in_flight(NonZeroUsize::new(1).unwrap());
        b.iter(|| rt.block_on(serial.measure(black_box(tree.clone()))).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_filesystem, bench_synthetic_latency);
criterion_main!(benches);
