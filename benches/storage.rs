//! Secure storage benchmark: insert and read encrypted analysis records.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use phishguard_agent::storage::AnalysisStore;
use tempfile::tempdir;

const PAYLOAD: &str =
    r#"{"url":"https://secure-login.example.com/session","values":[42.0,19.0,8.0,1.0,0.0],"verdict":null}"#;

fn bench_insert_analysis(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.db");
    let store = AnalysisStore::open(&path, b"bench-secret").unwrap();

    c.bench_function("storage_insert_analysis", |b| {
        b.iter(|| {
            let id = format!("an-{}", black_box(0));
            black_box(store.insert_analysis(&id, 0, "basic-30", PAYLOAD, Some("legitimate"), Some(0.1)))
                .unwrap()
        })
    });
}

fn bench_insert_and_read(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.db");
    let store = AnalysisStore::open(&path, b"bench-secret").unwrap();
    store
        .insert_analysis("an-1", 0, "basic-30", PAYLOAD, Some("legitimate"), Some(0.1))
        .unwrap();

    c.bench_function("storage_get_analysis", |b| {
        b.iter(|| black_box(store.get_analysis("an-1")).unwrap())
    });
}

criterion_group!(benches, bench_insert_analysis, bench_insert_and_read);
criterion_main!(benches);
