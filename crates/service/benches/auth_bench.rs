use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use std::time::Duration;

use service::auth::password::PasswordPolicy;
use service::auth::repository::mock::MockAuthStorage;
use service::auth::AuthService;

fn bench_login(c: &mut Criterion) {
    let storage = Arc::new(MockAuthStorage::default().with_app(1, "bench", "secret"));
    let svc = AuthService::new(storage, PasswordPolicy::default(), Duration::from_secs(3600));

    // pre-create user outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _ = rt.block_on(svc.register("bench@example.com", "Benchmark1"));

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            let _ = rt
                .block_on(svc.login("bench@example.com", "Benchmark1", 1))
                .unwrap();
        });
    });
}

criterion_group!(benches, bench_login);
criterion_main!(benches);
