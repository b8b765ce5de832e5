use std::time::{Duration, Instant};

use schoolhub_db::{DbConfig, PoolManager};
use sqlx::PgPool;

#[sqlx::test]
async fn test_acquire_returns_the_same_pool(pool: PgPool) {
    let manager = PoolManager::from_pool(pool);

    let a = manager.acquire().await;
    let b = manager.acquire().await;

    // Both handles share one set of connections.
    let conn = a.acquire().await.unwrap();
    assert!(b.size() >= 1);
    assert_eq!(b.size(), a.size());
    drop(conn);
    assert!(manager.is_initialized().await);
}

#[sqlx::test]
async fn test_connection_check_succeeds(pool: PgPool) {
    let manager = PoolManager::from_pool(pool);
    assert!(manager.test().await);
}

#[sqlx::test]
async fn test_ready_bootstraps_schema(pool: PgPool) {
    let manager = PoolManager::from_pool(pool);

    let ready = manager.ready().await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schools")
        .fetch_one(&ready)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test]
async fn test_close_resets_and_rebuilds(pool: PgPool) {
    let manager = PoolManager::from_pool(pool);
    let before = manager.ready().await.unwrap();

    manager.close().await;
    assert!(!manager.is_initialized().await);
    assert!(before.is_closed());

    // The next acquire builds a fresh, working pool.
    let after = manager.ready().await.unwrap();
    assert!(!after.is_closed());
    assert!(manager.test().await);

    manager.close().await;
}

#[sqlx::test]
async fn test_close_without_pool_is_a_no_op(pool: PgPool) {
    let manager = PoolManager::from_pool(pool);
    manager.close().await;
    manager.close().await;
    assert!(!manager.is_initialized().await);
}

#[tokio::test]
async fn test_unreachable_database_reports_false() {
    let config = DbConfig {
        host: "127.0.0.1".into(),
        port: 1,
        connect_timeout: Duration::from_secs(2),
        ..DbConfig::default()
    };
    let manager = PoolManager::new(&config).unwrap();

    // Building the manager and the lazy pool never touches the network.
    assert!(!manager.is_initialized().await);
    manager.acquire().await;
    assert!(manager.is_initialized().await);

    assert!(!manager.test().await);
    assert!(manager.ready().await.is_err());
}

#[sqlx::test]
async fn test_concurrent_ready_calls_all_succeed(pool: PgPool) {
    let manager = PoolManager::from_pool(pool);

    let (a, b, c, d) = tokio::join!(
        manager.ready(),
        manager.ready(),
        manager.ready(),
        manager.ready()
    );
    for result in [a, b, c, d] {
        assert!(result.is_ok());
    }
}

#[tokio::test]
async fn test_unresponsive_database_times_out_callers_in_parallel() {
    // Accept connections and never answer the startup handshake.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let timeout = Duration::from_secs(2);
    let config = DbConfig {
        host: "127.0.0.1".into(),
        port,
        connect_timeout: timeout,
        ..DbConfig::default()
    };
    let manager = PoolManager::new(&config).unwrap();

    let started = Instant::now();
    let (a, b, c, healthy) = tokio::join!(
        manager.ready(),
        manager.ready(),
        manager.ready(),
        manager.test()
    );
    let elapsed = started.elapsed();

    assert!(a.is_err());
    assert!(b.is_err());
    assert!(c.is_err());
    assert!(!healthy);
    // Run back to back, four callers would need at least 4 * timeout.
    assert!(
        elapsed < timeout * 2,
        "callers were serialized: took {elapsed:?}"
    );

    server.abort();
}
