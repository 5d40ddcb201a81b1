use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Фильтр по умолчанию, если `RUST_LOG` не задан.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Подключить tracing для бинарей. Уровень — из `RUST_LOG`.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// То же для тестов: уровень из `TEST_LOG`, затем `RUST_LOG`, иначе `warn`.
/// Повторный вызов ничего не делает.
pub fn init_test_tracing() {
    let filter = std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .without_time()
        .try_init()
        .ok();
}
