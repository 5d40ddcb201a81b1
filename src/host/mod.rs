//! Асинхронный хост столов поверх движка.
//!
//! - `Lobby` — маршрутизация команд клиентов по столам;
//! - `TableWorker` — по одному tokio-таску на стол, таймаут хода человека;
//! - `HostConfig` — настройки из окружения;
//! - `telemetry` — подключение tracing.

pub mod config;
pub mod lobby;
pub mod table_worker;
pub mod telemetry;

pub use config::{HostConfig, HostConfigError};
pub use lobby::{Lobby, ServicesFactory};
pub use table_worker::{Outbox, TableHandle, TableRequest, TableWorker};
pub use telemetry::{init_test_tracing, init_tracing};
