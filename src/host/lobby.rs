use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::api::{ApiError, ClientCommand, ServerEvent};
use crate::domain::{ConnectionId, GameSession, SessionConfig, TableId};
use crate::engine::{EngineError, SessionEngine, TableServices};
use crate::infra::{IdGenerator, TableRng};

use super::config::HostConfig;
use super::table_worker::{Outbox, SharedTables, TableHandle, TableRequest, TableWorker};

/// Фабрика внешних участников для нового стола (по seed стола).
pub type ServicesFactory = Arc<dyn Fn(Option<u64>) -> TableServices + Send + Sync>;

/// Точка входа для транспорта: подключения, команды, отключения.
///
/// Каждый стол живёт в своём таске; здесь только маршрутизация.
pub struct Lobby {
    tables: SharedTables,
    connections: RwLock<HashMap<ConnectionId, Outbox>>,
    memberships: RwLock<HashMap<ConnectionId, TableId>>,
    ids: IdGenerator,
    table_counter: AtomicU64,
    config: HostConfig,
    services: ServicesFactory,
}

impl Lobby {
    /// Лобби со стандартными участниками (`TableServices::standard`).
    pub fn new(config: HostConfig) -> Self {
        let passes = config.shuffle_passes;
        let services: ServicesFactory = Arc::new(move |seed| TableServices::standard(seed, passes));
        Self::with_services(config, services)
    }

    pub fn with_services(config: HostConfig, services: ServicesFactory) -> Self {
        Self {
            tables: Arc::new(RwLock::new(HashMap::new())),
            connections: RwLock::new(HashMap::new()),
            memberships: RwLock::new(HashMap::new()),
            ids: IdGenerator::new(),
            table_counter: AtomicU64::new(0),
            config,
            services,
        }
    }

    /// Новое подключение: id и поток событий для него.
    pub async fn connect(&self) -> (ConnectionId, UnboundedReceiver<ServerEvent>) {
        let (tx, rx) = unbounded_channel();
        let id = self.ids.next_connection_id();
        self.connections.write().await.insert(id.clone(), tx);
        info!(connection = %id, "подключение");
        (id, rx)
    }

    /// Выполнить команду клиента. Ошибка также уходит клиенту событием `error`.
    pub async fn dispatch(&self, connection: &str, command: ClientCommand) -> Result<(), ApiError> {
        let result = self.route(connection, command).await;
        if let Err(e) = &result {
            warn!(connection, error = %e, "команда отклонена");
            if let Some(outbox) = self.outbox(connection).await {
                let _ = outbox.send(ServerEvent::error(e.clone()));
            }
        }
        result
    }

    /// То же для сырого JSON с провода.
    pub async fn dispatch_json(&self, connection: &str, raw: &str) -> Result<(), ApiError> {
        match ClientCommand::from_json(raw) {
            Ok(command) => self.dispatch(connection, command).await,
            Err(e) => {
                if let Some(outbox) = self.outbox(connection).await {
                    let _ = outbox.send(ServerEvent::error(e.clone()));
                }
                Err(e)
            }
        }
    }

    /// Отключение: уходим из стола (если были) и забываем подключение.
    pub async fn disconnect(&self, connection: &str) {
        let table = self.memberships.write().await.remove(connection);
        if let Some(table_id) = table {
            if let Some(handle) = self.handle(&table_id).await {
                let connection = connection.to_string();
                let _ = handle
                    .request(|reply| TableRequest::Leave { connection, reply })
                    .await;
            }
        }
        self.connections.write().await.remove(connection);
        info!(connection, "отключение");
    }

    pub async fn has_table(&self, id: &str) -> bool {
        self.tables.read().await.contains_key(id)
    }

    pub async fn table_count(&self) -> usize {
        self.tables.read().await.len()
    }

    async fn route(&self, connection: &str, command: ClientCommand) -> Result<(), ApiError> {
        let outbox = self.outbox(connection).await.ok_or(EngineError::UnknownConnection)?;
        match command {
            ClientCommand::CreateGame { player_name, config } => {
                self.create_game(connection, player_name, config, outbox).await
            }
            ClientCommand::JoinGame { game_id, player_name } => {
                self.join_game(connection, &game_id, player_name, outbox).await
            }
            ClientCommand::StartGame { game_id } => {
                let handle = self.require_handle(&game_id).await?;
                let connection = connection.to_string();
                handle
                    .request(|reply| TableRequest::Start { connection, reply })
                    .await
                    .map_err(ApiError::from)
            }
            ClientCommand::PlayerAction { game_id, action } => {
                let handle = self.require_handle(&game_id).await?;
                let connection = connection.to_string();
                handle
                    .request(|reply| TableRequest::Action {
                        connection,
                        token: action,
                        reply,
                    })
                    .await
                    .map_err(ApiError::from)
            }
            ClientCommand::NextRound { game_id } => {
                let handle = self.require_handle(&game_id).await?;
                let connection = connection.to_string();
                handle
                    .request(|reply| TableRequest::NextRound { connection, reply })
                    .await
                    .map_err(ApiError::from)
            }
        }
    }

    async fn create_game(
        &self,
        connection: &str,
        player_name: String,
        config: SessionConfig,
        outbox: Outbox,
    ) -> Result<(), ApiError> {
        self.ensure_free(connection).await?;

        let id = self.ids.next_table_code();
        let session = GameSession::new(id.clone(), config).map_err(EngineError::from)?;
        let n = self.table_counter.fetch_add(1, Ordering::Relaxed);
        let seed = self.config.rng_seed.map(|s| s.wrapping_add(n.wrapping_mul(2)));
        let engine = SessionEngine::new(session, (self.services)(seed));
        let rng = TableRng::new(seed.map(|s| s.wrapping_add(1)));

        let handle = TableWorker::spawn(engine, rng, self.config.time_rules, self.tables.clone());
        self.tables.write().await.insert(id.clone(), handle);
        info!(table = %id, creator = %player_name, "игра создана");

        let _ = outbox.send(ServerEvent::GameCreated {
            game_id: id.clone(),
            player_name: player_name.clone(),
        });
        self.join_game(connection, &id, player_name, outbox).await
    }

    async fn join_game(
        &self,
        connection: &str,
        game_id: &str,
        player_name: String,
        outbox: Outbox,
    ) -> Result<(), ApiError> {
        self.ensure_free(connection).await?;
        let handle = self.require_handle(game_id).await?;
        let conn = connection.to_string();
        handle
            .request(|reply| TableRequest::Join {
                connection: conn,
                name: player_name,
                outbox,
                reply,
            })
            .await?;
        self.memberships
            .write()
            .await
            .insert(connection.to_string(), game_id.to_string());
        Ok(())
    }

    /// Подключение может сидеть только за одним живым столом.
    async fn ensure_free(&self, connection: &str) -> Result<(), ApiError> {
        let current = self.memberships.read().await.get(connection).cloned();
        match current {
            Some(table) if self.has_table(&table).await => Err(EngineError::AlreadySeated.into()),
            _ => Ok(()),
        }
    }

    async fn outbox(&self, connection: &str) -> Option<Outbox> {
        self.connections.read().await.get(connection).cloned()
    }

    async fn handle(&self, id: &str) -> Option<TableHandle> {
        self.tables.read().await.get(id).cloned()
    }

    async fn require_handle(&self, id: &str) -> Result<TableHandle, ApiError> {
        self.handle(id)
            .await
            .ok_or_else(|| ApiError::TableNotFound(id.to_string()))
    }
}
