//! Воркер стола: один tokio-таск владеет `SessionEngine` и обрабатывает
//! запросы из очереди строго по одному.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::{oneshot, RwLock};
use tokio::time::{timeout, Instant};
use tracing::{debug, error, info};

use crate::api::ServerEvent;
use crate::domain::{ConnectionId, TableId};
use crate::engine::{EngineError, SessionEngine, SessionEvent};
use crate::infra::TableRng;
use crate::time_ctrl::{TimeRules, TurnClock};

/// Канал исходящих событий одного подключения.
pub type Outbox = UnboundedSender<ServerEvent>;

/// Общая таблица живых столов.
pub type SharedTables = Arc<RwLock<HashMap<TableId, TableHandle>>>;

pub type Reply = oneshot::Sender<Result<(), EngineError>>;

/// Запрос к столу.
#[derive(Debug)]
pub enum TableRequest {
    Join {
        connection: ConnectionId,
        name: String,
        outbox: Outbox,
        reply: Reply,
    },
    Leave {
        connection: ConnectionId,
        reply: Reply,
    },
    Start {
        connection: ConnectionId,
        reply: Reply,
    },
    Action {
        connection: ConnectionId,
        token: String,
        reply: Reply,
    },
    NextRound {
        connection: ConnectionId,
        reply: Reply,
    },
}

/// Ручка для отправки запросов в воркер стола.
#[derive(Clone, Debug)]
pub struct TableHandle {
    pub id: TableId,
    pub tx: UnboundedSender<TableRequest>,
}

impl TableHandle {
    /// Отправить запрос и дождаться ответа воркера.
    pub async fn request<F>(&self, build: F) -> Result<(), EngineError>
    where
        F: FnOnce(Reply) -> TableRequest,
    {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(build(reply))
            .map_err(|_| EngineError::TableNotFound(self.id.clone()))?;
        rx.await
            .unwrap_or_else(|_| Err(EngineError::TableNotFound(self.id.clone())))
    }
}

pub struct TableWorker {
    engine: SessionEngine,
    rng: TableRng,
    rules: TimeRules,
    clock: TurnClock,
    members: Vec<(ConnectionId, Outbox)>,
    rx: UnboundedReceiver<TableRequest>,
    tables: SharedTables,
    broken: bool,
}

impl TableWorker {
    /// Запустить воркер и вернуть ручку. Регистрация ручки в `tables` — на вызывающем.
    pub fn spawn(engine: SessionEngine, rng: TableRng, rules: TimeRules, tables: SharedTables) -> TableHandle {
        let (tx, rx) = unbounded_channel();
        let id = engine.session.id.clone();
        let worker = TableWorker {
            engine,
            rng,
            rules,
            clock: TurnClock::new(),
            members: Vec::new(),
            rx,
            tables,
            broken: false,
        };
        tokio::spawn(worker.run());
        TableHandle { id, tx }
    }

    fn id(&self) -> &TableId {
        &self.engine.session.id
    }

    async fn run(mut self) {
        info!(table = %self.id(), "воркер стола запущен");
        loop {
            let next = match self.clock.remaining(Instant::now()) {
                Some(left) => match timeout(left, self.rx.recv()).await {
                    Ok(next) => next,
                    Err(_) => {
                        self.on_timeout();
                        if self.should_close() {
                            self.close().await;
                            return;
                        }
                        continue;
                    }
                },
                None => self.rx.recv().await,
            };

            let Some(request) = next else {
                debug!(table = %self.id(), "очередь стола закрыта");
                return;
            };

            let (result, reply) = self.handle(request);
            if self.should_close() {
                self.close().await;
                let _ = reply.send(result);
                return;
            }
            let _ = reply.send(result);
        }
    }

    fn handle(&mut self, request: TableRequest) -> (Result<(), EngineError>, Reply) {
        match request {
            TableRequest::Join {
                connection,
                name,
                outbox,
                reply,
            } => {
                let result = self.engine.join(&connection, &name);
                if result.is_ok() {
                    self.members.push((connection, outbox));
                }
                (self.finish(result), reply)
            }
            TableRequest::Leave { connection, reply } => {
                let was_here = self.engine.leave(&connection);
                self.members.retain(|(c, _)| *c != connection);
                let result = if was_here {
                    Ok(())
                } else {
                    Err(EngineError::UnknownConnection)
                };
                (self.finish(result), reply)
            }
            TableRequest::Start { connection, reply } => {
                let result = self
                    .require_member(&connection)
                    .and_then(|_| self.engine.start_game(&mut self.rng));
                (self.finish(result), reply)
            }
            TableRequest::Action {
                connection,
                token,
                reply,
            } => {
                let result = self.engine.submit_action(&connection, &token);
                (self.finish(result), reply)
            }
            TableRequest::NextRound { connection, reply } => {
                let result = self
                    .require_member(&connection)
                    .and_then(|_| self.engine.next_round());
                (self.finish(result), reply)
            }
        }
    }

    fn require_member(&self, connection: &str) -> Result<(), EngineError> {
        if self.members.iter().any(|(c, _)| c == connection) {
            Ok(())
        } else {
            Err(EngineError::UnknownConnection)
        }
    }

    fn on_timeout(&mut self) {
        let result = self.engine.apply_timeout().map(|_| ());
        self.clock.clear();
        let _ = self.finish(result);
    }

    /// Разослать накопленные события, перезапустить таймер хода,
    /// пометить стол сломанным при фатальной ошибке.
    fn finish(&mut self, result: Result<(), EngineError>) -> Result<(), EngineError> {
        let events = self.engine.events.drain();
        self.broadcast(&events);
        self.rearm_clock(&events);

        if let Err(e) = &result {
            if e.is_fatal() {
                error!(table = %self.id(), error = %e, "нарушено предусловие, стол закрывается");
                self.broken = true;
                let event = ServerEvent::error(e.clone());
                for (_, outbox) in &self.members {
                    let _ = outbox.send(event.clone());
                }
            }
        }
        result
    }

    fn broadcast(&self, events: &[SessionEvent]) {
        for (connection, outbox) in &self.members {
            let viewer = self.engine.session.player_for_connection(connection);
            for event in events {
                let _ = outbox.send(ServerEvent::from_session_event(event, viewer));
            }
        }
    }

    fn rearm_clock(&mut self, events: &[SessionEvent]) {
        let Some(awaited) = self.engine.awaited_player() else {
            self.clock.clear();
            return;
        };
        let prompted = events.iter().any(|e| {
            matches!(e, SessionEvent::ActionRequested { player, .. } if *player == awaited)
        });
        if prompted {
            self.clock.start_turn(awaited, &self.rules, Instant::now());
        }
    }

    fn should_close(&self) -> bool {
        self.broken || self.engine.is_finished() || self.engine.is_abandoned()
    }

    async fn close(&mut self) {
        self.tables.write().await.remove(self.id());
        info!(table = %self.id(), "стол закрыт");
    }
}
