// src/engine/table_manager.rs

use std::collections::HashMap;

use tracing::{error, info, warn};

use crate::domain::{HumanSeat, SessionConfig, SessionPhase, TableId};
use crate::domain::session::GameSession;
use crate::engine::{self, Action, EngineError, RandomSource, SessionEngine, SessionEvent, TableServices};

/// Контракты мест и входные точки протокола для одного стола.
impl SessionEngine {
    /// Посадить человека (до старта игры).
    pub fn join(&mut self, connection: &str, name: &str) -> Result<(), EngineError> {
        let session = &mut self.session;
        if session.phase != SessionPhase::Lobby {
            return Err(EngineError::GameAlreadyStarted);
        }
        if session.human_for_connection(connection).is_some() {
            return Err(EngineError::AlreadySeated);
        }
        if session.missing_humans() == 0 {
            return Err(EngineError::GameFull);
        }

        session.humans.push(HumanSeat {
            connection: connection.to_string(),
            name: name.to_string(),
            player: None,
        });
        info!(table = %session.id, player = name, "игрок подключился");

        let joined = session.humans.len();
        let needed = session.config.human_count as usize;
        self.events.push(SessionEvent::PlayerJoined {
            name: name.to_string(),
            joined,
            needed,
        });
        Ok(())
    }

    /// Отключение. Место игрока остаётся за столом (за него сработает таймаут).
    /// Возвращает `true`, если подключение было за этим столом.
    pub fn leave(&mut self, connection: &str) -> bool {
        let session = &mut self.session;
        let Some(pos) = session.humans.iter().position(|h| h.connection == connection) else {
            return false;
        };
        let seat = session.humans.remove(pos);
        info!(table = %session.id, player = %seat.name, "игрок отключился");
        self.events.push(SessionEvent::PlayerLeft { name: seat.name });
        true
    }

    /// Старт игры: все места людей должны быть заняты.
    pub fn start_game<R: RandomSource>(&mut self, rng: &mut R) -> Result<(), EngineError> {
        if self.session.phase != SessionPhase::Lobby {
            return Err(EngineError::GameAlreadyStarted);
        }
        let missing = self.session.missing_humans();
        if missing > 0 {
            return Err(EngineError::WaitingForPlayers { missing });
        }
        engine::initialize_players(self, rng)?;
        engine::start_round(self)
    }

    /// Действие человека по токену с провода.
    pub fn submit_action(&mut self, connection: &str, token: &str) -> Result<(), EngineError> {
        let action: Action = token.parse()?;

        let player = self
            .session
            .player_for_connection(connection)
            .ok_or(EngineError::UnknownConnection)?;

        if self.session.phase != SessionPhase::InRound || !self.session.waiting_for_action {
            return Err(EngineError::NoActiveRound);
        }
        let actor = self.session.current_actor().ok_or(EngineError::NoActiveRound)?;
        if actor.id != player || !actor.is_human {
            return Err(EngineError::NotYourTurn);
        }
        if !self.legal_actions().contains(&action) {
            return Err(EngineError::IllegalAction);
        }

        engine::apply_action(self, action)
    }

    /// Следующий раунд по запросу участника.
    pub fn next_round(&mut self) -> Result<(), EngineError> {
        match self.session.phase {
            SessionPhase::BetweenRounds => engine::start_round(self),
            SessionPhase::InRound => Err(EngineError::RoundInProgress),
            SessionPhase::Lobby | SessionPhase::Finished => Err(EngineError::NoActiveRound),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.session.phase == SessionPhase::Finished
    }

    /// Подключённых людей не осталось (после старта такой стол закрывается).
    pub fn is_abandoned(&self) -> bool {
        self.session.humans.is_empty()
    }
}

/// Реестр столов: TableId -> стол.
///
/// Однопоточный вариант (CLI, тесты). Для живых подключений — `host::Lobby`,
/// где каждый стол обслуживает отдельный таск.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    tables: HashMap<TableId, SessionEngine>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Создать стол под заданным кодом.
    pub fn create(
        &mut self,
        id: TableId,
        config: SessionConfig,
        services: TableServices,
    ) -> Result<&mut SessionEngine, EngineError> {
        if self.tables.contains_key(&id) {
            return Err(EngineError::TableExists(id));
        }
        let session = GameSession::new(id.clone(), config)?;
        info!(table = %id, "стол создан");
        Ok(self
            .tables
            .entry(id)
            .or_insert_with(|| SessionEngine::new(session, services)))
    }

    pub fn has_table(&self, id: &str) -> bool {
        self.tables.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&SessionEngine> {
        self.tables.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut SessionEngine> {
        self.tables.get_mut(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<SessionEngine> {
        let removed = self.tables.remove(id);
        if removed.is_some() {
            info!(table = %id, "стол закрыт");
        }
        removed
    }

    pub fn tables(&self) -> impl Iterator<Item = &SessionEngine> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn join(&mut self, id: &str, connection: &str, name: &str) -> Result<Vec<SessionEvent>, EngineError> {
        self.run(id, |t| t.join(connection, name))
    }

    pub fn start<R: RandomSource>(&mut self, id: &str, rng: &mut R) -> Result<Vec<SessionEvent>, EngineError> {
        self.run(id, |t| t.start_game(rng))
    }

    pub fn act(&mut self, id: &str, connection: &str, token: &str) -> Result<Vec<SessionEvent>, EngineError> {
        self.run(id, |t| t.submit_action(connection, token))
    }

    pub fn next_round(&mut self, id: &str) -> Result<Vec<SessionEvent>, EngineError> {
        self.run(id, |t| t.next_round())
    }

    /// Отключение: убираем подключение со всех столов; пустые столы закрываем.
    pub fn disconnect(&mut self, connection: &str) -> Vec<(TableId, Vec<SessionEvent>)> {
        let mut out = Vec::new();
        let mut abandoned = Vec::new();
        for (id, table) in self.tables.iter_mut() {
            if table.leave(connection) {
                out.push((id.clone(), table.events.drain()));
                if table.is_abandoned() {
                    abandoned.push(id.clone());
                }
            }
        }
        for id in abandoned {
            self.remove(&id);
        }
        out
    }

    /// Выполнить операцию над столом, вычитать события, снести стол
    /// при окончании игры или фатальной ошибке.
    fn run<F>(&mut self, id: &str, op: F) -> Result<Vec<SessionEvent>, EngineError>
    where
        F: FnOnce(&mut SessionEngine) -> Result<(), EngineError>,
    {
        let table = self
            .tables
            .get_mut(id)
            .ok_or_else(|| EngineError::TableNotFound(id.to_string()))?;

        match op(table) {
            Ok(()) => {
                let events = table.events.drain();
                if table.is_finished() {
                    self.remove(id);
                }
                Ok(events)
            }
            Err(e) if e.is_fatal() => {
                error!(table = %id, error = %e, "нарушено предусловие, стол закрывается");
                self.remove(id);
                Err(e)
            }
            Err(e) => {
                warn!(table = %id, error = %e, "действие отклонено");
                Err(e)
            }
        }
    }
}
