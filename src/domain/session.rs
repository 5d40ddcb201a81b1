use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{RoundOutcome, Street};
use crate::domain::player::Player;
use crate::domain::{ConnectionId, PlayerId, TableId};

/// Сколько карт получает каждый игрок.
pub const CARDS_PER_HAND: usize = 2;

/// Верхняя граница мест за столом.
pub const MAX_SEATS: u8 = 10;

/// Имена ботов. Ботов за столом не больше, чем имён.
pub const BOT_NAMES: [&str; 6] = ["Alice", "Bob", "Charlie", "Diana", "Eve", "Frank"];

/// Сколько карт уходит на борд и сжигание за раунд (3 burn + 5 board).
const BOARD_AND_BURNS: usize = 8;

/// Конфиг сессии (приходит от создателя игры).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    /// Всего мест (люди + боты).
    pub player_count: u8,
    /// Сколько мест под людей.
    pub human_count: u8,
    /// Стартовый стек.
    pub chips_per_player: Chips,
    /// Бет-юнит: большой блайнд и шаг рейза. Малый блайнд = половина.
    pub bet_limit: Chips,
    /// true — 52 карты, false — короткая колода 9..A.
    #[serde(default)]
    pub full_deck: bool,
}

/// Ошибки конфигурации сессии.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Количество мест должно быть от 2 до {max}, получено {got}")]
    SeatCount { got: u8, max: u8 },

    #[error("Мест для людей должно быть от 1 до {player_count}, получено {got}")]
    HumanCount { got: u8, player_count: u8 },

    #[error("Слишком много ботов: {got}, максимум {max}")]
    TooManyBots { got: u8, max: usize },

    #[error("Стартовый стек должен быть больше нуля")]
    EmptyStack,

    #[error("Бет-юнит должен быть не меньше 2")]
    BetLimitTooSmall,

    #[error("Колоды из {deck} карт не хватит на {players} игроков")]
    DeckTooSmall { deck: usize, players: u8 },
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_count < 2 || self.player_count > MAX_SEATS {
            return Err(ConfigError::SeatCount {
                got: self.player_count,
                max: MAX_SEATS,
            });
        }
        if self.human_count == 0 || self.human_count > self.player_count {
            return Err(ConfigError::HumanCount {
                got: self.human_count,
                player_count: self.player_count,
            });
        }
        let bots = self.player_count - self.human_count;
        if bots as usize > BOT_NAMES.len() {
            return Err(ConfigError::TooManyBots {
                got: bots,
                max: BOT_NAMES.len(),
            });
        }
        if self.chips_per_player.is_zero() {
            return Err(ConfigError::EmptyStack);
        }
        if self.bet_limit.0 < 2 {
            return Err(ConfigError::BetLimitTooSmall);
        }
        let deck = Deck::size_for_flag(self.full_deck);
        if CARDS_PER_HAND * self.player_count as usize + BOARD_AND_BURNS > deck {
            return Err(ConfigError::DeckTooSmall {
                deck,
                players: self.player_count,
            });
        }
        Ok(())
    }

    pub fn bot_count(&self) -> u8 {
        self.player_count.saturating_sub(self.human_count)
    }
}

/// Фаза жизненного цикла сессии.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionPhase {
    /// Ждём людей, игра ещё не стартовала.
    Lobby,
    /// Идёт раунд.
    InRound,
    /// Раунд закончен, ждём команды на следующий.
    BetweenRounds,
    /// Остался один игрок (или никого) — сессия закрывается.
    Finished,
}

/// Подключение человека к столу.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HumanSeat {
    pub connection: ConnectionId,
    pub name: String,
    /// Игрок, созданный под это подключение при старте игры.
    pub player: Option<PlayerId>,
}

/// Состояние одного стола. Агрегат: игроки, колода, банк, очередь хода.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSession {
    pub id: TableId,
    pub config: SessionConfig,
    pub phase: SessionPhase,
    /// Номер текущего раунда (1..).
    pub round: u32,
    /// Дилер хранится по id, индекс вычисляется заново при каждом обращении.
    pub dealer: Option<PlayerId>,
    /// Индекс ходящего в `players`.
    pub action_index: usize,
    /// Банк.
    pub table_chips: Chips,
    /// Максимальный суммарный вклад за раунд.
    pub highest_bid: Chips,
    pub board: Vec<Card>,
    pub burned: Vec<Card>,
    pub deck: Deck,
    /// 0 = префлоп .. 3 = ривер, 4 = шоудаун.
    pub lap: u8,
    /// Игроки в порядке мест (порядок хода).
    pub players: Vec<Player>,
    /// Подключённые люди в порядке входа.
    pub humans: Vec<HumanSeat>,
    pub waiting_for_action: bool,
    /// Итоги сыгранных раундов.
    pub history: Vec<RoundOutcome>,
    next_player_id: PlayerId,
}

impl GameSession {
    pub fn new(id: TableId, config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            id,
            config,
            phase: SessionPhase::Lobby,
            round: 0,
            dealer: None,
            action_index: 0,
            table_chips: Chips::ZERO,
            highest_bid: Chips::ZERO,
            board: Vec::new(),
            burned: Vec::new(),
            deck: Deck::default(),
            lap: 0,
            players: Vec::new(),
            humans: Vec::new(),
            waiting_for_action: false,
            history: Vec::new(),
            next_player_id: 1,
        })
    }

    /// Посадить игрока в конец круга. Возвращает его стабильный id.
    pub fn seat_player(&mut self, name: impl Into<String>, is_human: bool, chips: Chips) -> PlayerId {
        let id = self.next_player_id;
        self.next_player_id += 1;
        self.players.push(Player::new(id, name, is_human, chips));
        id
    }

    pub fn street(&self) -> Option<Street> {
        Street::from_lap(self.lap)
    }

    pub fn player_index(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn dealer_index(&self) -> Option<usize> {
        self.dealer.and_then(|id| self.player_index(id))
    }

    /// Текущий ходящий, если раунд идёт и индекс валиден.
    pub fn current_actor(&self) -> Option<&Player> {
        if self.phase != SessionPhase::InRound {
            return None;
        }
        self.players.get(self.action_index)
    }

    /// Игроки, не сбросившие карты.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.folded)
    }

    /// Все фишки за столом: стеки + банк.
    pub fn total_chips(&self) -> Chips {
        self.players.iter().map(|p| p.chips).sum::<Chips>() + self.table_chips
    }

    pub fn human_for_connection(&self, connection: &str) -> Option<&HumanSeat> {
        self.humans.iter().find(|h| h.connection == connection)
    }

    pub fn player_for_connection(&self, connection: &str) -> Option<PlayerId> {
        self.human_for_connection(connection).and_then(|h| h.player)
    }

    /// Сколько людей ещё ждём до старта.
    pub fn missing_humans(&self) -> usize {
        (self.config.human_count as usize).saturating_sub(self.humans.len())
    }
}
