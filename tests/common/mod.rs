//! Общие помощники интеграционных тестов.
#![allow(dead_code)]

use poker_session::domain::{
    Card, Chips, Deck, GameSession, HumanSeat, SessionConfig, SessionPhase,
};
use poker_session::engine::{DeckSource, SessionEngine, TableServices};
use poker_session::infra::{
    BestHandResolver, CallingStation, DeterministicRng, LimitActionEnumerator, ShuffledDeckSource,
};

/// Колода с заранее заданным порядком: карты сдаются в порядке списка.
#[derive(Clone, Debug)]
pub struct StackedDeck {
    pub cards: Vec<Card>,
}

impl StackedDeck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

impl DeckSource for StackedDeck {
    fn create_deck(&mut self, _full_deck: bool) -> Deck {
        // верх колоды — конец вектора
        let mut cards = self.cards.clone();
        cards.reverse();
        Deck { cards }
    }

    fn shuffle(&mut self, deck: Deck, _passes: u32) -> Deck {
        deck
    }
}

/// Детерминированная колода, лимитные действия, боты-коллеры.
pub fn calling_services(seed: u64) -> TableServices {
    TableServices {
        deck: Box::new(ShuffledDeckSource::new(DeterministicRng::from_seed(seed))),
        actions: Box::new(LimitActionEnumerator),
        winner: Box::new(BestHandResolver),
        decisions: Box::new(CallingStation),
        shuffle_passes: 1,
    }
}

pub fn stacked_services(cards: Vec<Card>) -> TableServices {
    TableServices {
        deck: Box::new(StackedDeck::new(cards)),
        ..calling_services(0)
    }
}

pub fn config(players: u8, humans: u8, chips: u64, bet: u64) -> SessionConfig {
    SessionConfig {
        player_count: players,
        human_count: humans,
        chips_per_player: Chips(chips),
        bet_limit: Chips(bet),
        full_deck: true,
    }
}

/// Стол из одних людей со стеками `stacks`, подключения `c0`, `c1`, ...,
/// дилер — место 0. Раунд не начат.
pub fn human_table(stacks: &[u64], bet: u64, services: TableServices) -> SessionEngine {
    let max_stack = stacks.iter().copied().max().unwrap_or(100);
    let n = stacks.len() as u8;
    let mut session = GameSession::new("test".to_string(), config(n, n, max_stack, bet)).unwrap();
    for (i, &stack) in stacks.iter().enumerate() {
        let name = format!("P{i}");
        let id = session.seat_player(name.clone(), true, Chips(stack));
        session.humans.push(HumanSeat {
            connection: format!("c{i}"),
            name,
            player: Some(id),
        });
    }
    session.dealer = Some(session.players[0].id);
    SessionEngine::new(session, services)
}

/// Подключение игрока, которого сейчас ждёт стол.
pub fn awaited_connection(engine: &SessionEngine) -> Option<String> {
    let actor = engine.awaited_player()?;
    engine
        .session
        .humans
        .iter()
        .find(|h| h.player == Some(actor))
        .map(|h| h.connection.clone())
}

/// Все люди отвечают CALL, пока раунд не закончится.
pub fn call_down(engine: &mut SessionEngine) {
    let mut guard = 0;
    while engine.session.phase == SessionPhase::InRound {
        let conn = awaited_connection(engine).expect("стол должен ждать человека");
        engine.submit_action(&conn, "CALL").unwrap();
        guard += 1;
        assert!(guard < 200, "раунд не заканчивается");
    }
}

pub fn cards(s: &str) -> Vec<Card> {
    poker_session::domain::parse_cards(s).unwrap()
}
