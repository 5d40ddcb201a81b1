use tracing::{debug, info, warn};

use crate::domain::{
    Chips, GameSession, PlayerId, Role, RoundOutcome, SessionPhase, Street, BOT_NAMES,
    CARDS_PER_HAND,
};
use crate::engine::actions::Action;
use crate::engine::betting::{is_lap_complete, reopen_for_others, reopen_lap};
use crate::engine::collaborators::{ActionContext, TableServices};
use crate::engine::errors::EngineError;
use crate::engine::events::{EventLog, SessionEvent, TableSnapshot};
use crate::engine::positions::{next_eligible, next_index};
use crate::engine::validation::validate_action;
use crate::engine::RandomSource;

/// Один стол целиком: состояние, внешние участники и очередь событий.
///
/// Все функции ниже мутируют его последовательно; конкурентный доступ
/// к одному столу исключается снаружи (один воркер на стол).
#[derive(Debug)]
pub struct SessionEngine {
    pub session: GameSession,
    pub services: TableServices,
    pub events: EventLog,
}

impl SessionEngine {
    pub fn new(session: GameSession, services: TableServices) -> Self {
        Self {
            session,
            services,
            events: EventLog::new(),
        }
    }

    fn emit_state(&mut self) {
        let snapshot = TableSnapshot::capture(&self.session);
        self.events.push(SessionEvent::StateChanged(snapshot));
    }

    /// Контекст для текущего ходящего.
    pub fn action_context(&self) -> ActionContext<'_> {
        action_context(&self.session)
    }

    /// Допустимые действия текущего ходящего.
    pub fn legal_actions(&self) -> Vec<Action> {
        self.services.actions.legal_actions(&self.action_context())
    }
}

fn action_context(session: &GameSession) -> ActionContext<'_> {
    ActionContext {
        players: &session.players,
        acting_seat: session.action_index,
        board: &session.board,
        highest_bid: session.highest_bid,
        deck_remaining: session.deck.len(),
        lap: session.lap,
        bet_unit: session.config.bet_limit,
    }
}

/// Рассадка при старте игры: сначала люди в порядке входа, потом боты
/// с перемешанными именами. Дилер выбирается случайно.
pub fn initialize_players<R: RandomSource>(
    engine: &mut SessionEngine,
    rng: &mut R,
) -> Result<(), EngineError> {
    let session = &mut engine.session;
    let stack = session.config.chips_per_player;

    let humans: Vec<(usize, String)> = session
        .humans
        .iter()
        .enumerate()
        .map(|(i, h)| (i, h.name.clone()))
        .collect();
    for (seat_idx, name) in humans {
        let id = session.seat_player(name, true, stack);
        session.humans[seat_idx].player = Some(id);
    }

    let mut bot_names = BOT_NAMES.to_vec();
    rng.shuffle(&mut bot_names);
    for name in bot_names.into_iter().take(session.config.bot_count() as usize) {
        session.seat_player(name, false, stack);
    }

    if session.players.is_empty() {
        return Err(EngineError::EmptyPlayerList);
    }
    let dealer_idx = rng.pick_index(session.players.len());
    session.dealer = Some(session.players[dealer_idx].id);

    info!(
        table = %session.id,
        players = session.players.len(),
        dealer = %session.players[dealer_idx].name,
        "игроки рассажены"
    );
    Ok(())
}

/// Старт нового раунда: колода, раздача, блайнды, первый ход.
pub fn start_round(engine: &mut SessionEngine) -> Result<(), EngineError> {
    if engine.session.players.len() < 2 {
        return Err(EngineError::NotEnoughPlayers);
    }

    let full_deck = engine.session.config.full_deck;
    let passes = engine.services.shuffle_passes;
    let deck = engine.services.deck.create_deck(full_deck);
    let deck = engine.services.deck.shuffle(deck, passes);

    let session = &mut engine.session;
    session.round += 1;
    session.deck = deck;

    for p in session.players.iter_mut() {
        p.reset_for_round();
    }

    // По одной карте каждому за проход, в порядке мест.
    for _ in 0..CARDS_PER_HAND {
        for p in session.players.iter_mut().filter(|p| !p.folded) {
            let card = session.deck.draw_one().ok_or(EngineError::DeckExhausted)?;
            p.hole_cards.push(card);
        }
    }

    session.board.clear();
    session.burned.clear();
    session.table_chips = Chips::ZERO;
    session.highest_bid = Chips::ZERO;
    session.lap = Street::Preflop.lap();

    let n = session.players.len();
    let dealer = session.dealer_index().unwrap_or(0);
    session.dealer = Some(session.players[dealer].id);

    let sb = next_index(dealer, n, 1)?;
    let bb = next_index(dealer, n, 2)?;
    session.players[sb].role = Some(Role::SmallBlind);
    session.players[bb].role = Some(Role::BigBlind);

    // Блайнды ограничены стеком: короткий стек ставит сколько есть.
    let small_blind = session.config.bet_limit.half();
    let sb_paid = session.players[sb].commit(small_blind);
    session.table_chips += sb_paid;
    session.highest_bid = sb_paid;

    let bb_paid = session.players[bb].commit(session.config.bet_limit);
    session.table_chips += bb_paid;
    session.highest_bid = session.highest_bid.max(bb_paid);

    session.action_index = next_index(dealer, n, 3)?;
    session.phase = SessionPhase::InRound;
    session.waiting_for_action = false;

    info!(
        table = %session.id,
        round = session.round,
        dealer = %session.players[dealer].name,
        small_blind = %sb_paid,
        big_blind = %bb_paid,
        "раунд начат"
    );

    let snapshot = TableSnapshot::capture(session);
    engine.events.push(SessionEvent::RoundStarted(snapshot));

    request_next_action(engine)
}

/// Продвигает стол, пока не понадобится решение человека или раунд не закончится.
///
/// Боты и олл-ин места обрабатываются здесь же, синхронно.
pub fn request_next_action(engine: &mut SessionEngine) -> Result<(), EngineError> {
    while engine.session.phase == SessionPhase::InRound {
        if is_lap_complete(&engine.session.players, engine.session.highest_bid) {
            advance_lap(engine)?;
            continue;
        }

        let idx = next_eligible(engine.session.action_index, &engine.session.players)?;
        engine.session.action_index = idx;
        engine.session.waiting_for_action = true;

        let actor = &engine.session.players[idx];
        if actor.is_all_in() {
            // Олл-ин: ставить нечего, ход пропускается нулевым call.
            process_action(engine, Action::Call, true)?;
            continue;
        }

        if actor.is_human {
            let legal = engine.legal_actions();
            let (player, name) = (actor.id, actor.name.clone());
            debug!(table = %engine.session.id, player = %name, ?legal, "ждём действия человека");
            engine.events.push(SessionEvent::ActionRequested { player, name, legal });
            return Ok(());
        }

        let action = bot_decision(engine);
        process_action(engine, action, false)?;
    }
    Ok(())
}

/// Решение бота. Если стратегия вернула недопустимое действие — пассивный ход.
fn bot_decision(engine: &mut SessionEngine) -> Action {
    let SessionEngine {
        session, services, ..
    } = engine;
    let ctx = action_context(session);
    let legal = services.actions.legal_actions(&ctx);
    let choice = services.decisions.decide(&ctx, &legal);
    if legal.contains(&choice) {
        return choice;
    }
    warn!(table = %session.id, %choice, "бот выбрал недопустимое действие");
    if legal.is_empty() || legal.contains(&Action::Call) {
        Action::Call
    } else {
        legal[0]
    }
}

/// Применить действие текущего ходящего и продолжить игру.
pub fn apply_action(engine: &mut SessionEngine, action: Action) -> Result<(), EngineError> {
    apply_action_with(engine, action, false)
}

/// То же, что `apply_action`, но с пометкой «по таймауту».
pub fn apply_action_with(
    engine: &mut SessionEngine,
    action: Action,
    automatic: bool,
) -> Result<(), EngineError> {
    process_action(engine, action, automatic)?;
    if engine.session.phase == SessionPhase::InRound {
        request_next_action(engine)?;
    }
    Ok(())
}

/// Одно действие: перенос фишек, флаги, сдвиг хода, проверка «остался один».
fn process_action(
    engine: &mut SessionEngine,
    action: Action,
    automatic: bool,
) -> Result<(), EngineError> {
    let session = &mut engine.session;
    if session.phase != SessionPhase::InRound {
        return Err(EngineError::NoActiveRound);
    }

    let idx = session.action_index;
    let highest_bid = session.highest_bid;
    let player = session
        .players
        .get_mut(idx)
        .ok_or(EngineError::EmptyPlayerList)?;

    validate_action(player, &action, highest_bid)?;

    let mut new_highest_bid = None;
    let paid = match action {
        Action::Fold => {
            player.folded = true;
            Chips::ZERO
        }
        Action::Call => {
            let owed = player.owed(highest_bid);
            let paid = player.commit(owed);
            player.action_taken = true;
            paid
        }
        Action::Raise(amount) => {
            let paid = player.commit(player.owed(highest_bid) + amount);
            player.action_taken = true;
            new_highest_bid = Some(player.contributed);
            paid
        }
    };
    let (player_id, name) = (player.id, player.name.clone());

    session.table_chips += paid;
    if let Some(bid) = new_highest_bid {
        session.highest_bid = bid;
        reopen_for_others(&mut session.players, idx);
    }
    session.waiting_for_action = false;
    session.action_index = next_index(idx, session.players.len(), 1)?;

    debug!(
        table = %session.id,
        player = %name,
        %action,
        chips = %paid,
        pot = %session.table_chips,
        automatic,
        "действие применено"
    );

    engine.events.push(SessionEvent::ActionTaken {
        player: player_id,
        name,
        action,
        chips: paid,
        new_highest_bid,
        automatic,
    });
    engine.emit_state();

    let sole_survivor = {
        let mut active = engine.session.active_players();
        match (active.next(), active.next()) {
            (Some(last), None) => Some(last.id),
            _ => None,
        }
    };
    if let Some(winner) = sole_survivor {
        settle_round(engine, winner, false)?;
    }
    Ok(())
}

/// Переход на следующую улицу (или шоудаун).
pub fn advance_lap(engine: &mut SessionEngine) -> Result<(), EngineError> {
    let session = &mut engine.session;
    session.lap += 1;
    reopen_lap(&mut session.players);

    let street = session.street().ok_or(EngineError::NoActiveRound)?;
    if street == Street::Showdown {
        let winner = {
            let contenders: Vec<_> = session.active_players().collect();
            engine
                .services
                .winner
                .determine_winner(&contenders, &session.board)
                .ok_or(EngineError::NoWinner)?
        };
        return settle_round(engine, winner, true);
    }

    let burned = session.deck.draw_one().ok_or(EngineError::DeckExhausted)?;
    session.burned.push(burned);
    for _ in 0..street.board_cards() {
        let card = session.deck.draw_one().ok_or(EngineError::DeckExhausted)?;
        session.board.push(card);
    }

    debug!(table = %session.id, street = street.label(), pot = %session.table_chips, "улица открыта");
    engine.events.push(SessionEvent::CardsDealt {
        street,
        board: session.board.clone(),
    });

    let n = session.players.len();
    let dealer = session.dealer_index().unwrap_or(0);
    session.action_index = next_eligible(next_index(dealer, n, 1)?, &session.players)?;
    engine.emit_state();
    Ok(())
}

/// Отдать банк победителю, убрать проигравших всё, сдвинуть дилера
/// или закончить игру.
pub fn settle_round(
    engine: &mut SessionEngine,
    winner: PlayerId,
    showdown: bool,
) -> Result<(), EngineError> {
    let session = &mut engine.session;
    let winner_idx = session.player_index(winner).ok_or(EngineError::NoWinner)?;

    let chips_won = session.table_chips;
    session.players[winner_idx].chips += chips_won;
    session.waiting_for_action = false;
    session.phase = SessionPhase::BetweenRounds;
    let winner_name = session.players[winner_idx].name.clone();

    info!(
        table = %session.id,
        round = session.round,
        winner = %winner_name,
        chips_won = %chips_won,
        showdown,
        "раунд завершён"
    );

    session.history.push(RoundOutcome {
        round: session.round,
        winner,
        winner_name: winner_name.clone(),
        chips_won,
        showdown,
    });

    // Снимок показывает разыгранный банк; обнуляем его только после.
    let snapshot = TableSnapshot::capture(session);
    session.table_chips = Chips::ZERO;
    engine.events.push(SessionEvent::RoundEnded {
        winner,
        winner_name,
        chips_won,
        snapshot,
    });

    // Следующий дилер — первый выживший по часовой от текущего,
    // считаем ДО удаления выбывших.
    let n = session.players.len();
    let dealer = session.dealer_index().unwrap_or(0);
    let next_dealer = (1..=n)
        .map(|k| &session.players[(dealer + k) % n])
        .find(|p| !p.chips.is_zero())
        .map(|p| p.id);

    let before = session.players.len();
    session.players.retain(|p| !p.chips.is_zero());
    if session.players.len() < before {
        info!(table = %session.id, eliminated = before - session.players.len(), "игроки выбыли");
    }

    if session.players.len() > 1 {
        session.dealer = next_dealer;
        engine.events.push(SessionEvent::NextRoundPrompt);
    } else {
        session.phase = SessionPhase::Finished;
        let champion = session.players.first().map(|p| p.name.clone());
        info!(table = %session.id, winner = ?champion, "игра окончена");
        engine.events.push(SessionEvent::GameOver { winner: champion });
    }
    Ok(())
}
