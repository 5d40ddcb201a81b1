use crate::domain::{Chips, Player};

/// Закрыт ли круг ставок.
///
/// Каждый не сфолдивший игрок должен:
/// - сделать действие на этом круге;
/// - уравнять `highest_bid` либо быть в олл-ине ниже него.
pub fn is_lap_complete(players: &[Player], highest_bid: Chips) -> bool {
    players
        .iter()
        .filter(|p| !p.folded)
        .all(|p| p.action_taken && (p.contributed == highest_bid || p.chips.is_zero()))
}

/// Новый круг: все в игре снова должны походить. Вклады не трогаем.
pub fn reopen_lap(players: &mut [Player]) {
    for p in players.iter_mut().filter(|p| !p.folded) {
        p.action_taken = false;
    }
}

/// После рейза все остальные в игре снова должны ответить.
pub fn reopen_for_others(players: &mut [Player], raiser: usize) {
    for (idx, p) in players.iter_mut().enumerate() {
        if idx != raiser && !p.folded {
            p.action_taken = false;
        }
    }
}
