use crate::domain::{Chips, Player};
use crate::engine::actions::Action;
use crate::engine::errors::EngineError;

/// Может ли игрок выполнить действие при текущей максимальной ставке.
///
/// Fold и Call разрешены всегда (call на короткий стек — это олл-ин).
/// Raise должен быть ненулевым и покрываться стеком целиком.
pub fn validate_action(player: &Player, action: &Action, highest_bid: Chips) -> Result<(), EngineError> {
    if player.folded {
        return Err(EngineError::IllegalAction);
    }

    match action {
        Action::Fold | Action::Call => Ok(()),
        Action::Raise(amount) => {
            if amount.is_zero() {
                return Err(EngineError::IllegalAction);
            }
            if raise_cost(player, highest_bid, *amount) > player.chips {
                return Err(EngineError::NotEnoughChips);
            }
            Ok(())
        }
    }
}

/// Сколько стоит рейз на `amount`: долг + сам рейз.
pub fn raise_cost(player: &Player, highest_bid: Chips, amount: Chips) -> Chips {
    player.owed(highest_bid) + amount
}
