use crate::domain::Chips;
use crate::engine::{Action, ActionContext, ActionEnumerator};

/// Сколько ступеней рейза предлагать (k * bet_unit).
pub const RAISE_STEPS: u64 = 3;

/// Лимитные действия: FOLD, CALL и рейзы кратные `bet_unit`,
/// пока хватает стека на долг + рейз.
///
/// Игрок без фишек может только CALL (нулевой, он уже олл-ин).
#[derive(Clone, Copy, Debug, Default)]
pub struct LimitActionEnumerator;

impl ActionEnumerator for LimitActionEnumerator {
    fn legal_actions(&self, ctx: &ActionContext<'_>) -> Vec<Action> {
        let Some(actor) = ctx.actor() else {
            return Vec::new();
        };
        if actor.folded {
            return Vec::new();
        }
        if actor.chips.is_zero() {
            return vec![Action::Call];
        }

        let mut legal = vec![Action::Fold, Action::Call];
        if ctx.bet_unit.is_zero() {
            return legal;
        }
        let owed = ctx.owed();
        for k in 1..=RAISE_STEPS {
            let raise = Chips(ctx.bet_unit.0 * k);
            if owed + raise > actor.chips {
                break;
            }
            legal.push(Action::Raise(raise));
        }
        legal
    }
}
