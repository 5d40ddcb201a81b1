use crate::engine::{Action, ActionContext, DecisionProvider, RandomSource};

/// Бот, выбирающий случайное допустимое действие.
#[derive(Clone, Debug)]
pub struct RandomBot<R> {
    rng: R,
}

impl<R: RandomSource> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RandomSource> DecisionProvider for RandomBot<R> {
    fn decide(&mut self, _ctx: &ActionContext<'_>, legal: &[Action]) -> Action {
        if legal.is_empty() {
            return Action::Call;
        }
        legal[self.rng.pick_index(legal.len())]
    }
}

/// Всегда коллирует. Удобен в тестах: раздача идёт до шоудауна.
#[derive(Clone, Copy, Debug, Default)]
pub struct CallingStation;

impl DecisionProvider for CallingStation {
    fn decide(&mut self, _ctx: &ActionContext<'_>, _legal: &[Action]) -> Action {
        Action::Call
    }
}
