use crate::domain::{Card, Player, PlayerId};
use crate::engine::WinnerResolver;
use crate::eval::evaluate_best_hand;

/// Победитель по силе лучшей 5-карточной комбинации.
/// При равенстве — первый по порядку мест.
#[derive(Clone, Copy, Debug, Default)]
pub struct BestHandResolver;

impl WinnerResolver for BestHandResolver {
    fn determine_winner(&self, contenders: &[&Player], board: &[Card]) -> Option<PlayerId> {
        let mut best: Option<(PlayerId, _)> = None;
        for p in contenders {
            let mut cards = p.hole_cards.clone();
            cards.extend_from_slice(board);
            let Some(rank) = evaluate_best_hand(&cards) else {
                continue;
            };
            match &best {
                Some((_, top)) if rank <= *top => {}
                _ => best = Some((p.id, rank)),
            }
        }
        best.map(|(id, _)| id)
    }
}
