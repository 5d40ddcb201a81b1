use crate::domain::card::{Card, Rank};

use super::hand_rank::{HandCategory, HandRank};

/// Лучшая 5-карточная рука из 5–7 карт (карманные + борд).
///
/// `None`, если карт меньше пяти или больше семи.
pub fn evaluate_best_hand(cards: &[Card]) -> Option<HandRank> {
    let n = cards.len();
    if !(5..=7).contains(&n) {
        return None;
    }

    let mut best: Option<HandRank> = None;
    for a in 0..n {
        for b in (a + 1)..n {
            for c in (b + 1)..n {
                for d in (c + 1)..n {
                    for e in (d + 1)..n {
                        let rank = evaluate_five(&[cards[a], cards[b], cards[c], cards[d], cards[e]]);
                        if best.map_or(true, |top| rank > top) {
                            best = Some(rank);
                        }
                    }
                }
            }
        }
    }
    best
}

/// Оценка ровно пяти карт.
pub fn evaluate_five(cards: &[Card; 5]) -> HandRank {
    let mut suit_counts = [0u8; 4];
    let mut rank_counts = [0u8; 15];
    let mut mask: u16 = 0;
    for card in cards {
        suit_counts[card.suit.index()] += 1;
        rank_counts[card.rank.value() as usize] += 1;
        mask |= 1 << card.rank.value();
    }

    let flush = suit_counts.iter().any(|&c| c == 5);
    let straight = straight_high(mask);

    // (count, rank) по убыванию: сначала группы, потом старшинство.
    let mut groups: Vec<(u8, Rank)> = Rank::ALL
        .iter()
        .filter(|r| rank_counts[r.value() as usize] > 0)
        .map(|&r| (rank_counts[r.value() as usize], r))
        .collect();
    groups.sort_by(|a, b| b.cmp(a));

    let mut kickers = [Rank::Two; 5];
    let mut i = 0;
    for &(count, rank) in &groups {
        for _ in 0..count {
            kickers[i] = rank;
            i += 1;
        }
    }

    if let Some(high) = straight {
        let seq = straight_ranks(high);
        let category = if flush {
            HandCategory::StraightFlush
        } else {
            HandCategory::Straight
        };
        return HandRank::new(category, seq);
    }

    let pattern: Vec<u8> = groups.iter().map(|g| g.0).collect();
    let category = match pattern.as_slice() {
        [4, 1] => HandCategory::FourOfAKind,
        [3, 2] => HandCategory::FullHouse,
        _ if flush => HandCategory::Flush,
        [3, 1, 1] => HandCategory::ThreeOfAKind,
        [2, 2, 1] => HandCategory::TwoPair,
        [2, 1, 1, 1] => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };
    HandRank::new(category, kickers)
}

/// Старшая карта стрита по маске рангов (бит = номинал). Колесо A-5 → 5.
fn straight_high(mask: u16) -> Option<Rank> {
    for high in (6..=14u8).rev() {
        let run: u16 = 0b1_1111 << (high - 4);
        if mask & run == run {
            return Rank::from_value(high);
        }
    }
    let wheel: u16 = (1 << 14) | 0b11_1100;
    if mask & wheel == wheel {
        return Some(Rank::Five);
    }
    None
}

fn straight_ranks(high: Rank) -> [Rank; 5] {
    let h = high.value();
    let mut out = [Rank::Two; 5];
    for (k, slot) in out.iter_mut().enumerate() {
        let v = h - k as u8;
        // у колеса младшая карта — туз
        *slot = Rank::from_value(if v == 1 { 14 } else { v }).unwrap_or(Rank::Two);
    }
    out
}
