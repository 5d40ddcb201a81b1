use crate::domain::Player;
use crate::engine::errors::EngineError;

/// Индекс места на `offset` позиций по часовой от `from`.
///
/// `len` — ТЕКУЩЕЕ число игроков; после выбывания индекс надо пересчитать.
pub fn next_index(from: usize, len: usize, offset: usize) -> Result<usize, EngineError> {
    if len == 0 {
        return Err(EngineError::EmptyPlayerList);
    }
    Ok((from % len + offset % len) % len)
}

/// Первый не сбросивший карты игрок, начиная с `from` включительно.
///
/// Если сфолдили все — это ошибка вызывающего кода (раунд должен был
/// закончиться раньше), возвращаем `AllPlayersFolded` вместо вечного цикла.
pub fn next_eligible(from: usize, players: &[Player]) -> Result<usize, EngineError> {
    let len = players.len();
    let mut idx = next_index(from, len, 0)?;
    for _ in 0..len {
        if !players[idx].folded {
            return Ok(idx);
        }
        idx = next_index(idx, len, 1)?;
    }
    Err(EngineError::AllPlayersFolded)
}
