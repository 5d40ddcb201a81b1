use std::sync::atomic::{AtomicU64, Ordering};

use rand::{thread_rng, Rng};

use crate::domain::{ConnectionId, TableId};

/// Выдача кодов столов и id подключений.
///
/// Код стола — 8 hex-символов: им игроки делятся друг с другом,
/// поэтому он случайный, а не порядковый.
#[derive(Debug)]
pub struct IdGenerator {
    connection_counter: AtomicU64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            connection_counter: AtomicU64::new(1),
        }
    }

    pub fn next_table_code(&self) -> TableId {
        let raw: u32 = thread_rng().gen();
        format!("{raw:08x}")
    }

    #[inline]
    pub fn next_connection_id(&self) -> ConnectionId {
        let n = self.connection_counter.fetch_add(1, Ordering::Relaxed);
        format!("conn-{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_code_is_eight_hex_chars() {
        let ids = IdGenerator::new();
        let code = ids.next_table_code();
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn connection_ids_are_unique() {
        let ids = IdGenerator::new();
        assert_ne!(ids.next_connection_id(), ids.next_connection_id());
    }
}
