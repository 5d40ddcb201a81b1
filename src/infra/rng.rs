use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng, SeedableRng};

use crate::engine::RandomSource;

/// Системный RNG (thread_rng) для живых столов.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut thread_rng());
    }

    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        thread_rng().gen_range(0..len)
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Позволяет воспроизводить одни и те же раздачи при одинаковом seed.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.inner.gen_range(0..len)
    }
}

/// RNG для стола: системный или с фиксированным seed.
#[derive(Clone, Debug)]
pub enum TableRng {
    System(SystemRng),
    Seeded(DeterministicRng),
}

impl TableRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => TableRng::Seeded(DeterministicRng::from_seed(seed)),
            None => TableRng::System(SystemRng),
        }
    }
}

impl RandomSource for TableRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        match self {
            TableRng::System(rng) => rng.shuffle(slice),
            TableRng::Seeded(rng) => rng.shuffle(slice),
        }
    }

    fn pick_index(&mut self, len: usize) -> usize {
        match self {
            TableRng::System(rng) => rng.pick_index(len),
            TableRng::Seeded(rng) => rng.pick_index(len),
        }
    }
}
