use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng, SeedableRng};

use crate::domain::Card;
use crate::engine::RandomSource;

/// Боевой RNG: `thread_rng` (ChaCha, криптостойкий, сидируется из ОС).
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut thread_rng());
    }

    fn choose_index(&mut self, len: usize) -> usize {
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
    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut self.inner);
    }

    fn choose_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.inner.gen_range(0..len)
    }
}
