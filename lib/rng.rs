//! Process-wide seedable random source.
//!
//! Group sampling draws from this generator unless handed one explicitly.
//! Seeding it with [`seed`] before a draw makes that draw reproducible; until
//! then it is initialized from system entropy.

use std::sync::Mutex;
use once_cell::sync::Lazy;
use rand::{ rngs::StdRng, SeedableRng };

static GLOBAL_RNG: Lazy<Mutex<StdRng>>
    = Lazy::new(|| Mutex::new(StdRng::from_entropy()));

/// Re-seed the process-wide generator.
pub fn seed(seed: u64) {
    with_global(|rng| { *rng = StdRng::seed_from_u64(seed); });
}

/// Run `f` with exclusive access to the process-wide generator.
///
/// A panic inside an earlier call does not poison the generator; its state is
/// used as left.
pub fn with_global<F, U>(f: F) -> U
where F: FnOnce(&mut StdRng) -> U
{
    let mut rng
        = GLOBAL_RNG.lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut rng)
}

