//! Volume cap for repeated records
//!
//! Records are bucketed by severity and a hash of the message. Inside each
//! tick, a bucket writes its first `initial` records and then every
//! `thereafter`-th one. Panic and Fatal records are never sampled.

use stamplog_core_types::Severity;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::{Duration, Instant};

const COUNTERS_PER_LEVEL: usize = 1024;
// Debug, Info, Warning, Error
const SAMPLED_LEVELS: usize = 4;

#[derive(Debug, Default)]
struct Counter {
    reset_at: AtomicI64,
    count: AtomicU64,
}

impl Counter {
    fn incr_check_reset(&self, now: i64, tick: i64) -> u64 {
        let reset_at = self.reset_at.load(Ordering::Relaxed);
        if reset_at > now {
            return self.count.fetch_add(1, Ordering::Relaxed) + 1;
        }

        self.count.store(1, Ordering::Relaxed);
        if self
            .reset_at
            .compare_exchange(reset_at, now + tick, Ordering::Relaxed, Ordering::Relaxed)
            .is_err()
        {
            // Another thread opened the window first and reset the count
            return self.count.fetch_add(1, Ordering::Relaxed) + 1;
        }
        1
    }
}

/// Per-facade sampling state
#[derive(Debug)]
pub struct Sampler {
    counters: Box<[Counter]>,
    initial: u64,
    thereafter: u64,
    tick: i64,
    epoch: Instant,
}

impl Sampler {
    /// `thereafter` must be non-zero; config validation guarantees it.
    pub fn new(initial: u64, thereafter: u64, tick: Duration) -> Self {
        let counters = (0..SAMPLED_LEVELS * COUNTERS_PER_LEVEL)
            .map(|_| Counter::default())
            .collect();
        Self {
            counters,
            initial,
            thereafter: thereafter.max(1),
            tick: i64::try_from(tick.as_nanos()).unwrap_or(i64::MAX),
            epoch: Instant::now(),
        }
    }

    /// Whether a record should be written
    pub fn check(&self, severity: Severity, message: &str) -> bool {
        if severity.is_terminal() {
            return true;
        }
        let slot = usize::from(severity.as_u8()) * COUNTERS_PER_LEVEL
            + (fnv32a(message) as usize % COUNTERS_PER_LEVEL);
        let now = i64::try_from(self.epoch.elapsed().as_nanos()).unwrap_or(i64::MAX);

        let n = self.counters[slot].incr_check_reset(now, self.tick);
        n <= self.initial || (n - self.initial) % self.thereafter == 0
    }
}

fn fnv32a(s: &str) -> u32 {
    const OFFSET: u32 = 2166136261;
    const PRIME: u32 = 16777619;

    s.bytes()
        .fold(OFFSET, |hash, b| (hash ^ u32::from(b)).wrapping_mul(PRIME))
}
