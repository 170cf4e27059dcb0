/// Doubling delay schedule for automatic refetches after a failed fetch.
#[derive(Debug, Clone)]
pub struct Backoff {
    next_secs: u64,
    base_secs: u64,
    max_secs: u64,
    attempts: u32,
}

impl Backoff {
    #[must_use]
    pub const fn new(base_secs: u64, max_secs: u64) -> Self {
        Self {
            next_secs: base_secs,
            base_secs,
            max_secs,
            attempts: 0,
        }
    }

    /// 10 s, 20 s, 40 s ... capped at five minutes.
    #[must_use]
    pub const fn for_weather_fetch() -> Self {
        Self::new(10, 300)
    }

    pub fn next_delay(&mut self) -> u64 {
        let delay = self.next_secs;
        self.next_secs = self.next_secs.saturating_mul(2).min(self.max_secs);
        self.attempts = self.attempts.saturating_add(1);
        delay
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn reset(&mut self) {
        self.next_secs = self.base_secs;
        self.attempts = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_fetch_schedule_doubles_until_cap() {
        let mut backoff = Backoff::for_weather_fetch();
        let delays = (0..7).map(|_| backoff.next_delay()).collect::<Vec<_>>();
        assert_eq!(delays, vec![10, 20, 40, 80, 160, 300, 300]);
        assert_eq!(backoff.attempts(), 7);
    }

    #[test]
    fn reset_restarts_from_base() {
        let mut backoff = Backoff::new(5, 60);
        backoff.next_delay();
        backoff.next_delay();
        backoff.reset();
        assert_eq!(backoff.attempts(), 0);
        assert_eq!(backoff.next_delay(), 5);
    }

    #[test]
    fn huge_base_does_not_overflow() {
        let mut backoff = Backoff::new(u64::MAX - 1, u64::MAX);
        assert_eq!(backoff.next_delay(), u64::MAX - 1);
        assert_eq!(backoff.next_delay(), u64::MAX);
    }
}
