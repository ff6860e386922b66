//! Cancellable one-shot timers polled from the frame loop

/// Handle returned by `Timers::schedule`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Pending<T> {
    id: TimerId,
    due: f64,
    payload: T,
}

/// One-shot timers keyed by absolute due time (seconds)
#[derive(Debug, Clone)]
pub struct Timers<T> {
    next_id: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: f64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending { id, due, payload });
        id
    }

    /// Returns true if the timer was still pending
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every timer due at `now`, earliest first
    pub fn poll(&mut self, now: f64) -> Vec<(TimerId, T)> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = rest;
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.id.0.cmp(&b.id.0)));
        due.into_iter().map(|p| (p.id, p.payload)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_when_due() {
        let mut timers = Timers::new();
        let id = timers.schedule(0.6, "settle");
        assert!(timers.poll(0.5).is_empty());
        assert_eq!(timers.poll(0.6), vec![(id, "settle")]);
        assert!(timers.poll(1.0).is_empty());
        assert!(timers.is_empty());
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timers = Timers::new();
        let stale = timers.schedule(0.6, 1);
        assert!(timers.cancel(stale));
        assert!(!timers.cancel(stale));
        let fresh = timers.schedule(0.9, 2);
        assert_eq!(timers.poll(2.0), vec![(fresh, 2)]);
    }

    #[test]
    fn test_poll_orders_by_due_time() {
        let mut timers = Timers::new();
        timers.schedule(0.3, 'b');
        timers.schedule(0.1, 'a');
        timers.schedule(0.5, 'c');
        let fired: Vec<char> = timers.poll(0.4).into_iter().map(|(_, c)| c).collect();
        assert_eq!(fired, vec!['a', 'b']);
        assert_eq!(timers.len(), 1);
    }
}
