//! In-memory score counters. A browser host would mirror these into DOM
//! widgets; the headless backend just keeps the numbers.

use std::collections::HashMap;

use farmstead_core::services::{Counter, ScoreBoard};

#[derive(Debug, Default)]
pub struct CounterBoard {
    counts: HashMap<Counter, u32>,
}

impl ScoreBoard for CounterBoard {
    fn increment(&mut self, counter: Counter) {
        *self.counts.entry(counter).or_default() += 1;
    }

    fn add(&mut self, counter: Counter, amount: u32) {
        *self.counts.entry(counter).or_default() += amount;
    }

    fn take(&mut self, counter: Counter) -> bool {
        let count = self.counts.entry(counter).or_default();
        if *count > 0 {
            *count -= 1;
            true
        } else {
            false
        }
    }

    fn value(&self, counter: Counter) -> u32 {
        self.counts.get(&counter).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_only_when_positive() {
        let mut board = CounterBoard::default();
        assert!(!board.take(Counter::Eggs));
        board.increment(Counter::Eggs);
        assert!(board.take(Counter::Eggs));
        assert!(!board.take(Counter::Eggs));
    }

    #[test]
    fn add_accumulates() {
        let mut board = CounterBoard::default();
        board.add(Counter::Money, 20);
        board.add(Counter::Money, 50);
        assert_eq!(board.value(Counter::Money), 70);
    }
}
