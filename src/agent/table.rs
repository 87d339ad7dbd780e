//! Sparse Q-table over (state, action) pairs

use std::collections::HashMap;

use super::state::State;
use crate::game::Action;

/// Bias subtracted from every write to the table
pub const DEFAULT_DECAY: f64 = 1e-4;

/// Packed (state, action) key: six state bits above two action bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableKey(u8);

impl TableKey {
    pub fn new(state: State, action: Action) -> Self {
        TableKey((state.bits() << 2) | action.index() as u8)
    }

    pub fn state(self) -> State {
        State::from_bits(self.0 >> 2)
    }

    pub fn action(self) -> Action {
        // Only built from a valid action index
        Action::from_index((self.0 & 0b11) as usize).unwrap_or(Action::Continue)
    }
}

/// Value estimates, created on first write and never evicted
///
/// The state space caps the table at 64 states x 3 actions = 192 entries.
#[derive(Debug, Clone)]
pub struct ValueTable {
    values: HashMap<TableKey, f64>,
    decay: f64,
}

impl ValueTable {
    /// Empty table with the default decay bias
    pub fn new() -> Self {
        Self::with_decay(DEFAULT_DECAY)
    }

    pub fn with_decay(decay: f64) -> Self {
        Self {
            values: HashMap::new(),
            decay,
        }
    }

    /// Stored value, or 0 if the pair was never written
    pub fn get(&self, state: State, action: Action) -> f64 {
        self.values
            .get(&TableKey::new(state, action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Add `delta` to the stored value, starting from 0 for unseen pairs
    ///
    /// The decay bias is subtracted on every write.
    pub fn accumulate(&mut self, state: State, action: Action, delta: f64) {
        *self
            .values
            .entry(TableKey::new(state, action))
            .or_insert(0.0) += delta - self.decay;
    }

    /// Values of all three actions in index order
    pub fn action_values(&self, state: State) -> [f64; 3] {
        Action::ALL.map(|action| self.get(state, action))
    }

    /// Best value reachable from `state`
    pub fn max_value(&self, state: State) -> f64 {
        self.action_values(state)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Temporal-difference update of one (state, action) pair
    ///
    /// `value += alpha * (reward + gamma * max_a' value(next, a') - value) - decay`.
    /// Returns the delta handed to [`accumulate`](Self::accumulate), before decay.
    pub fn td_update(
        &mut self,
        state: State,
        action: Action,
        reward: f64,
        next_state: State,
        alpha: f64,
        gamma: f64,
    ) -> f64 {
        let target = reward + gamma * self.max_value(next_state);
        let delta = alpha * (target - self.get(state, action));
        self.accumulate(state, action, delta);
        delta
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// Number of (state, action) pairs written so far
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Written entries in key order
    pub fn entries(&self) -> Vec<(State, Action, f64)> {
        let mut entries: Vec<_> = self
            .values
            .iter()
            .map(|(key, value)| (key.state(), key.action(), *value))
            .collect();
        entries.sort_by_key(|(state, action, _)| (*state, *action));
        entries
    }
}

impl Default for ValueTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(flags: [u8; 6]) -> State {
        State::from_flags(flags)
    }

    #[test]
    fn test_unseen_reads_zero() {
        let table = ValueTable::new();
        for bits in 0..State::COUNT as u8 {
            for action in Action::ALL {
                assert_eq!(table.get(State::from_bits(bits), action), 0.0);
            }
        }
        assert!(table.is_empty());
    }

    #[test]
    fn test_accumulate_compounds() {
        let mut table = ValueTable::new();
        let s = state([1, 1, 1, 1, 0, 0]);

        table.accumulate(s, Action::Continue, 5.0);
        table.accumulate(s, Action::Continue, 5.0);

        let expected = 10.0 - 2.0 * DEFAULT_DECAY;
        assert!((table.get(s, Action::Continue) - expected).abs() < 1e-12);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_zero_decay_accumulates_exactly() {
        let mut table = ValueTable::with_decay(0.0);
        let s = State::INITIAL;
        table.accumulate(s, Action::TurnLeft, 1.5);
        table.accumulate(s, Action::TurnLeft, -0.5);
        assert_eq!(table.get(s, Action::TurnLeft), 1.0);
    }

    #[test]
    fn test_keys_are_distinct() {
        let mut table = ValueTable::with_decay(0.0);
        let a = state([1, 1, 1, 0, 0, 0]);
        let b = state([1, 1, 1, 0, 1, 0]);

        table.accumulate(a, Action::TurnLeft, 1.0);
        table.accumulate(b, Action::TurnLeft, 2.0);
        table.accumulate(a, Action::TurnRight, 3.0);

        assert_eq!(table.get(a, Action::TurnLeft), 1.0);
        assert_eq!(table.get(b, Action::TurnLeft), 2.0);
        assert_eq!(table.get(a, Action::TurnRight), 3.0);
        assert_eq!(table.get(a, Action::Continue), 0.0);
    }

    #[test]
    fn test_key_round_trip() {
        let s = state([0, 1, 1, 0, 0, 1]);
        let key = TableKey::new(s, Action::TurnRight);
        assert_eq!(key.state(), s);
        assert_eq!(key.action(), Action::TurnRight);
    }

    #[test]
    fn test_max_value() {
        let mut table = ValueTable::with_decay(0.0);
        let s = State::INITIAL;
        assert_eq!(table.max_value(s), 0.0);

        table.accumulate(s, Action::Continue, -2.0);
        table.accumulate(s, Action::TurnLeft, -1.0);
        // TurnRight is still unseen, so it reads 0
        assert_eq!(table.max_value(s), 0.0);

        table.accumulate(s, Action::TurnRight, -3.0);
        assert_eq!(table.max_value(s), -1.0);
    }

    #[test]
    fn test_td_update_rule() {
        let mut table = ValueTable::new();
        let s = state([1, 1, 1, 1, 0, 0]);
        let next = state([1, 1, 0, 0, 0, 0]);

        table.accumulate(next, Action::TurnLeft, 2.0 + DEFAULT_DECAY);

        // value = 0 + 0.5 * (1 + 0.5 * 2 - 0) - decay
        let delta = table.td_update(s, Action::Continue, 1.0, next, 0.5, 0.5);
        assert!((delta - 1.0).abs() < 1e-12);
        assert!((table.get(s, Action::Continue) - (1.0 - DEFAULT_DECAY)).abs() < 1e-12);
    }

    #[test]
    fn test_td_update_with_zero_reward_only_decays() {
        let mut table = ValueTable::new();
        let s = State::INITIAL;
        table.td_update(s, Action::TurnLeft, 0.0, s, 0.2, 0.1);
        assert!((table.get(s, Action::TurnLeft) + DEFAULT_DECAY).abs() < 1e-12);
    }

    #[test]
    fn test_entries_sorted() {
        let mut table = ValueTable::with_decay(0.0);
        table.accumulate(state([1, 1, 1, 0, 0, 1]), Action::TurnRight, 1.0);
        table.accumulate(State::INITIAL, Action::TurnLeft, 2.0);
        table.accumulate(State::INITIAL, Action::Continue, 3.0);

        let entries = table.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], (State::INITIAL, Action::Continue, 3.0));
        assert_eq!(entries[1], (State::INITIAL, Action::TurnLeft, 2.0));
    }
}
