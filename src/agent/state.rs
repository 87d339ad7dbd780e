use std::fmt;

use crate::game::Action;

/// One of the six binary perception features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    AheadClear = 0,
    LeftClear = 1,
    RightClear = 2,
    FoodAhead = 3,
    FoodLeft = 4,
    FoodRight = 5,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::AheadClear,
        Feature::LeftClear,
        Feature::RightClear,
        Feature::FoodAhead,
        Feature::FoodLeft,
        Feature::FoodRight,
    ];

    /// The clear flag for the direction an action moves toward
    pub fn clear_for(action: Action) -> Feature {
        Self::ALL[action.index()]
    }

    /// The food flag for the direction an action moves toward
    pub fn food_for(action: Action) -> Feature {
        Self::ALL[3 + action.index()]
    }

    fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// Discretized perception: six flags packed into the low bits of a byte
///
/// Bit `i` holds the feature with discriminant `i`, so states order and hash
/// by their packed value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct State(u8);

impl State {
    /// All directions clear, no food detected
    pub const INITIAL: State = State(0b000_111);

    /// Number of distinct states
    pub const COUNT: usize = 64;

    pub fn from_bits(bits: u8) -> State {
        State(bits & 0b111_111)
    }

    pub fn from_flags(flags: [u8; 6]) -> State {
        let mut state = State(0);
        for (feature, flag) in Feature::ALL.into_iter().zip(flags) {
            if flag != 0 {
                state.0 |= feature.mask();
            }
        }
        state
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Flags in feature order, each 0 or 1
    pub fn flags(self) -> [u8; 6] {
        Feature::ALL.map(|feature| self.get(feature) as u8)
    }

    pub fn get(self, feature: Feature) -> bool {
        self.0 & feature.mask() != 0
    }

    /// Mark the direction an action moves toward as blocked
    ///
    /// Only ever clears a flag; applying it twice is the same as once.
    pub fn block(&mut self, action: Action) {
        self.0 &= !Feature::clear_for(action).mask();
    }

    /// Mark food as detected in the direction an action moves toward
    pub fn sense_food(&mut self, action: Action) {
        self.0 |= Feature::food_for(action).mask();
    }

    pub fn is_clear(self, action: Action) -> bool {
        self.get(Feature::clear_for(action))
    }

    pub fn food_toward(self, action: Action) -> bool {
        self.get(Feature::food_for(action))
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State({self})")
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, l, r, fa, fl, fr] = self.flags();
        write!(f, "[{a},{l},{r},{fa},{fl},{fr}]")
    }
}
