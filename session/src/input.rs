//! Edge-triggered input flags polled once per logic frame.

use snake_core::Direction;

/// Change in a flag's state observed by a poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlagTransition {
    /// The predicate became true.
    Raised,
    /// The predicate became false.
    Lowered,
}

/// Flag that evaluates a predicate on every poll and reports state changes.
#[derive(Debug)]
pub struct PollingFlag<P> {
    predicate: P,
    state: bool,
}

impl<P> PollingFlag<P>
where
    P: FnMut() -> bool,
{
    /// Creates a lowered flag driven by `predicate`.
    pub fn new(predicate: P) -> Self {
        Self {
            predicate,
            state: false,
        }
    }

    /// State recorded by the most recent poll.
    #[must_use]
    pub const fn state(&self) -> bool {
        self.state
    }

    /// Evaluates the predicate and reports the transition, if any.
    pub fn poll(&mut self) -> Option<FlagTransition> {
        let state = (self.predicate)();
        let transition = match (self.state, state) {
            (false, true) => Some(FlagTransition::Raised),
            (true, false) => Some(FlagTransition::Lowered),
            _ => None,
        };
        self.state = state;
        transition
    }
}

/// Four direction keys, each enqueued once when it is pressed.
#[derive(Debug)]
pub struct DirectionControls<P> {
    flags: [(Direction, PollingFlag<P>); 4],
}

impl<P> DirectionControls<P>
where
    P: FnMut() -> bool,
{
    /// Builds a flag for every direction from `pressed`, which returns the
    /// "is this key held" predicate for a direction.
    pub fn new<F>(mut pressed: F) -> Self
    where
        F: FnMut(Direction) -> P,
    {
        Self {
            flags: Direction::ALL.map(|direction| (direction, PollingFlag::new(pressed(direction)))),
        }
    }

    /// Polls every key and appends the directions pressed since the last poll.
    pub fn poll(&mut self, out: &mut Vec<Direction>) {
        for (direction, flag) in &mut self.flags {
            if flag.poll() == Some(FlagTransition::Raised) {
                out.push(*direction);
            }
        }
    }
}
