use super::error::PongError;

/// Command for the controlled paddle
///
/// Indices follow the discrete action space: 0 = hold, 1 = down, 2 = up.
/// "Down" grows y because the arena uses screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Hold,
    MoveDown,
    MoveUp,
}

impl Action {
    /// Size of the discrete action space
    pub const COUNT: usize = 3;

    /// All actions, ordered by index
    pub const ALL: [Action; Self::COUNT] = [Action::Hold, Action::MoveDown, Action::MoveUp];

    /// Sign applied to the paddle velocity when this action is taken
    pub fn delta(&self) -> f32 {
        match self {
            Action::Hold => 0.0,
            Action::MoveDown => 1.0,
            Action::MoveUp => -1.0,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Action::Hold => 0,
            Action::MoveDown => 1,
            Action::MoveUp => 2,
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = PongError;

    fn try_from(idx: usize) -> Result<Self, Self::Error> {
        Action::ALL
            .get(idx)
            .copied()
            .ok_or(PongError::InvalidAction(idx))
    }
}
