#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Position of the highlighted item within the filtered list.
///
/// Every transition takes the current list length so that the index is
/// clamped against the list as it is now, never as it was when a key was
/// pressed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Empty,
    Active(usize),
}

impl Selection {
    /// Fresh selection for a newly computed list: the first item, if any.
    #[must_use]
    pub fn for_len(len: usize) -> Self {
        if len == 0 {
            Self::Empty
        } else {
            Self::Active(0)
        }
    }

    #[must_use]
    pub fn move_down(self, len: usize) -> Self {
        match self.resolve(len) {
            Some(i) => Self::Active((i + 1).min(len - 1)),
            None => Self::for_len(len),
        }
    }

    #[must_use]
    pub fn move_up(self, len: usize) -> Self {
        match self.resolve(len) {
            Some(i) => Self::Active(i.saturating_sub(1)),
            None => Self::for_len(len),
        }
    }

    #[must_use]
    pub fn step(self, direction: Direction, len: usize) -> Self {
        match direction {
            Direction::Up => self.move_up(len),
            Direction::Down => self.move_down(len),
        }
    }

    /// The index to read for a list of `len` items, clamped into range.
    #[must_use]
    pub fn resolve(self, len: usize) -> Option<usize> {
        match self {
            Self::Active(i) if len > 0 => Some(i.min(len - 1)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        assert_eq!(Selection::for_len(0), Selection::Empty);
        assert_eq!(Selection::for_len(3), Selection::Active(0));
    }

    #[test]
    fn test_move_down_clamps_at_last() {
        let s = Selection::Active(2);
        assert_eq!(s.move_down(3), Selection::Active(2));
        assert_eq!(Selection::Active(0).move_down(3), Selection::Active(1));
    }

    #[test]
    fn test_move_up_clamps_at_first() {
        assert_eq!(Selection::Active(0).move_up(3), Selection::Active(0));
        assert_eq!(Selection::Active(2).move_up(3), Selection::Active(1));
    }

    #[test]
    fn test_moves_on_empty_are_noops() {
        assert_eq!(Selection::Empty.move_up(0), Selection::Empty);
        assert_eq!(Selection::Empty.move_down(0), Selection::Empty);
    }

    #[test]
    fn test_stale_index_is_reclamped() {
        // List shrank from 10 to 2 without a reset.
        let stale = Selection::Active(9);
        assert_eq!(stale.resolve(2), Some(1));
        assert_eq!(stale.move_down(2), Selection::Active(1));
        assert_eq!(stale.move_up(2), Selection::Active(0));
        assert_eq!(stale.resolve(0), None);
    }

    #[test]
    fn test_step_dispatches_direction() {
        let s = Selection::Active(1);
        assert_eq!(s.step(Direction::Up, 3), Selection::Active(0));
        assert_eq!(s.step(Direction::Down, 3), Selection::Active(2));
    }
}
