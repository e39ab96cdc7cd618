/// a user input: basic combo step, force strike, or one of three skills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    X,
    FS,
    S1,
    S2,
    S3,
}

impl Action {
    pub const ALL: [Action; 5] = [Action::X, Action::FS, Action::S1, Action::S2, Action::S3];

    /// dense index in 0..5, used by the exploration/packing layers to avoid
    /// allocating per-action keys.
    pub const fn index(self) -> usize {
        match self {
            Action::X => 0,
            Action::FS => 1,
            Action::S1 => 2,
            Action::S2 => 3,
            Action::S3 => 4,
        }
    }

    pub const fn from_index(i: u8) -> Self {
        match i {
            0 => Action::X,
            1 => Action::FS,
            2 => Action::S1,
            3 => Action::S2,
            4 => Action::S3,
            _ => panic!("action index out of range"),
        }
    }

    /// skill slot 0..3, or None for X/FS.
    pub const fn skill_index(self) -> Option<usize> {
        match self {
            Action::S1 => Some(0),
            Action::S2 => Some(1),
            Action::S3 => Some(2),
            _ => None,
        }
    }
}

/// the tag recorded on the resulting state after an action resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AfterAction {
    Nothing,
    C1,
    C2,
    C3,
    C4,
    C5,
    FS,
    S1,
    S2,
    S3,
}

impl AfterAction {
    /// combo step 0..5 (C1..C5), or None for anything else.
    pub const fn combo_index(self) -> Option<usize> {
        match self {
            AfterAction::C1 => Some(0),
            AfterAction::C2 => Some(1),
            AfterAction::C3 => Some(2),
            AfterAction::C4 => Some(3),
            AfterAction::C5 => Some(4),
            _ => None,
        }
    }

    /// skill slot 0..3, or None for anything else.
    pub const fn skill_index(self) -> Option<usize> {
        match self {
            AfterAction::S1 => Some(0),
            AfterAction::S2 => Some(1),
            AfterAction::S3 => Some(2),
            _ => None,
        }
    }

    pub const fn is_fs(self) -> bool {
        matches!(self, AfterAction::FS)
    }

    /// the combo step reached by issuing X from this state.
    pub const fn next_combo(self) -> AfterAction {
        match self.combo_index() {
            Some(0) => AfterAction::C2,
            Some(1) => AfterAction::C3,
            Some(2) => AfterAction::C4,
            Some(3) => AfterAction::C5,
            _ => AfterAction::C1,
        }
    }
}
