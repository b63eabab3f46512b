use std::fmt;

///
/// JoinType
///
/// Join participation of one relationship path. Escalation is one-way:
/// once a path is outer, every descendant path stays outer, so parent
/// rows survive empty to-many collections and absent optional to-ones.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JoinType {
    Inner,
    Outer,
}

impl JoinType {
    /// Escalate to outer. There is no inverse transition.
    #[must_use]
    pub const fn force_outer(self) -> Self {
        Self::Outer
    }

    #[must_use]
    pub const fn is_outer(self) -> bool {
        matches!(self, Self::Outer)
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Inner => "inner",
            Self::Outer => "outer",
        };
        write!(f, "{label}")
    }
}
