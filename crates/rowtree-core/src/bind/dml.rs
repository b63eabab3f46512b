use std::fmt;

///
/// DmlMode
///
/// Which DML statement a binder list is being assembled for. Insert and
/// update differ in which properties participate; delete binds keys
/// only, which other layers own.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DmlMode {
    Insert,
    Update,
    Delete,
}

impl fmt::Display for DmlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        write!(f, "{label}")
    }
}
