///
/// PropertyModel
///
/// Runtime metadata for one scalar property mapped to one column.
/// Field order within the owning descriptor is authoritative: read order
/// and bind-parameter order are both derived from it.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PropertyModel {
    /// Property name as used on the loaded bean.
    pub name: String,
    /// Column name in the owning entity's table.
    pub column: String,
    /// Participates in INSERT statements.
    pub insertable: bool,
    /// Participates in UPDATE statements.
    pub updatable: bool,
    /// Large object; excluded from statements built without LOBs.
    pub lob: bool,
    /// Stored encrypted; binds ciphertext plus a key parameter.
    pub encrypted: bool,
    /// Column accepts SQL null.
    pub nullable: bool,
}

impl PropertyModel {
    /// Plain read-write column with no special handling.
    #[must_use]
    pub fn new(name: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
            insertable: true,
            updatable: true,
            lob: false,
            encrypted: false,
            nullable: false,
        }
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub const fn lob(mut self) -> Self {
        self.lob = true;
        self
    }

    #[must_use]
    pub const fn encrypted(mut self) -> Self {
        self.encrypted = true;
        self
    }

    /// Generated or otherwise read-only column.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.insertable = false;
        self.updatable = false;
        self
    }

    /// Insert-only column (set once, never updated).
    #[must_use]
    pub const fn insert_only(mut self) -> Self {
        self.updatable = false;
        self
    }
}
