use crate::model::{ModelError, PropertyModel};

///
/// EntityDescriptor
///
/// Runtime model for one mapped entity. Ordered property lists are
/// authoritative for read order and bind order.
///

#[derive(Clone, Debug)]
pub struct EntityDescriptor {
    /// Stable entity name used in registry lookups and identity merging.
    pub name: String,
    /// Base table name.
    pub table: String,
    /// Identity property; read first when loading a row fragment.
    pub id_property: PropertyModel,
    /// Ordered scalar base properties (identity excluded).
    pub properties: Vec<PropertyModel>,
    /// Embedded (value-object) property groups.
    pub embedded: Vec<EmbeddedModel>,
    /// Relationship properties, to-one and to-many.
    pub assocs: Vec<AssocModel>,
}

impl EntityDescriptor {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        table: impl Into<String>,
        id_property: PropertyModel,
    ) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            id_property,
            properties: Vec::new(),
            embedded: Vec::new(),
            assocs: Vec::new(),
        }
    }

    #[must_use]
    pub fn property(mut self, property: PropertyModel) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn embedded(mut self, embedded: EmbeddedModel) -> Self {
        self.embedded.push(embedded);
        self
    }

    #[must_use]
    pub fn assoc(mut self, assoc: AssocModel) -> Self {
        self.assocs.push(assoc);
        self
    }

    /// Look up a relationship property by name.
    pub fn try_assoc(&self, property: &str) -> Result<&AssocModel, ModelError> {
        self.assocs
            .iter()
            .find(|assoc| assoc.name == property)
            .ok_or_else(|| ModelError::UnknownAssoc {
                entity: self.name.clone(),
                property: property.to_string(),
            })
    }
}

///
/// EmbeddedModel
///
/// A composite value object persisted across multiple columns of the
/// owning entity's table. Carries its constituent scalar properties in
/// declared order.
///

#[derive(Clone, Debug)]
pub struct EmbeddedModel {
    pub name: String,
    pub properties: Vec<PropertyModel>,
}

impl EmbeddedModel {
    #[must_use]
    pub fn new(name: impl Into<String>, properties: Vec<PropertyModel>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }
}

///
/// AssocCardinality
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AssocCardinality {
    /// Scalar relationship; loaded into a single property slot.
    One,
    /// Collection relationship (one-to-many or many-to-many); loaded
    /// into the owner's backing collection.
    Many,
}

///
/// AssocModel
///
/// One relationship property. The target is held by name and resolved
/// through the [`DescriptorRegistry`](crate::model::DescriptorRegistry),
/// which keeps cyclic entity graphs representable.
///

#[derive(Clone, Debug)]
pub struct AssocModel {
    /// Property name on the owning entity.
    pub name: String,
    /// Target entity name.
    pub target: String,
    pub cardinality: AssocCardinality,
    /// To-one relationship may be absent; forces an outer join.
    pub nullable: bool,
}

impl AssocModel {
    /// Mandatory to-one relationship.
    #[must_use]
    pub fn one(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            cardinality: AssocCardinality::One,
            nullable: false,
        }
    }

    /// Optional to-one relationship.
    #[must_use]
    pub fn optional_one(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            nullable: true,
            ..Self::one(name, target)
        }
    }

    /// To-many relationship.
    #[must_use]
    pub fn many(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            cardinality: AssocCardinality::Many,
            nullable: false,
        }
    }

    /// True for collection relationships.
    #[must_use]
    pub const fn is_many(&self) -> bool {
        matches!(self.cardinality, AssocCardinality::Many)
    }
}
