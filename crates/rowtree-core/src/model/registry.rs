use crate::model::{EntityDescriptor, ModelError};
use std::{collections::BTreeMap, sync::Arc};

///
/// DescriptorRegistry
///
/// Keyed set of entity descriptors for one mapped schema. Registration
/// happens once at metadata time; lookups after that are read-only and
/// safe to share across executions.
///

#[derive(Clone, Debug, Default)]
pub struct DescriptorRegistry {
    descriptors: BTreeMap<String, Arc<EntityDescriptor>>,
}

impl DescriptorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under its entity name.
    pub fn register(&mut self, descriptor: EntityDescriptor) -> Result<(), ModelError> {
        let name = descriptor.name.clone();
        if self.descriptors.contains_key(&name) {
            return Err(ModelError::DuplicateEntity { name });
        }
        self.descriptors.insert(name, Arc::new(descriptor));

        Ok(())
    }

    /// Resolve a descriptor by entity name.
    pub fn try_get(&self, name: &str) -> Result<Arc<EntityDescriptor>, ModelError> {
        self.descriptors
            .get(name)
            .cloned()
            .ok_or_else(|| ModelError::UnknownEntity {
                name: name.to_string(),
            })
    }

    /// Number of registered entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyModel;

    fn descriptor(name: &str) -> EntityDescriptor {
        EntityDescriptor::new(name, format!("t_{name}"), PropertyModel::new("id", "id"))
    }

    #[test]
    fn register_and_resolve() {
        let mut registry = DescriptorRegistry::new();
        registry.register(descriptor("order")).unwrap();

        let found = registry.try_get("order").unwrap();
        assert_eq!(found.table, "t_order");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = DescriptorRegistry::new();
        registry.register(descriptor("order")).unwrap();

        let err = registry.register(descriptor("order")).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateEntity { name } if name == "order"));
    }

    #[test]
    fn unknown_entity_is_an_error() {
        let registry = DescriptorRegistry::new();
        let err = registry.try_get("ghost").unwrap_err();
        assert!(matches!(err, ModelError::UnknownEntity { name } if name == "ghost"));
    }
}
