use crate::{
    bind::{Bindable, BindableEmbedded, DmlMode, PropertyBindFactory},
    model::EntityDescriptor,
};

///
/// EmbeddedBindFactory
///
/// Builds one composite binder per embedded property on a descriptor.
/// Constituent scalars bind in declared order; scalars the property
/// factory declines are skipped silently. An embedded property whose
/// scalars are all declined still contributes an (empty) composite, so
/// the binder list shape tracks the descriptor's embedded groups.
///

#[derive(Clone, Copy, Debug)]
pub struct EmbeddedBindFactory {
    factory: PropertyBindFactory,
}

impl EmbeddedBindFactory {
    #[must_use]
    pub const fn new(bind_encrypt_data_first: bool) -> Self {
        Self {
            factory: PropertyBindFactory::new(bind_encrypt_data_first),
        }
    }

    /// Append one composite binder per embedded property to `list`.
    pub fn create(
        &self,
        list: &mut Vec<Bindable>,
        descriptor: &EntityDescriptor,
        mode: DmlMode,
        with_lobs: bool,
    ) {
        for embedded in &descriptor.embedded {
            let mut items = Vec::with_capacity(embedded.properties.len());

            for property in &embedded.properties {
                if let Some(item) = self.factory.create(property, mode, with_lobs) {
                    items.push(item.scoped(&embedded.name));
                }
            }

            list.push(Bindable::Embedded(BindableEmbedded::new(
                embedded.name.clone(),
                items,
            )));
        }
    }
}
