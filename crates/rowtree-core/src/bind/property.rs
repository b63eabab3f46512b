use crate::{
    bind::{BindableProperty, DmlMode},
    model::PropertyModel,
};

///
/// PropertyBindFactory
///
/// Produces the binder for one scalar property, or declines. Declining
/// is a normal outcome (mode-excluded or LOB-excluded properties), not
/// an error.
///

#[derive(Clone, Copy, Debug)]
pub struct PropertyBindFactory {
    bind_encrypt_data_first: bool,
}

impl PropertyBindFactory {
    #[must_use]
    pub const fn new(bind_encrypt_data_first: bool) -> Self {
        Self {
            bind_encrypt_data_first,
        }
    }

    /// Binder for `property` under `mode`, or `None` when the property
    /// does not participate in that statement.
    #[must_use]
    pub fn create(
        &self,
        property: &PropertyModel,
        mode: DmlMode,
        with_lobs: bool,
    ) -> Option<BindableProperty> {
        let participates = match mode {
            DmlMode::Insert => property.insertable,
            DmlMode::Update => property.updatable,
            // deletes bind keys only, owned by other layers
            DmlMode::Delete => false,
        };
        if !participates {
            return None;
        }
        if property.lob && !with_lobs {
            return None;
        }

        Some(BindableProperty::new(
            property.clone(),
            self.bind_encrypt_data_first,
        ))
    }
}
