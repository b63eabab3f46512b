use crate::{
    bind::BindError,
    model::PropertyModel,
    row::EntityRow,
    value::Value,
};
use derive_more::Deref;

///
/// BoundValue
///
/// One bound statement parameter. Encrypted columns bind their key as a
/// placeholder slot; the execution layer substitutes the actual key
/// material when it prepares the statement.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BoundValue {
    Value(Value),
    EncryptionKey,
}

///
/// BoundParam
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoundParam {
    pub column: String,
    pub value: BoundValue,
}

///
/// BindParams
///
/// Per-execution bound-parameter buffer. Entry order must match the
/// generated statement's column order exactly; binders are responsible
/// for pushing in declared order.
///

#[derive(Debug, Default, Deref)]
pub struct BindParams {
    params: Vec<BoundParam>,
}

impl BindParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_value(&mut self, column: &str, value: Value) {
        self.params.push(BoundParam {
            column: column.to_string(),
            value: BoundValue::Value(value),
        });
    }

    pub fn push_encryption_key(&mut self, column: &str) {
        self.params.push(BoundParam {
            column: column.to_string(),
            value: BoundValue::EncryptionKey,
        });
    }
}

///
/// Bindable
///
/// Closed set of column binders: one scalar property, or an embedded
/// composite delegating to its children in declared order. Stateless
/// after construction; applied per persisted bean.
///

#[derive(Clone, Debug)]
pub enum Bindable {
    Property(BindableProperty),
    Embedded(BindableEmbedded),
}

impl Bindable {
    /// Bind this binder's parameters for `bean` into `params`.
    pub fn bind(&self, bean: &EntityRow, params: &mut BindParams) -> Result<(), BindError> {
        match self {
            Self::Property(binder) => binder.bind(bean, params),
            Self::Embedded(binder) => binder.bind(bean, params),
        }
    }

    /// Append this binder's column names in bind order.
    pub fn append_columns(&self, out: &mut Vec<String>) {
        match self {
            Self::Property(binder) => binder.append_columns(out),
            Self::Embedded(binder) => binder.append_columns(out),
        }
    }
}

///
/// BindableProperty
///
/// Binds one scalar property to one column (plus a key parameter for
/// encrypted columns; `data_first` fixes which of the two binds first).
///

#[derive(Clone, Debug)]
pub struct BindableProperty {
    property: PropertyModel,
    /// Bean slot the value is read from; dotted for embedded scalars.
    slot: String,
    data_first: bool,
}

impl BindableProperty {
    #[must_use]
    pub fn new(property: PropertyModel, data_first: bool) -> Self {
        let slot = property.name.clone();
        Self {
            property,
            slot,
            data_first,
        }
    }

    /// Rescope the value read under an embedded property's name.
    #[must_use]
    pub fn scoped(mut self, embedded: &str) -> Self {
        self.slot = format!("{embedded}.{}", self.property.name);
        self
    }

    #[must_use]
    pub const fn property(&self) -> &PropertyModel {
        &self.property
    }

    fn bind(&self, bean: &EntityRow, params: &mut BindParams) -> Result<(), BindError> {
        let value = match bean.value(&self.slot) {
            Some(value) => value.clone(),
            None if self.property.nullable => Value::Null,
            None => {
                return Err(BindError::MissingValue {
                    entity: bean.entity().to_string(),
                    property: self.slot.clone(),
                });
            }
        };

        if self.property.encrypted {
            if self.data_first {
                params.push_value(&self.property.column, value);
                params.push_encryption_key(&self.property.column);
            } else {
                params.push_encryption_key(&self.property.column);
                params.push_value(&self.property.column, value);
            }
        } else {
            params.push_value(&self.property.column, value);
        }

        Ok(())
    }

    fn append_columns(&self, out: &mut Vec<String>) {
        out.push(self.property.column.clone());
    }
}

///
/// BindableEmbedded
///
/// Composite binder for one embedded property: delegates to its scalar
/// children in declared order, binding the value object as a unit.
///

#[derive(Clone, Debug)]
pub struct BindableEmbedded {
    name: String,
    items: Vec<BindableProperty>,
}

impl BindableEmbedded {
    #[must_use]
    pub const fn new(name: String, items: Vec<BindableProperty>) -> Self {
        Self { name, items }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn items(&self) -> &[BindableProperty] {
        &self.items
    }

    fn bind(&self, bean: &EntityRow, params: &mut BindParams) -> Result<(), BindError> {
        for item in &self.items {
            item.bind(bean, params)?;
        }
        Ok(())
    }

    fn append_columns(&self, out: &mut Vec<String>) {
        for item in &self.items {
            item.append_columns(out);
        }
    }
}
