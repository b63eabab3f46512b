use crate::{
    model::EntityDescriptor,
    row::{EntityRef, EntityRow, RowContext},
    tree::{FromClause, JoinType, TreeError},
};
use std::sync::Arc;

///
/// ResultTreeNode
///
/// One node of a compiled result tree. The closed variant set replaces
/// the usual subclass hierarchy: a plain bean node for the root and
/// to-one paths, and a many-root node where a to-many path begins.
///

#[derive(Debug)]
pub enum ResultTreeNode {
    Bean(BeanNode),
    ManyRoot(ManyRootNode),
}

impl ResultTreeNode {
    /// Load this node's bean from the context's current row.
    ///
    /// `parent` receives the bean on its association property when
    /// present; `context_parent` is the collection owner handle passed
    /// down for to-many children. Returns `None` when the (outer-joined)
    /// row carries no bean for this node.
    pub fn load(
        &self,
        ctx: &mut dyn RowContext,
        parent: Option<&EntityRef>,
        context_parent: Option<&EntityRef>,
    ) -> Result<Option<EntityRef>, TreeError> {
        match self {
            Self::Bean(node) => node.load(ctx, parent),
            Self::ManyRoot(node) => node.load(ctx, context_parent),
        }
    }

    /// Emit this node's join participation, descending into children.
    /// Called once per compiled query, not per row.
    pub fn append_from(&self, from: &mut FromClause, join: JoinType) {
        match self {
            Self::Bean(node) => node.append_from(from, join),
            Self::ManyRoot(node) => node.append_from(from, join),
        }
    }

    /// True for nodes that begin a to-many path. Ancestors use this to
    /// force descendants to outer join.
    #[must_use]
    pub const fn has_many(&self) -> bool {
        matches!(self, Self::ManyRoot(_))
    }

    /// Relationship path of this node; empty at the root.
    #[must_use]
    pub fn prefix(&self) -> &str {
        match self {
            Self::Bean(node) => &node.prefix,
            Self::ManyRoot(node) => &node.base.prefix,
        }
    }

    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Bean(node) => &node.children,
            Self::ManyRoot(node) => &node.base.children,
        }
    }

    /// Nodes in this subtree, self included.
    #[must_use]
    pub fn node_count(&self) -> u32 {
        1 + self
            .children()
            .iter()
            .map(Self::node_count)
            .sum::<u32>()
    }
}

///
/// ReadProperty
///
/// Precomputed column read: which column to fetch and which bean slot
/// receives it. Embedded sub-properties use dotted slots.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ReadProperty {
    pub(crate) slot: String,
    pub(crate) column: String,
}

///
/// BeanNode
///
/// Loads one row fragment into a bean: identity column first, then the
/// declared properties in fixed order, then nested paths.
///

#[derive(Debug)]
pub struct BeanNode {
    pub(crate) prefix: String,
    pub(crate) descriptor: Arc<EntityDescriptor>,
    /// Association property on the parent bean, absent at the root.
    pub(crate) assoc_name: Option<String>,
    /// Optional to-one path; joins outer regardless of ancestors.
    pub(crate) nullable: bool,
    pub(crate) reads: Vec<ReadProperty>,
    pub(crate) children: Vec<ResultTreeNode>,
}

impl BeanNode {
    fn load(
        &self,
        ctx: &mut dyn RowContext,
        parent: Option<&EntityRef>,
    ) -> Result<Option<EntityRef>, TreeError> {
        let id = ctx.read_column(&self.prefix, &self.descriptor.id_property.column)?;
        if id.is_null() {
            // outer-joined row with no bean at this path
            return Ok(None);
        }

        let mut fresh = EntityRow::new(&self.descriptor.name);
        fresh.set_value(&self.descriptor.id_property.name, id.clone());
        for read in &self.reads {
            let value = ctx.read_column(&self.prefix, &read.column)?;
            fresh.set_value(&read.slot, value);
        }

        // identity handling belongs to the context: the same entity
        // recurring across rows resolves to one shared bean
        let bean = ctx.contextual(&self.descriptor.name, &id, fresh);

        for child in &self.children {
            if child.has_many() {
                child.load(ctx, None, Some(&bean))?;
            } else {
                child.load(ctx, Some(&bean), Some(&bean))?;
            }
        }

        if let (Some(parent), Some(assoc)) = (parent, &self.assoc_name) {
            parent.borrow_mut().set_one(assoc.clone(), bean.clone());
        }

        Ok(Some(bean))
    }

    fn append_from(&self, from: &mut FromClause, join: JoinType) {
        let own = if self.prefix.is_empty() {
            from.append_root(&self.descriptor.table);
            join
        } else {
            let own = if self.nullable { join.force_outer() } else { join };
            from.append_join(&self.prefix, &self.descriptor.table, own);
            own
        };

        for child in &self.children {
            let child_join = if child.has_many() {
                own.force_outer()
            } else {
                own
            };
            child.append_from(from, child_join);
        }
    }
}

///
/// ManyRootNode
///
/// Bean node specialized for the point where a to-many path begins. The
/// detail bean is loaded free-standing and inserted into the owner's
/// backing collection instead of being assigned to a scalar property,
/// and every join beneath this node is forced outer.
///

#[derive(Debug)]
pub struct ManyRootNode {
    /// Collection property on the owning bean.
    pub(crate) many_name: String,
    pub(crate) base: BeanNode,
}

impl ManyRootNode {
    fn load(
        &self,
        ctx: &mut dyn RowContext,
        context_parent: Option<&EntityRef>,
    ) -> Result<Option<EntityRef>, TreeError> {
        // parent is deliberately absent: the detail belongs in a
        // collection, not on a scalar property of the owner
        let detail = self.base.load(ctx, None)?;

        // the owner's collection materializes even for a null detail,
        // so zero children reads as empty rather than unloaded
        if let Some(owner) = context_parent {
            let mut owner = owner.borrow_mut();
            owner.ensure_collection(&self.many_name);
            if let Some(detail) = &detail {
                owner.add_to_collection(&self.many_name, detail.clone(), false);
            }
        }

        Ok(detail)
    }

    fn append_from(&self, from: &mut FromClause, join: JoinType) {
        self.base.append_from(from, join.force_outer());
    }
}
