use crate::{
    fetch::{FetchPlan, RelationPath, SecondaryQuery},
    model::{DescriptorRegistry, EntityDescriptor},
    obs::{TraceEvent, TraceSink},
    row::{EntityRef, RowContext},
    tree::{
        FromClause, JoinType, ResultTreeNode, TreeError,
        node::{BeanNode, ManyRootNode, ReadProperty},
    },
};
use std::{collections::BTreeSet, fmt, sync::Arc};

///
/// TreeBuilder
///
/// Compiles a fetch plan against registered metadata into a
/// [`CompiledTree`]. Join-mode paths become tree nodes; every other
/// mode is split into a [`SecondaryQuery`]. Building is deterministic:
/// association order comes from the descriptors and plan walks are
/// ordered, so the same inputs always yield the same tree.
///

pub struct TreeBuilder<'a> {
    registry: &'a DescriptorRegistry,
    plan: &'a FetchPlan,
    trace: Option<Arc<dyn TraceSink>>,
}

impl<'a> TreeBuilder<'a> {
    #[must_use]
    pub const fn new(registry: &'a DescriptorRegistry, plan: &'a FetchPlan) -> Self {
        Self {
            registry,
            plan,
            trace: None,
        }
    }

    /// Attach a trace sink to the compiled tree. Tracing never affects
    /// execution semantics.
    #[must_use]
    pub fn with_trace(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.trace = Some(sink);
        self
    }

    /// Compile the tree rooted at `root_entity`.
    pub fn build(&self, root_entity: &str) -> Result<CompiledTree, TreeError> {
        let descriptor = self.registry.try_get(root_entity)?;

        let mut secondary = Vec::new();
        let mut consumed = BTreeSet::new();
        let root = self.build_bean(descriptor, "", None, false, &mut secondary, &mut consumed)?;
        let root = ResultTreeNode::Bean(root);

        // every declared path must have joined the tree or a secondary
        // query; anything left over has no joined ancestor chain
        for (path, _) in self.plan.paths() {
            if !consumed.contains(path) {
                return Err(TreeError::OrphanPath {
                    path: path.to_string(),
                });
            }
        }

        if let Some(sink) = &self.trace {
            sink.on_event(TraceEvent::TreeCompiled {
                entity: root_entity.to_string(),
                joined_nodes: root.node_count(),
                secondary_queries: secondary.len() as u32,
            });
        }

        Ok(CompiledTree {
            entity: root_entity.to_string(),
            root,
            secondary,
            trace: self.trace.clone(),
        })
    }

    fn build_bean(
        &self,
        descriptor: Arc<EntityDescriptor>,
        prefix: &str,
        assoc_name: Option<String>,
        nullable: bool,
        secondary: &mut Vec<SecondaryQuery>,
        consumed: &mut BTreeSet<RelationPath>,
    ) -> Result<BeanNode, TreeError> {
        let reads = read_list(&descriptor);

        let mut children = Vec::new();
        for assoc in &descriptor.assocs {
            let path = if prefix.is_empty() {
                RelationPath::try_new(assoc.name.clone())?
            } else {
                RelationPath::try_new(format!("{prefix}.{}", assoc.name))?
            };
            let Some(config) = self.plan.config_for(&path) else {
                continue;
            };

            consumed.insert(path.clone());

            if config.is_join() {
                let target = self.registry.try_get(&assoc.target)?;
                if assoc.is_many() {
                    let base =
                        self.build_bean(target, path.as_str(), None, false, secondary, consumed)?;
                    children.push(ResultTreeNode::ManyRoot(ManyRootNode {
                        many_name: assoc.name.clone(),
                        base,
                    }));
                } else {
                    let node = self.build_bean(
                        target,
                        path.as_str(),
                        Some(assoc.name.clone()),
                        assoc.nullable,
                        secondary,
                        consumed,
                    )?;
                    children.push(ResultTreeNode::Bean(node));
                }
            } else {
                // deferred path: declared sub-paths travel with it and
                // compile inside the secondary query, not this tree
                let mut query = SecondaryQuery::new(path.clone(), config);
                for (nested_path, nested_config) in self.plan.paths_under(&path) {
                    query.nested.push((nested_path.clone(), nested_config));
                }
                for (nested_path, _) in &query.nested {
                    consumed.insert(nested_path.clone());
                }
                secondary.push(query);
            }
        }

        Ok(BeanNode {
            prefix: prefix.to_string(),
            descriptor,
            assoc_name,
            nullable,
            reads,
            children,
        })
    }
}

// Precompute the ordered read list: scalar properties in declared order,
// then embedded sub-properties flattened under dotted slots.
fn read_list(descriptor: &EntityDescriptor) -> Vec<ReadProperty> {
    let mut reads = Vec::new();
    for property in &descriptor.properties {
        reads.push(ReadProperty {
            slot: property.name.clone(),
            column: property.column.clone(),
        });
    }
    for embedded in &descriptor.embedded {
        for property in &embedded.properties {
            reads.push(ReadProperty {
                slot: format!("{}.{}", embedded.name, property.name),
                column: property.column.clone(),
            });
        }
    }

    reads
}

///
/// CompiledTree
///
/// Immutable compiled result tree plus the deferred secondary queries
/// split out of it. Shared across executions; all per-row state lives
/// in the caller's row context.
///

pub struct CompiledTree {
    entity: String,
    root: ResultTreeNode,
    secondary: Vec<SecondaryQuery>,
    trace: Option<Arc<dyn TraceSink>>,
}

impl CompiledTree {
    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub const fn root(&self) -> &ResultTreeNode {
        &self.root
    }

    #[must_use]
    pub fn secondary_queries(&self) -> &[SecondaryQuery] {
        &self.secondary
    }

    /// Emit the tree's join participation into `from`. The root starts
    /// inner; escalation happens per node on the way down.
    pub fn append_from(&self, from: &mut FromClause) {
        self.root.append_from(from, JoinType::Inner);
    }

    /// Load the context's current row into a bean graph. `None` means
    /// the row carried no root bean.
    pub fn load_row(&self, ctx: &mut dyn RowContext) -> Result<Option<EntityRef>, TreeError> {
        let bean = self.root.load(ctx, None, None)?;

        if bean.is_some() {
            if let Some(sink) = &self.trace {
                sink.on_event(TraceEvent::RowLoaded {
                    entity: self.entity.clone(),
                });
            }
        }

        Ok(bean)
    }
}

impl fmt::Debug for CompiledTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledTree")
            .field("entity", &self.entity)
            .field("root", &self.root)
            .field("secondary", &self.secondary)
            .field("traced", &self.trace.is_some())
            .finish()
    }
}
