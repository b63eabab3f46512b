use crate::fetch::{FetchConfig, RelationPath};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// FetchPlan
///
/// Compiled decision tree describing, per relationship path, how that
/// path's data will be obtained. Paths absent from the plan are not
/// fetched at all. Iteration order is lexicographic over paths, so
/// parents always precede their children and tree building is
/// deterministic across repeated compilations.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FetchPlan {
    configs: BTreeMap<RelationPath, FetchConfig>,
}

impl FetchPlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare how one relationship path is fetched. Re-declaring a path
    /// replaces its previous config.
    #[must_use]
    pub fn fetch(mut self, path: RelationPath, config: FetchConfig) -> Self {
        self.configs.insert(path, config);
        self
    }

    /// Config for a path, or `None` when the path is not fetched.
    #[must_use]
    pub fn config_for(&self, path: &RelationPath) -> Option<FetchConfig> {
        self.configs.get(path).copied()
    }

    /// True when the path is fetched via an inline join.
    #[must_use]
    pub fn is_joined(&self, path: &RelationPath) -> bool {
        self.config_for(path).is_some_and(|config| config.is_join())
    }

    /// All declared paths in lexicographic order.
    pub fn paths(&self) -> impl Iterator<Item = (&RelationPath, FetchConfig)> {
        self.configs.iter().map(|(path, config)| (path, *config))
    }

    /// Declared paths strictly below `path`, in lexicographic order.
    pub fn paths_under<'a>(
        &'a self,
        path: &'a RelationPath,
    ) -> impl Iterator<Item = (&'a RelationPath, FetchConfig)> {
        self.paths()
            .filter(move |(candidate, _)| *candidate != path && candidate.is_under(path))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Render a stable summary for debug logging.
    #[must_use]
    pub fn debug_summary(&self) -> String {
        let parts: Vec<String> = self
            .paths()
            .map(|(path, config)| format!("{path}={}", config.debug_summary()))
            .collect();
        format!("fetch[{}]", parts.join(", "))
    }
}

///
/// SecondaryQuery
///
/// A non-join path split out of the main result tree at compile time.
/// The execution layer satisfies it with its own statement(s), batched
/// by the config's batch size; declared sub-paths of a deferred path
/// travel with it rather than joining the main tree.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SecondaryQuery {
    pub path: RelationPath,
    pub config: FetchConfig,
    /// Fetch declarations below `path`, re-rooted in the secondary
    /// query's own compilation.
    pub nested: Vec<(RelationPath, FetchConfig)>,
}

impl SecondaryQuery {
    #[must_use]
    pub const fn new(path: RelationPath, config: FetchConfig) -> Self {
        Self {
            path,
            config,
            nested: Vec::new(),
        }
    }
}
