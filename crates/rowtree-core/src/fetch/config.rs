use crate::fetch::FetchError;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// FetchMode
///
/// How one relationship path obtains its data. Exactly one mode applies
/// to a path at any time.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum FetchMode {
    /// Populated via a SQL join in the same statement as the parent.
    Join,
    /// Populated by secondary queries of at most `batch_size` parents.
    Query,
    /// Populated on first access, batched across sibling instances.
    Lazy,
    /// Populated from the second-level cache; misses fall back to query.
    Cache,
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Join => "join",
            Self::Query => "query",
            Self::Lazy => "lazy",
            Self::Cache => "cache",
        };
        write!(f, "{label}")
    }
}

///
/// FetchConfig
///
/// Immutable fetch decision for one relationship path: a mode plus the
/// batch size used by the non-join modes. Identity is structural over
/// `(mode, batch_size)`, so equal configs are interchangeable as map
/// keys for plan-node deduplication.
///
/// Join mode carries the default batch size as a placeholder; it is
/// never consulted.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct FetchConfig {
    mode: FetchMode,
    batch_size: u32,
}

impl FetchConfig {
    /// Batch size used by query and cache fetches unless overridden.
    pub const DEFAULT_BATCH_SIZE: u32 = 100;

    /// Batch size used by lazy fetches unless overridden.
    pub const DEFAULT_LAZY_BATCH_SIZE: u32 = 10;

    /// Fetch via a SQL join in the parent statement.
    #[must_use]
    pub const fn join() -> Self {
        Self {
            mode: FetchMode::Join,
            batch_size: Self::DEFAULT_BATCH_SIZE,
        }
    }

    /// Fetch via second-level cache lookup.
    #[must_use]
    pub const fn cache() -> Self {
        Self {
            mode: FetchMode::Cache,
            batch_size: Self::DEFAULT_BATCH_SIZE,
        }
    }

    /// Fetch eagerly via secondary queries with the default batch size.
    #[must_use]
    pub const fn query() -> Self {
        Self {
            mode: FetchMode::Query,
            batch_size: Self::DEFAULT_BATCH_SIZE,
        }
    }

    /// Fetch eagerly via secondary queries of at most `batch_size`
    /// parent identifiers each.
    pub const fn query_with(batch_size: u32) -> Result<Self, FetchError> {
        if batch_size < 1 {
            return Err(FetchError::InvalidBatchSize { batch_size });
        }
        Ok(Self {
            mode: FetchMode::Query,
            batch_size,
        })
    }

    /// Fetch on demand with the default lazy batch size.
    #[must_use]
    pub const fn lazy() -> Self {
        Self {
            mode: FetchMode::Lazy,
            batch_size: Self::DEFAULT_LAZY_BATCH_SIZE,
        }
    }

    /// Fetch on demand, loading up to `batch_size` sibling instances
    /// per triggered query.
    pub const fn lazy_with(batch_size: u32) -> Result<Self, FetchError> {
        if batch_size < 1 {
            return Err(FetchError::InvalidBatchSize { batch_size });
        }
        Ok(Self {
            mode: FetchMode::Lazy,
            batch_size,
        })
    }

    /// Return a copy with the batch size replaced, keeping the mode.
    pub const fn with_batch_size(self, batch_size: u32) -> Result<Self, FetchError> {
        if batch_size < 1 {
            return Err(FetchError::InvalidBatchSize { batch_size });
        }
        Ok(Self {
            mode: self.mode,
            batch_size,
        })
    }

    #[must_use]
    pub const fn mode(&self) -> FetchMode {
        self.mode
    }

    #[must_use]
    pub const fn batch_size(&self) -> u32 {
        self.batch_size
    }

    #[must_use]
    pub const fn is_join(&self) -> bool {
        matches!(self.mode, FetchMode::Join)
    }

    #[must_use]
    pub const fn is_query(&self) -> bool {
        matches!(self.mode, FetchMode::Query)
    }

    #[must_use]
    pub const fn is_lazy(&self) -> bool {
        matches!(self.mode, FetchMode::Lazy)
    }

    #[must_use]
    pub const fn is_cache(&self) -> bool {
        matches!(self.mode, FetchMode::Cache)
    }

    /// Render a stable summary for debug logging.
    #[must_use]
    pub fn debug_summary(&self) -> String {
        if self.is_join() {
            "join".to_string()
        } else {
            format!("{} (batch {})", self.mode, self.batch_size)
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::join()
    }
}
