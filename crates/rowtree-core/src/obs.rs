//! Trace events emitted by tree compilation and row loading.
//!
//! Sinks are supplied by the caller and purely observational: a compiled
//! tree behaves identically with or without one attached. Whatever
//! telemetry the caller keeps behind the sink stays out of this crate.

///
/// TraceSink
///

pub trait TraceSink: Send + Sync {
    fn on_event(&self, event: TraceEvent);
}

///
/// TraceEvent
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TraceEvent {
    /// A result tree finished compiling.
    TreeCompiled {
        entity: String,
        joined_nodes: u32,
        secondary_queries: u32,
    },
    /// One row produced a root bean.
    RowLoaded { entity: String },
}
