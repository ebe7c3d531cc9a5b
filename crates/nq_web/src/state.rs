use std::path::PathBuf;
use std::sync::Arc;
use nq_core::HeadlineSource;
use crate::schema::{build_schema, HeadlineSchema};

pub struct AppState {
    pub schema: HeadlineSchema,
    /// Directory served for every path other than `/query`
    pub static_root: PathBuf,
}

impl AppState {
    pub fn new(source: Arc<dyn HeadlineSource>, static_root: impl Into<PathBuf>) -> Self {
        Self {
            schema: build_schema(source),
            static_root: static_root.into(),
        }
    }
}
