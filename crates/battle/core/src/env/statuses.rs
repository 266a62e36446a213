use crate::state::{StatusDefinition, StatusId};

/// Catalog of status effect definitions by id.
pub trait StatusOracle: Send + Sync {
    fn status(&self, id: &StatusId) -> Option<StatusDefinition>;
}
