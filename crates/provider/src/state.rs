use mongoidx_core::IndexSpec;
use serde::{Deserialize, Serialize};

/// Value recorded for the framework-required `id` attribute; never read back
pub const PLACEHOLDER_ID: &str = "to_be_ignored";

/// State persisted by the host after a successful create, read or import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    pub id: String,
    #[serde(flatten)]
    pub spec: IndexSpec,
}

impl From<IndexSpec> for ResourceState {
    fn from(spec: IndexSpec) -> Self {
        Self {
            id: PLACEHOLDER_ID.to_string(),
            spec,
        }
    }
}

impl ResourceState {
    pub fn into_spec(self) -> IndexSpec {
        self.spec
    }
}
