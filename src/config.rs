use serde::{Deserialize, Serialize};

/// What the layer loader does with edges whose endpoints are equal.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfLoopPolicy {
    /// Leave self-loops out of the layer graph. The node itself is still present.
    #[default]
    Drop,
    /// Store self-loops as `(u, u)` edges, counting repeats like any other edge.
    Keep,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    pub self_loops: SelfLoopPolicy,
}

impl LoaderOptions {
    pub fn keep_self_loops() -> Self {
        LoaderOptions {
            self_loops: SelfLoopPolicy::Keep,
        }
    }
}
