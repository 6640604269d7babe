use serde::{Deserialize, Serialize};
use trellis_model::DEFAULT_COMPLETION_HOOK;

/// Inflation pass configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflateOptions {
    /// Kind constructed when a declared kind cannot be built
    #[serde(default = "default_container_kind")]
    pub default_container_kind: String,

    /// Name of the static method run after a node is fully configured
    #[serde(default = "default_completion_hook")]
    pub completion_hook: String,

    /// Deepest dispatch nesting allowed before a subtree is abandoned
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Keep recovered errors for `Inflater::diagnostics`
    #[serde(default = "default_collect_diagnostics")]
    pub collect_diagnostics: bool,
}

fn default_container_kind() -> String {
    "frame".to_string()
}

fn default_completion_hook() -> String {
    DEFAULT_COMPLETION_HOOK.to_string()
}

fn default_max_depth() -> usize {
    64
}

fn default_collect_diagnostics() -> bool {
    true
}

impl Default for InflateOptions {
    fn default() -> Self {
        Self {
            default_container_kind: default_container_kind(),
            completion_hook: default_completion_hook(),
            max_depth: default_max_depth(),
            collect_diagnostics: default_collect_diagnostics(),
        }
    }
}
