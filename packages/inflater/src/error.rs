use trellis_model::{HostError, Orientation};
use thiserror::Error;

pub type InflateResult<T> = Result<T, InflateError>;

/// How an error affects the pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Static-declaration problem, nothing was skipped
    Warning,
    /// An effect or subtree was skipped, the pass continued
    Error,
    /// The pass was aborted
    Fatal,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InflateError {
    #[error("Specification '{spec}' declares no recognized builder marker")]
    UnresolvedBuilder { spec: String },

    #[error("No builder registered as '{identifier}' for specification '{spec}'")]
    BuilderNotFound { spec: String, identifier: String },

    #[error("Field '{field}' of '{spec}' is a {role} but its value is {found}, not a parameter list")]
    InvalidSetterShape {
        spec: String,
        field: String,
        role: &'static str,
        found: String,
    },

    #[error("Could not call method {method}({params}) on kind {kind}: {reason}")]
    MethodResolution {
        method: String,
        params: String,
        kind: String,
        reason: String,
    },

    #[error("Root specification '{spec}' allows no orientation lock for {requested:?}")]
    UnsatisfiableOrientation {
        spec: String,
        requested: Vec<Orientation>,
    },

    #[error("Specification '{name}' is not registered (embedded from '{spec}')")]
    UnknownSpecification { spec: String, name: String },

    #[error("Recursive specification detected: {spec}\nCall stack: {}", call_stack.join(" → "))]
    RecursiveSpecification { spec: String, call_stack: Vec<String> },

    #[error("Could not construct '{kind}' for '{spec}': {source}")]
    Construction {
        spec: String,
        kind: String,
        #[source]
        source: HostError,
    },

    #[error("Adapter '{kind}' produced no object for '{spec}'")]
    AdapterProducedNothing { spec: String, kind: String },

    #[error("Variable '{name}' is declared more than once in '{spec}'; the first declaration wins")]
    DuplicateVariable { spec: String, name: String },
}

impl InflateError {
    pub fn severity(&self) -> Severity {
        match self {
            InflateError::UnsatisfiableOrientation { .. } => Severity::Fatal,
            InflateError::DuplicateVariable { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    pub fn construction(spec: impl Into<String>, kind: impl Into<String>, source: HostError) -> Self {
        Self::Construction {
            spec: spec.into(),
            kind: kind.into(),
            source,
        }
    }
}
