use crate::object::ObjectRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime value carried by fields, variables and method arguments.
///
/// Numeric widths are kept distinct so a recorded argument list can be matched
/// against a registered method signature (`setPadding(int, int, int, int)` is
/// not `setPadding(long, long, long, long)`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    List(Vec<Value>),
    /// Live object handle. Only produced at runtime, never read from a document.
    #[serde(skip)]
    Object(ObjectRef),
}

/// Parameter type used in method signatures
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    /// Accepts any argument
    Any,
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Str,
    List,
    /// Object of the named kind (or a kind extending it)
    Object(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Normalized parameter type of this value. `Null` carries no type and
    /// matches as `Any`.
    pub fn param_type(&self) -> ParamType {
        match self {
            Value::Null => ParamType::Any,
            Value::Bool(_) => ParamType::Bool,
            Value::Byte(_) => ParamType::Byte,
            Value::Short(_) => ParamType::Short,
            Value::Int(_) => ParamType::Int,
            Value::Long(_) => ParamType::Long,
            Value::Float(_) => ParamType::Float,
            Value::Double(_) => ParamType::Double,
            Value::Str(_) => ParamType::Str,
            Value::List(_) => ParamType::List,
            Value::Object(obj) => ParamType::Object(obj.kind().to_string()),
        }
    }

    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            other => other.param_type().to_string(),
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view of any integral value that fits in 32 bits
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Byte(v) => Some(*v as i32),
            Value::Short(v) => Some(*v as i32),
            Value::Int(v) => Some(*v),
            Value::Long(v) => i32::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v as f64),
            Value::Double(v) => Some(*v),
            other => other.as_i32().map(f64::from),
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// JSON rendering used for snapshots; objects render as `kind#id`
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => json!(b),
            Value::Byte(v) => json!(v),
            Value::Short(v) => json!(v),
            Value::Int(v) => json!(v),
            Value::Long(v) => json!(v),
            Value::Float(v) => json!(v),
            Value::Double(v) => json!(v),
            Value::Str(s) => json!(s),
            Value::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Object(obj) => json!(format!("{}#{}", obj.kind(), obj.id())),
        }
    }
}

/// Normalized types of an argument list, in order
pub fn signature_of(args: &[Value]) -> Vec<ParamType> {
    args.iter().map(Value::param_type).collect()
}

/// Renders a signature the way error messages print it: `int, String`
pub fn display_signature(types: &[ParamType]) -> String {
    types
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Any => write!(f, "Object"),
            ParamType::Bool => write!(f, "boolean"),
            ParamType::Byte => write!(f, "byte"),
            ParamType::Short => write!(f, "short"),
            ParamType::Int => write!(f, "int"),
            ParamType::Long => write!(f, "long"),
            ParamType::Float => write!(f, "float"),
            ParamType::Double => write!(f, "double"),
            ParamType::Str => write!(f, "String"),
            ParamType::List => write!(f, "List"),
            ParamType::Object(kind) => write!(f, "{}", kind),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<ObjectRef> for Value {
    fn from(v: ObjectRef) -> Self {
        Value::Object(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}
