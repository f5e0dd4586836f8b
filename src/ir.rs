// Strongly-typed IR for codegen. No swagger types here.

use std::fmt;

/// Import path owning `time.Time`.
pub const TIME_IMPORT: &str = "time";

/// Resolved Go type of a generated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoType {
    Time,                    // time.Time
    String,
    Bool,
    Float64,
    Int32,
    Int64,
    Slice(Box<GoType>),      // []T
    Pointer(Box<GoType>),    // *T
    Model(String),           // sanitized definition name
    Unknown,                 // dangling or unresolvable reference
}

impl GoType {
    pub fn pointer(self) -> Self {
        GoType::Pointer(Box::new(self))
    }

    pub fn slice(self) -> Self {
        GoType::Slice(Box::new(self))
    }
}

impl fmt::Display for GoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoType::Time => f.write_str("time.Time"),
            GoType::String => f.write_str("string"),
            GoType::Bool => f.write_str("bool"),
            GoType::Float64 => f.write_str("float64"),
            GoType::Int32 => f.write_str("int32"),
            GoType::Int64 => f.write_str("int64"),
            GoType::Slice(elem) => write!(f, "[]{elem}"),
            GoType::Pointer(target) => write!(f, "*{target}"),
            GoType::Model(name) => f.write_str(name),
            GoType::Unknown => f.write_str("unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoField {
    pub name: String,
    pub ty: GoType,
    pub json_name: String,   // original property key
}

impl GoField {
    /// Struct tag, back quotes included.
    pub fn tags(&self) -> String {
        format!("`json:\"{},omitempty\"`", self.json_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoModel {
    pub name: String,
    pub fields: Vec<GoField>,  // sorted by json_name
}

/// Everything the renderer needs for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateModel {
    pub imports: Vec<String>,
    pub models: Vec<GoModel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_go_type_syntax() {
        assert_eq!(GoType::Int64.pointer().to_string(), "*int64");
        assert_eq!(GoType::Time.to_string(), "time.Time");
        assert_eq!(GoType::Model("Tag".into()).pointer().slice().to_string(), "[]*Tag");
        assert_eq!(GoType::String.slice().slice().to_string(), "[][]string");
        assert_eq!(GoType::Unknown.pointer().to_string(), "*unknown");
    }

    #[test]
    fn tag_embeds_original_name() {
        let field = GoField {
            name: "PhotoURL".into(),
            ty: GoType::String,
            json_name: "photoUrl".into(),
        };
        assert_eq!(field.tags(), "`json:\"photoUrl,omitempty\"`");
    }
}
