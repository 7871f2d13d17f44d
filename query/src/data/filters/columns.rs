//! Log table storage layout
//!
//! Most attributes live in sparse families: parallel `names`/`values` array
//! columns. A value is only addressable after checking that its name is
//! present, because `indexOf` yields 0 for absent names.

/// Array of attribute names recorded as null
pub const NULL_FIELDS_NAMES: &str = "null_fields.names";

/// Fixed first-class column always compared numerically
pub const PHONE_COLUMN: &str = "phone";

/// Lambda parameter used in `arrayExists` scans
pub const SCAN_VARIABLE: &str = "x";

/// Sparse attribute family stored as parallel arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparseFamily {
    Boolean,
    Number,
    String,
    Labels,
}

impl SparseFamily {
    pub fn names(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean_fields.names",
            Self::Number => "number_fields.names",
            Self::String => "string_fields.names",
            Self::Labels => "labels.names",
        }
    }

    pub fn values(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean_fields.values",
            Self::Number => "number_fields.values",
            Self::String => "string_fields.values",
            Self::Labels => "labels.values",
        }
    }

    /// `has(<family>.names, <key>)`
    pub fn contains(&self, key_sql: &str) -> String {
        format!("has({}, {})", self.names(), key_sql)
    }

    /// `<family>.values[indexOf(<family>.names, <key>)]`
    pub fn element(&self, key_sql: &str) -> String {
        format!("{}[indexOf({}, {})]", self.values(), self.names(), key_sql)
    }

    /// `arrayExists(x -> <predicate>, <family>.values)`
    pub fn any_value(&self, predicate: &str) -> String {
        format!(
            "arrayExists({} -> {}, {})",
            SCAN_VARIABLE,
            predicate,
            self.values()
        )
    }
}
