#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum CloudError {
    #[error("invalid {field}: sizes must be positive, got {value}")]
    InvalidSize { field: &'static str, value: u32 },
    #[error("inverted size range: min_size {min_size} > max_size {max_size}")]
    InvertedSizeRange { min_size: u32, max_size: u32 },
    #[error("invalid count {count} for tag '{value}': weights must be finite and non-negative")]
    InvalidCount { value: String, count: f64 },
    #[error("handler '{name}' on tag '{tag}' is an attribute, not a callable handler")]
    HandlerNotCallable { name: String, tag: String },
    #[error("invalid {field} {value}: colour options must be finite")]
    InvalidColorOption { field: &'static str, value: f64 },
    #[error("invalid container element name '{name}'")]
    InvalidContainer { name: String },
}
