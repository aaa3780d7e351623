use thiserror::Error;

/// Reasons a [`Scalar`](super::Scalar) cannot become a value of the target type.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ScalarError {
    #[error("value `{value}` is out of range for `{target}`")]
    Overflow { value: String, target: &'static str },
    #[error("`{value}` is not a valid `{target}`")]
    InvalidFormat { value: String, target: &'static str },
    #[error("a {from} cannot be converted to `{target}`")]
    InvalidCast {
        from: &'static str,
        target: &'static str,
    },
}
