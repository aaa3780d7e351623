use thiserror::Error;

/// Errors raised when calling a reflected [`MethodInfo`](crate::info::MethodInfo).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvokeError {
    #[error("method `{method}` called on `{received}`, expected `{expected}`")]
    Receiver {
        method: &'static str,
        expected: &'static str,
        received: &'static str,
    },
    #[error("method `{method}` takes {expected} argument(s), received {received}")]
    ArgumentCount {
        method: &'static str,
        expected: usize,
        received: usize,
    },
    #[error("method `{method}` expected an argument of type `{expected}`, received `{received}`")]
    ArgumentType {
        method: &'static str,
        expected: &'static str,
        received: &'static str,
    },
    #[error("method `{method}` is not a getter")]
    NotAGetter { method: &'static str },
    #[error("method `{method}` is not a setter")]
    NotASetter { method: &'static str },
}
