use tracing::debug;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::evaluator::{
        core::{EvalResult, Interpreter},
        function::core::NativeValue,
    },
};

/// Fetches a URL with a blocking HTTP GET and returns the body as a string.
///
/// The request uses the interpreter's agent, so the configured timeout
/// applies.
///
/// # Errors
/// - `InvalidArgument` if the URL is not a string.
/// - `Request` for transport failures, non-success statuses and bodies that
///   cannot be read as text.
pub fn get(interpreter: &mut Interpreter, args: &[Node], line: usize) -> EvalResult<NativeValue> {
    let [Node::String(url)] = args else {
        return Err(RuntimeError::InvalidArgument { details: "'get' expects a single URL string".to_string(),
                                                   line });
    };
    debug!(url = url.as_str(), line, "http get");

    let request_error = |details: String| RuntimeError::Request { url: url.clone(),
                                                                  details,
                                                                  line };

    let response = interpreter.http
                              .get(url)
                              .call()
                              .map_err(|e| request_error(e.to_string()))?;
    let body = response.into_string()
                       .map_err(|e| request_error(e.to_string()))?;

    Ok(NativeValue::Text(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_must_be_a_string() {
        let mut interpreter = Interpreter::new();
        let err = get(&mut interpreter, &[Node::Number(1.0)], 3).unwrap_err();

        assert!(matches!(err, RuntimeError::InvalidArgument { line: 3, .. }));
    }

    #[test]
    fn malformed_urls_are_request_errors() {
        let mut interpreter = Interpreter::new();
        let err = get(&mut interpreter, &[Node::from("not a url")], 2).unwrap_err();

        assert!(matches!(err, RuntimeError::Request { line: 2, .. }), "{err}");
    }
}
