use std::{collections::HashMap, rc::Rc};

use tracing::trace;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::evaluator::{core::EvalResult, function::core::Function},
};

/// A chain of variable frames plus the global function table.
///
/// Reads look through the frames from the innermost outwards. Writes made
/// with [`ScopeStack::set_variable`] update the nearest frame that already
/// binds the name, so a block can change a variable of an enclosing scope,
/// while names introduced inside the block disappear when its frame is
/// popped. The outermost frame is the global one and is never popped.
///
/// Functions are not block scoped: there is a single table for the whole
/// interpreter.
#[derive(Debug)]
pub struct ScopeStack {
    frames:    Vec<HashMap<String, Node>>,
    functions: HashMap<String, Rc<Function>>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    /// Creates a scope chain holding only the empty global frame.
    #[must_use]
    pub fn new() -> Self {
        Self { frames:    vec![HashMap::new()],
               functions: HashMap::new(), }
    }

    /// Opens a new innermost frame.
    pub fn push(&mut self) {
        self.frames.push(HashMap::new());
        trace!(depth = self.frames.len(), "scope pushed");
    }

    /// Discards the innermost frame and every binding it introduced.
    ///
    /// Popping with only the global frame left does nothing.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
        trace!(depth = self.frames.len(), "scope popped");
    }

    /// Number of frames, the global one included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Looks a variable up, innermost frame first.
    ///
    /// # Errors
    /// `UnboundVariable` when no frame binds the name.
    ///
    /// # Example
    /// ```
    /// use blast::{ast::Node, interpreter::evaluator::scope::ScopeStack};
    ///
    /// let mut scopes = ScopeStack::new();
    /// scopes.set_variable("x", Node::Number(2.0));
    ///
    /// scopes.push();
    /// scopes.set_variable("x", Node::Number(5.0));
    /// scopes.set_variable("y", Node::Number(1.0));
    /// scopes.pop();
    ///
    /// assert_eq!(scopes.get_variable("x", 1).unwrap(), &Node::Number(5.0));
    /// assert!(scopes.get_variable("y", 1).is_err());
    /// ```
    pub fn get_variable(&self, name: &str, line: usize) -> EvalResult<&Node> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name))
            .ok_or_else(|| RuntimeError::UnboundVariable { name: name.to_string(),
                                                           line })
    }

    /// Assigns a variable.
    ///
    /// The nearest frame that already binds `name` is updated. If none does,
    /// the binding is created in the innermost frame.
    pub fn set_variable(&mut self, name: &str, value: Node) {
        if let Some(slot) = self.frames
                                .iter_mut()
                                .rev()
                                .find_map(|frame| frame.get_mut(name))
        {
            *slot = value;
            return;
        }
        self.define_variable(name, value);
    }

    /// Binds a variable in the innermost frame, shadowing any outer binding.
    ///
    /// Used for function parameters and loop counters.
    pub fn define_variable(&mut self, name: &str, value: Node) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.to_string(), value);
        }
    }

    /// Registers a function, replacing any previous one with the same name.
    pub fn set_function(&mut self, name: &str, function: Rc<Function>) {
        self.functions.insert(name.to_string(), function);
    }

    /// Looks a function up by name.
    ///
    /// # Errors
    /// `UnboundFunction` when no function has that name.
    pub fn get_function(&self, name: &str, line: usize) -> EvalResult<Rc<Function>> {
        self.functions
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UnboundFunction { name: name.to_string(),
                                                           line })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_fall_through_to_outer_frames() {
        let mut scopes = ScopeStack::new();
        scopes.set_variable("a", Node::Number(1.0));
        scopes.push();
        scopes.push();

        assert_eq!(scopes.get_variable("a", 1).unwrap(), &Node::Number(1.0));
        assert_eq!(scopes.depth(), 3);
    }

    #[test]
    fn define_shadows_and_pop_restores() {
        let mut scopes = ScopeStack::new();
        scopes.set_variable("a", Node::Number(1.0));

        scopes.push();
        scopes.define_variable("a", Node::Number(2.0));
        scopes.set_variable("a", Node::Number(3.0));
        assert_eq!(scopes.get_variable("a", 1).unwrap(), &Node::Number(3.0));
        scopes.pop();

        assert_eq!(scopes.get_variable("a", 1).unwrap(), &Node::Number(1.0));
    }

    #[test]
    fn global_frame_is_never_popped() {
        let mut scopes = ScopeStack::new();
        scopes.set_variable("a", Node::Boolean(true));
        scopes.pop();
        scopes.pop();

        assert_eq!(scopes.depth(), 1);
        assert_eq!(scopes.get_variable("a", 1).unwrap(), &Node::Boolean(true));
    }

    #[test]
    fn unbound_names_report_their_line() {
        let scopes = ScopeStack::new();

        assert!(matches!(scopes.get_variable("nope", 9),
                         Err(RuntimeError::UnboundVariable { line: 9, .. })));
        assert!(matches!(scopes.get_function("nope", 4),
                         Err(RuntimeError::UnboundFunction { line: 4, .. })));
    }
}
