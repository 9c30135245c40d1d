//! Value stack

/// LIFO stack of integers.
///
/// Popping an empty stack yields zero; this is part of the language, not an
/// error condition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    values: Vec<i64>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: i64) {
        self.values.push(value);
    }

    pub fn pop(&mut self) -> i64 {
        self.values.pop().unwrap_or(0)
    }

    /// Pop `a` then `b`, returning them in that order.
    pub fn pop2(&mut self) -> (i64, i64) {
        let a = self.pop();
        let b = self.pop();
        (a, b)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values bottom to top.
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }
}
