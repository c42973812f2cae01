//! Output capture for template execution
//!
//! All text emitted while a template body runs is collected by an
//! [`OutputCapture`] owned by the render call. Capture scopes form a stack so
//! that re-entrant rendering (a template triggering another render) composes:
//! each scope sees only its own buffer, and unwinding an inner scope restores
//! the outer buffer exactly as it was.

/// A stack of capture buffers. The innermost buffer is the active emission
/// target.
#[derive(Debug, Default)]
pub struct OutputCapture {
    stack: Vec<String>,
}

impl OutputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open capture scopes
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Append text to the active buffer. Outside any capture scope this is a
    /// no-op.
    pub fn emit(&mut self, text: &str) {
        if let Some(buf) = self.stack.last_mut() {
            buf.push_str(text);
        }
    }

    /// Run `f` with a fresh buffer as the active emission target and return
    /// the text it accumulated.
    ///
    /// The buffer is popped on every exit path: if `f` fails, the error is
    /// propagated untouched and the enclosing scope is restored with its
    /// contents intact.
    pub fn capture<T, E>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<String, E> {
        self.stack.push(String::new());
        let result = f(self);
        let text = self.stack.pop().unwrap_or_default();
        result.map(|_| text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_collects_emitted_text() {
        let mut out = OutputCapture::new();
        let text = out
            .capture(|out| {
                out.emit("hello");
                out.emit(" world");
                Ok::<_, ()>(())
            })
            .unwrap();
        assert_eq!(text, "hello world");
        assert_eq!(out.depth(), 0);
    }

    #[test]
    fn test_nested_scopes_are_isolated() {
        let mut out = OutputCapture::new();
        let text = out
            .capture(|out| {
                out.emit("outer-before|");
                let inner = out.capture(|out| {
                    out.emit("inner");
                    Ok::<_, ()>(())
                })?;
                assert_eq!(inner, "inner");
                out.emit("outer-after");
                Ok::<_, ()>(())
            })
            .unwrap();
        // Inner text never reaches the outer buffer.
        assert_eq!(text, "outer-before|outer-after");
    }

    #[test]
    fn test_failing_scope_releases_buffer() {
        let mut out = OutputCapture::new();
        let result: Result<String, &str> = out.capture(|out| {
            out.emit("partial");
            Err::<(), _>("boom")
        });
        assert_eq!(result.unwrap_err(), "boom");
        assert_eq!(out.depth(), 0);
    }

    #[test]
    fn test_inner_failure_leaves_outer_intact() {
        let mut out = OutputCapture::new();
        let text = out
            .capture(|out| {
                out.emit("kept|");
                let inner: Result<String, &str> = out.capture(|out| {
                    out.emit("discarded");
                    Err::<(), _>("inner failure")
                });
                assert!(inner.is_err());
                out.emit("still-kept");
                Ok::<_, ()>(())
            })
            .unwrap();
        assert_eq!(text, "kept|still-kept");
    }

    #[test]
    fn test_emit_outside_scope_is_noop() {
        let mut out = OutputCapture::new();
        out.emit("lost");
        let text = out.capture(|_| Ok::<_, ()>(())).unwrap();
        assert_eq!(text, "");
    }
}
