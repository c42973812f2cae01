//! Nesting and re-entrancy properties of output capture

use std::sync::Arc;

use pretty_assertions::assert_eq;

use stencil::{
    FunctionError, FunctionRegistry, MapContext, OutputCapture, Template, Value,
};

#[test]
fn test_nested_capture_does_not_leak_inward_or_outward() {
    let mut out = OutputCapture::new();
    let outer = out
        .capture(|out| {
            out.emit("A");
            let inner = out.capture(|out| {
                out.emit("B");
                Ok::<_, ()>(())
            })?;
            assert_eq!(inner, "B");
            out.emit("C");
            Ok::<_, ()>(())
        })
        .unwrap();
    assert_eq!(outer, "AC");
}

#[test]
fn test_unwinding_inner_scope_restores_outer_exactly() {
    let mut out = OutputCapture::new();
    let outer = out
        .capture(|out| {
            out.emit("before");
            let inner: Result<String, &str> = out.capture(|out| {
                out.emit("doomed");
                Err::<(), _>("inner fault")
            });
            assert!(inner.is_err());
            assert_eq!(out.depth(), 1);
            out.emit("|after");
            Ok::<_, ()>(())
        })
        .unwrap();
    assert_eq!(outer, "before|after");
}

#[test]
fn test_deeply_nested_captures() {
    let mut out = OutputCapture::new();
    let text = out
        .capture(|out| {
            out.emit("1");
            let level2 = out.capture(|out| {
                out.emit("2");
                let level3 = out.capture(|out| {
                    out.emit("3");
                    Ok::<_, ()>(())
                })?;
                assert_eq!(level3, "3");
                Ok::<_, ()>(())
            })?;
            assert_eq!(level2, "2");
            Ok::<_, ()>(())
        })
        .unwrap();
    assert_eq!(text, "1");
}

#[test]
fn test_reentrant_render_through_custom_function() {
    // A template triggering another template's render mid-execution: the
    // nested render owns its own capture stack, so neither output stream
    // bleeds into the other.
    let inner = Arc::new(Template::inline("inner", "[{{ output(x) }}]").with_var("x", "nested"));
    let ctx = Arc::new(MapContext::new());

    let functions = FunctionRegistry::new().with("render_inner", {
        let inner = Arc::clone(&inner);
        let ctx = Arc::clone(&ctx);
        move |_args: &[Value]| {
            inner
                .render(ctx.as_ref())
                .map(Value::String)
                .map_err(|e| FunctionError::Failed {
                    message: e.to_string(),
                })
        }
    });

    let outer = Template::inline("outer", r#"a {{ custom("render_inner") }} b"#)
        .with_functions(functions);
    assert_eq!(outer.render(&MapContext::new()).unwrap(), "a [nested] b");
}

#[test]
fn test_reentrant_render_failure_leaves_outer_output_clean() {
    let inner = Arc::new(Template::inline("inner", "{{ output(ghost) }}"));
    let ctx = Arc::new(MapContext::new());

    let functions = FunctionRegistry::new().with("render_inner", {
        let inner = Arc::clone(&inner);
        let ctx = Arc::clone(&ctx);
        move |_args: &[Value]| {
            // Recover from the nested failure so the outer render continues.
            match inner.render(ctx.as_ref()) {
                Ok(text) => Ok(Value::String(text)),
                Err(_) => Ok(Value::String("<failed>".to_string())),
            }
        }
    });

    let outer = Template::inline("outer", r#"x{{ custom("render_inner") }}y"#)
        .with_functions(functions);
    assert_eq!(outer.render(&MapContext::new()).unwrap(), "x<failed>y");
}
