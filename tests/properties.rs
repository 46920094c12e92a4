//! Property-based tests for compilation and viewport math

mod common;

use equation_grapher::{
    equation::{compile, CompileErr},
    viewport::{Viewport, DEFAULT_ZOOM, ZOOM_IN_FACTOR},
    Number, Point,
};
use proptest::prelude::*;

/// Random well-formed expressions over the accepted grammar.
fn expr() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        Just("x".to_string()),
        Just("pi".to_string()),
        Just("e".to_string()),
        (0u32..1000).prop_map(|n| n.to_string()),
        (0u32..100, 1u32..100).prop_map(|(a, b)| format!("{a}.{b}")),
    ];
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(vec!["+", "-", "*", "/", "^"]), inner.clone())
                .prop_map(|(a, op, b)| format!("({a}) {op} ({b})")),
            (
                prop::sample::select(vec!["sin", "cos", "tan", "exp", "sqrt", "abs"]),
                inner.clone()
            )
                .prop_map(|(f, a)| format!("{f}({a})")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("pow({a}, {b})")),
            inner.prop_map(|a| format!("-{a}")),
        ]
    })
}

proptest! {
    #[test]
    fn explicit_form_matches_bare_expression(
        body in expr(),
        xs in prop::collection::vec(-50.0f64..50.0, 1..8)
    ) {
        let bare = compile(&body);
        prop_assume!(bare.is_ok());
        let bare = bare.unwrap();
        let lhs = compile(&format!("y = {body}")).unwrap();
        let rhs = compile(&format!("{body} = y")).unwrap();
        for x in xs {
            let want = bare.eval(x);
            prop_assert_eq!(lhs.eval(x), want);
            prop_assert_eq!(rhs.eval(x), want);
        }
    }

    #[test]
    fn no_variable_means_no_function(text in "[0-9+*/() .^-]{0,24}|(sin|cos|exp|pi|e)\\([0-9]{1,3}\\)") {
        prop_assert_eq!(compile(&text), Err(CompileErr::NoFreeVariable));
    }

    #[test]
    fn zoom_in_is_geometric(ticks in 0i32..150) {
        let mut vp = Viewport::new(800.0, 600.0);
        for _ in 0..ticks {
            vp.zoom_in();
        }
        let want = DEFAULT_ZOOM * ZOOM_IN_FACTOR.powi(ticks);
        prop_assert!(vp.zoom() > 0.0);
        prop_assert!((vp.zoom() - want).abs() <= want * 1e-9);
    }

    #[test]
    fn screen_round_trip(
        width in 100.0f64..3000.0,
        height in 100.0f64..3000.0,
        pan in (-2000.0f64..2000.0, -2000.0f64..2000.0),
        zoom_ticks in -40i32..40,
        frac in (0.0f64..1.0, 0.0f64..1.0),
    ) {
        let mut vp = Viewport::new(width, height);
        for _ in 0..zoom_ticks.abs() {
            if zoom_ticks > 0 { vp.zoom_in() } else { vp.zoom_out() }
        }
        vp.pan(pan.0, pan.1);

        let win = vp.bounds();
        let p = Point::new(
            win.x.start + frac.0 * (win.x.end - win.x.start),
            win.y.start + frac.1 * (win.y.end - win.y.start),
        );
        let back = vp.to_world(vp.to_screen(p));
        let tol: Number = vp.zoom() * 1e-9;
        prop_assert!((back.x - p.x).abs() <= tol, "{:?} vs {:?}", back, p);
        prop_assert!((back.y - p.y).abs() <= tol, "{:?} vs {:?}", back, p);
    }
}
