use super::*;

fn directive(line: &str) -> Directive<'_> {
    match classify(line) {
        Some(LineMatch::Directive(d)) => d,
        other => panic!("expected a directive for {line:?}, got {other:?}"),
    }
}

#[test]
fn recognizes_both_background_shapes() {
    assert_eq!(
        directive("self.camera.background_rgba = color_to_rgba(\"#102030\")"),
        Directive::Background {
            color: HexColor::rgb(0x10, 0x20, 0x30),
            dialect: Dialect::ManimGl,
        }
    );
    assert_eq!(
        directive("self.camera.background_color = \"#a0b0c0\""),
        Directive::Background {
            color: HexColor::rgb(0xA0, 0xB0, 0xC0),
            dialect: Dialect::ManimCe,
        }
    );
}

#[test]
fn recognizes_object_constructors() {
    assert_eq!(
        directive("eq_1 = Tex(r\"\\frac{a}{b}\")"),
        Directive::Object {
            name: "eq_1",
            content: "\\frac{a}{b}",
            dialect: Dialect::ManimGl,
        }
    );
    assert_eq!(
        directive("title=MathTex( r\"x\" )"),
        Directive::Object {
            name: "title",
            content: "x",
            dialect: Dialect::ManimCe,
        }
    );
    assert!(classify("eq_1 = Text(\"x\")").is_none());
}

#[test]
fn recognizes_property_directives() {
    assert_eq!(
        directive("eq_1.scale(1.5)"),
        Directive::Scale {
            name: "eq_1",
            factor: 1.5
        }
    );
    assert_eq!(
        directive("eq_1.move_to(np.array([1.50, -2.00, 0]))"),
        Directive::Move {
            name: "eq_1",
            x: 1.5,
            y: -2.0
        }
    );
    assert_eq!(
        directive("eq_1.move_to([3, 4, 0])"),
        Directive::Move {
            name: "eq_1",
            x: 3.0,
            y: 4.0
        }
    );
}

#[test]
fn play_kwargs_in_any_order() {
    assert_eq!(
        directive("self.play(FadeIn(eq_1), rate_func=linear, run_time=2.5)"),
        Directive::Play {
            kind: "FadeIn",
            target: "eq_1",
            duration: Some(2.5),
            easing: Some("linear"),
        }
    );
    assert_eq!(
        directive("self.play(Write(eq_1))"),
        Directive::Play {
            kind: "Write",
            target: "eq_1",
            duration: None,
            easing: None,
        }
    );
}

#[test]
fn bad_numbers_are_malformed_not_fatal() {
    assert_eq!(
        classify("eq_1.scale(1.2.3)"),
        Some(LineMatch::Malformed("scale"))
    );
    assert_eq!(classify("self.wait(..)"), Some(LineMatch::Malformed("wait")));
    assert_eq!(
        classify("self.play(Write(eq_1), run_time=abc)"),
        Some(LineMatch::Malformed("play"))
    );
    assert_eq!(
        classify("eq_1.move_to(np.array([1e, 2, 0]))"),
        Some(LineMatch::Malformed("move_to"))
    );
}

#[test]
fn unrelated_lines_are_unrecognized() {
    for line in ["", "pass", "print('hi')", "def construct(self):", "x = 5"] {
        assert!(classify(line).is_none(), "{line:?}");
    }
}

#[test]
fn scene_class_marker_requires_line_start() {
    let code = "class A(Scene):\n    pass\n# class B(Scene):\nclass C(InteractiveScene):\n";
    let names: Vec<&str> = SCENE_CLASS
        .captures_iter(code)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();
    assert_eq!(names, ["A", "C"]);
}

#[test]
fn play_rejects_reserved_kinds_and_expression_easings() {
    for line in [
        "self.play(Wait(eq_1))",
        "self.play(Add(eq_1))",
        "self.play(FadeIn(eq_1), rate_func=lambda t: t)",
        "self.play(FadeIn(eq_1), rate_func=there and back)",
    ] {
        assert_eq!(classify(line), Some(LineMatch::Malformed("play")), "{line:?}");
    }
    assert_eq!(
        directive("self.play(FadeIn(eq_1), rate_func=rate_functions.there_and_back)"),
        Directive::Play {
            kind: "FadeIn",
            target: "eq_1",
            duration: None,
            easing: Some("rate_functions.there_and_back"),
        }
    );
}
