use super::*;
use crate::scene::model::StepKind;

const GL_SCRIPT: &str = r##"from manimlib import *


class ComposedScene(Scene):
    def construct(self):
        self.camera.background_rgba = color_to_rgba("#112233")

        eq_1 = Tex(r"F=ma")
        eq_1.set_color("#ff0000")
        eq_1.scale(1.5)
        eq_1.move_to(np.array([1.50, -2.00, 0]))
        eq_2 = Tex(r"E=mc^2")
        self.add(eq_1)
        self.wait(2.0)
        self.play(Write(eq_2), run_time=0.5, rate_func=linear)
        self.play(ShowCreation(eq_1))
"##;

#[test]
fn no_scene_class_means_none() {
    assert!(parse_code("").is_none());
    assert!(parse_code("eq_1 = Tex(r\"x\")\nself.play(Write(eq_1))\n").is_none());
    assert!(parse_code("def construct(self):\n    pass\n").is_none());
}

#[test]
fn parses_full_gl_script() {
    let scenes = parse_code(GL_SCRIPT).unwrap();
    assert_eq!(scenes.len(), 1);
    let scene = &scenes[0];
    assert_eq!(scene.name, "ComposedScene");
    assert_eq!(scene.background, HexColor::rgb(0x11, 0x22, 0x33));
    assert_eq!(scene.dialect, Some(Dialect::ManimGl));

    let eq_1 = scene.object("eq_1").unwrap();
    assert_eq!(eq_1.content, "F=ma");
    assert_eq!(eq_1.color, HexColor::rgb(0xFF, 0, 0));
    assert_eq!(eq_1.font_size, 72);
    assert_eq!(eq_1.position, Point::new(1.5, -2.0));

    let eq_2 = scene.object("eq_2").unwrap();
    assert_eq!(eq_2.color, HexColor::WHITE);
    assert_eq!(eq_2.font_size, 48);

    let kinds: Vec<&str> = scene.steps.iter().map(|s| s.kind.name()).collect();
    assert_eq!(kinds, ["Add", "Wait", "Write", "ShowCreation"]);
    assert_eq!(scene.steps[1].duration, 2.0);
    assert_eq!(scene.steps[2].duration, 0.5);
    assert_eq!(scene.steps[2].easing, "linear");
    assert_eq!(scene.steps[3].duration, 1.0);
    assert_eq!(scene.steps[3].easing, "smooth");
}

#[test]
fn community_names_are_canonicalized() {
    let code = "class S(Scene):\n    def construct(self):\n        a = MathTex(r\"x\")\n        self.play(Create(a))\n";
    let scene = &parse_code(code).unwrap()[0];
    assert_eq!(scene.steps[0].kind, StepKind::Effect("ShowCreation".into()));
    assert_eq!(scene.dialect, Some(Dialect::ManimCe));
}

#[test]
fn splits_blocks_per_scene_class() {
    let code = "class A(Scene):\n    def construct(self):\n        a = Tex(r\"a\")\n\n\
class B(Scene):\n    def construct(self):\n        b = Tex(r\"b\")\n        self.add(b)\n";
    let scenes = parse_code(code).unwrap();
    assert_eq!(scenes.len(), 2);
    assert_eq!(scenes[0].name, "A");
    assert_eq!(scenes[0].objects.len(), 1);
    assert!(scenes[0].steps.is_empty());
    assert_eq!(scenes[1].name, "B");
    assert_eq!(scenes[1].objects[0].name, "b");
    assert_eq!(scenes[1].steps.len(), 1);
}

#[test]
fn directives_before_declaration_are_dropped() {
    let code = "class S(Scene):\n    def construct(self):\n\
        a.set_color(\"#00FF00\")\n\
        a.move_to(np.array([1.0, 1.0, 0]))\n\
        a = Tex(r\"x\")\n\
        ghost.scale(2)\n";
    let scene = &parse_code(code).unwrap()[0];
    assert_eq!(scene.objects.len(), 1);
    assert_eq!(scene.objects[0].color, HexColor::WHITE);
    assert_eq!(scene.objects[0].position, Point::ORIGIN);
}

#[test]
fn malformed_directives_skip_only_themselves() {
    let code = "class S(Scene):\n    def construct(self):\n\
        a = Tex(r\"x\")\n\
        a.scale(1..5)\n\
        a.set_color(\"#0000FF\")\n\
        self.wait(1.2.3)\n\
        self.play(FadeIn(a), run_time=oops)\n\
        self.play(FadeOut(a))\n";
    let scene = &parse_code(code).unwrap()[0];
    assert_eq!(scene.objects[0].font_size, 48);
    assert_eq!(scene.objects[0].color, HexColor::rgb(0, 0, 0xFF));
    let kinds: Vec<&str> = scene.steps.iter().map(|s| s.kind.name()).collect();
    assert_eq!(kinds, ["FadeOut"]);
}

#[test]
fn last_background_wins_and_comments_are_ignored() {
    let code = "class S(Scene):\n    def construct(self):\n\
        self.camera.background_color = \"#111111\"\n\
        # a = Tex(r\"commented\")\n\
        self.camera.background_rgba = color_to_rgba(\"#222222\")\n\
        print(\"noise\")\n";
    let scene = &parse_code(code).unwrap()[0];
    assert_eq!(scene.background, HexColor::rgb(0x22, 0x22, 0x22));
    assert!(scene.objects.is_empty());
    assert_eq!(scene.dialect, Some(Dialect::ManimCe));
}

#[test]
fn redeclaration_keeps_position_in_order_and_resets_properties() {
    let code = "class S(Scene):\n    def construct(self):\n\
        a = Tex(r\"1\")\n\
        a.scale(2)\n\
        b = Tex(r\"2\")\n\
        a = Tex(r\"3\")\n";
    let scene = &parse_code(code).unwrap()[0];
    let names: Vec<&str> = scene.objects.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(scene.objects[0].content, "3");
    assert_eq!(scene.objects[0].font_size, 48);
}

#[test]
fn tiny_scale_is_clamped() {
    let code = "class S(Scene):\n    def construct(self):\n        a = Tex(r\"x\")\n        a.scale(0.01)\n";
    let scene = &parse_code(code).unwrap()[0];
    assert_eq!(scene.objects[0].font_size, MIN_FONT_SIZE);
}
