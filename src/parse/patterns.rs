use std::sync::LazyLock;

use regex::Regex;

use crate::codegen::dialect::Dialect;
use crate::foundation::core::HexColor;
use crate::scene::model::{is_dotted_identifier, is_effect_name};

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern must compile")
}

const NUM: &str = r"[-+0-9.eE]+";
const IDENT: &str = r"[A-Za-z_][A-Za-z0-9_]*";
const HEX: &str = r"#[0-9A-Fa-f]{6}";

pub(crate) static SCENE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    re(&format!(
        r"(?m)^[ \t]*class\s+({IDENT})\s*\(\s*\w*Scene\s*\)\s*:"
    ))
});

static BACKGROUND_GL: LazyLock<Regex> = LazyLock::new(|| {
    re(&format!(
        r#"^self\.camera\.background_rgba\s*=\s*color_to_rgba\s*\(\s*"({HEX})"\s*\)"#
    ))
});
static BACKGROUND_CE: LazyLock<Regex> = LazyLock::new(|| {
    re(&format!(
        r#"^self\.camera\.background_color\s*=\s*"({HEX})""#
    ))
});
static OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    re(&format!(
        r#"^({IDENT})\s*=\s*(Tex|MathTex)\s*\(\s*r"([^"]*)"\s*\)"#
    ))
});
static COLOR: LazyLock<Regex> = LazyLock::new(|| {
    re(&format!(
        r#"^({IDENT})\.set_color\s*\(\s*"({HEX})"\s*\)"#
    ))
});
static SCALE: LazyLock<Regex> =
    LazyLock::new(|| re(&format!(r"^({IDENT})\.scale\s*\(\s*({NUM})\s*\)")));
static MOVE: LazyLock<Regex> = LazyLock::new(|| {
    re(&format!(
        r"^({IDENT})\.move_to\s*\(\s*(?:np\.array\s*\(\s*)?\[\s*({NUM})\s*,\s*({NUM})\s*(?:,\s*{NUM}\s*)?\]\s*\)?\s*\)"
    ))
});
static ADD: LazyLock<Regex> =
    LazyLock::new(|| re(&format!(r"^self\.add\s*\(\s*({IDENT})\s*\)")));
static WAIT: LazyLock<Regex> =
    LazyLock::new(|| re(&format!(r"^self\.wait\s*\(\s*({NUM})?\s*\)")));
static PLAY: LazyLock<Regex> = LazyLock::new(|| {
    re(&format!(
        r"^self\.play\s*\(\s*({IDENT})\s*\(\s*({IDENT})\s*\)((?:\s*,\s*\w+\s*=\s*[^,()]+)*)\s*\)"
    ))
});
static KWARG: LazyLock<Regex> = LazyLock::new(|| re(r"(\w+)\s*=\s*([^,()]+)"));

/// One recognized statement of a `construct` body.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Directive<'a> {
    Background {
        color: HexColor,
        dialect: Dialect,
    },
    Object {
        name: &'a str,
        content: &'a str,
        dialect: Dialect,
    },
    Color {
        name: &'a str,
        color: HexColor,
    },
    Scale {
        name: &'a str,
        factor: f64,
    },
    Move {
        name: &'a str,
        x: f64,
        y: f64,
    },
    Add {
        target: &'a str,
    },
    Wait {
        duration: Option<f64>,
    },
    Play {
        kind: &'a str,
        target: &'a str,
        duration: Option<f64>,
        easing: Option<&'a str>,
    },
}

/// Outcome of the first pattern that claimed a line.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum LineMatch<'a> {
    Directive(Directive<'a>),
    /// The pattern matched but an argument did not convert; the directive is dropped.
    Malformed(&'static str),
}

type Matcher = for<'a> fn(&'a str) -> Option<LineMatch<'a>>;

/// Matchers in precedence order. The first one that claims a line wins.
const MATCHERS: &[Matcher] = &[
    match_background,
    match_object,
    match_color,
    match_scale,
    match_move,
    match_add,
    match_wait,
    match_play,
];

/// Classify one trimmed line; `None` means no pattern recognized it.
pub(crate) fn classify(line: &str) -> Option<LineMatch<'_>> {
    MATCHERS.iter().find_map(|m| m(line))
}

fn number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn hex(s: &str) -> Option<HexColor> {
    HexColor::parse(s).ok()
}

fn match_background(line: &str) -> Option<LineMatch<'_>> {
    let (caps, dialect) = BACKGROUND_GL
        .captures(line)
        .map(|c| (c, Dialect::ManimGl))
        .or_else(|| BACKGROUND_CE.captures(line).map(|c| (c, Dialect::ManimCe)))?;
    Some(match hex(&caps[1]) {
        Some(color) => LineMatch::Directive(Directive::Background { color, dialect }),
        None => LineMatch::Malformed("background"),
    })
}

fn match_object(line: &str) -> Option<LineMatch<'_>> {
    let caps = OBJECT.captures(line)?;
    let name = caps.get(1)?.as_str();
    let dialect = if &caps[2] == Dialect::ManimCe.math_tex_ctor() {
        Dialect::ManimCe
    } else {
        Dialect::ManimGl
    };
    let content = caps.get(3)?.as_str();
    Some(LineMatch::Directive(Directive::Object {
        name,
        content,
        dialect,
    }))
}

fn match_color(line: &str) -> Option<LineMatch<'_>> {
    let caps = COLOR.captures(line)?;
    let name = caps.get(1)?.as_str();
    Some(match hex(&caps[2]) {
        Some(color) => LineMatch::Directive(Directive::Color { name, color }),
        None => LineMatch::Malformed("color"),
    })
}

fn match_scale(line: &str) -> Option<LineMatch<'_>> {
    let caps = SCALE.captures(line)?;
    let name = caps.get(1)?.as_str();
    Some(match number(&caps[2]).filter(|f| *f > 0.0) {
        Some(factor) => LineMatch::Directive(Directive::Scale { name, factor }),
        None => LineMatch::Malformed("scale"),
    })
}

fn match_move(line: &str) -> Option<LineMatch<'_>> {
    let caps = MOVE.captures(line)?;
    let name = caps.get(1)?.as_str();
    Some(match (number(&caps[2]), number(&caps[3])) {
        (Some(x), Some(y)) => LineMatch::Directive(Directive::Move { name, x, y }),
        _ => LineMatch::Malformed("move_to"),
    })
}

fn match_add(line: &str) -> Option<LineMatch<'_>> {
    let caps = ADD.captures(line)?;
    let target = caps.get(1)?.as_str();
    Some(LineMatch::Directive(Directive::Add { target }))
}

fn match_wait(line: &str) -> Option<LineMatch<'_>> {
    let caps = WAIT.captures(line)?;
    let duration = match caps.get(1) {
        None => None,
        Some(m) => match number(m.as_str()).filter(|d| *d >= 0.0) {
            Some(d) => Some(d),
            None => return Some(LineMatch::Malformed("wait")),
        },
    };
    Some(LineMatch::Directive(Directive::Wait { duration }))
}

fn match_play(line: &str) -> Option<LineMatch<'_>> {
    let caps = PLAY.captures(line)?;
    let kind = caps.get(1)?.as_str();
    let target = caps.get(2)?.as_str();
    if !is_effect_name(kind) {
        return Some(LineMatch::Malformed("play"));
    }

    let mut duration = None;
    let mut easing = None;
    let kwargs = caps.get(3).map_or("", |m| m.as_str());
    for kw in KWARG.captures_iter(kwargs) {
        let (Some(key), Some(value)) = (kw.get(1), kw.get(2)) else {
            continue;
        };
        let value = value.as_str().trim();
        match key.as_str() {
            "run_time" => match number(value).filter(|d| *d >= 0.0) {
                Some(d) => duration = Some(d),
                None => return Some(LineMatch::Malformed("play")),
            },
            "rate_func" if is_dotted_identifier(value) => easing = Some(value),
            "rate_func" => return Some(LineMatch::Malformed("play")),
            _ => {}
        }
    }

    Some(LineMatch::Directive(Directive::Play {
        kind,
        target,
        duration,
        easing,
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/parse/patterns.rs"]
mod tests;
