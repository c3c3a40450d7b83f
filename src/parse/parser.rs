use indexmap::IndexMap;

use crate::{
    codegen::dialect::{Dialect, canonical_effect_name},
    foundation::core::{
        DEFAULT_DURATION, DEFAULT_EASING, DEFAULT_FONT_SIZE, HexColor, MIN_FONT_SIZE, Point,
    },
    parse::patterns::{Directive, LineMatch, SCENE_CLASS, classify},
    scene::model::AnimationStep,
};

/// An object declaration recovered from source.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedObject {
    pub name: String,
    pub content: String,
    pub color: HexColor,
    pub font_size: u32,
    /// Scene-space position (Y up), as written in the `move_to` directive.
    pub position: Point,
}

impl ParsedObject {
    fn new(name: &str, content: &str) -> Self {
        Self {
            name: name.to_owned(),
            content: content.to_owned(),
            color: HexColor::WHITE,
            font_size: DEFAULT_FONT_SIZE,
            position: Point::ORIGIN,
        }
    }
}

/// One scene recovered from source; independent of any live [`Scene`](crate::Scene).
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedScene {
    pub name: String,
    pub background: HexColor,
    /// Declaration order.
    pub objects: Vec<ParsedObject>,
    /// Statement order, kinds in canonical vocabulary.
    pub steps: Vec<AnimationStep>,
    /// Dialect implied by the first dialect-specific construct seen, if any.
    pub dialect: Option<Dialect>,
}

impl ParsedScene {
    pub fn object(&self, name: &str) -> Option<&ParsedObject> {
        self.objects.iter().find(|o| o.name == name)
    }
}

/// Parse script text into one description per scene class.
///
/// Returns `None` when the text has no scene class at all. Never fails otherwise: lines no
/// pattern recognizes, directives with bad numbers, and directives naming undeclared objects
/// are dropped.
#[tracing::instrument(skip(code), fields(len = code.len()))]
pub fn parse_code(code: &str) -> Option<Vec<ParsedScene>> {
    let headers: Vec<(usize, usize, &str)> = SCENE_CLASS
        .captures_iter(code)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some((whole.start(), whole.end(), name.as_str()))
        })
        .collect();
    if headers.is_empty() {
        tracing::debug!("no scene class found");
        return None;
    }

    let scenes = headers
        .iter()
        .enumerate()
        .map(|(i, &(_, body_start, name))| {
            let body_end = headers.get(i + 1).map_or(code.len(), |next| next.0);
            parse_scene_block(name, &code[body_start..body_end])
        })
        .collect();
    Some(scenes)
}

fn parse_scene_block(name: &str, block: &str) -> ParsedScene {
    let mut background = HexColor::BLACK;
    let mut dialect = None;
    let mut objects: IndexMap<&str, ParsedObject> = IndexMap::new();
    let mut steps = Vec::new();

    for (line_no, raw) in block.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let directive = match classify(line) {
            Some(LineMatch::Directive(d)) => d,
            Some(LineMatch::Malformed(pattern)) => {
                tracing::trace!(scene = name, line_no, pattern, "dropping malformed directive");
                continue;
            }
            None => continue,
        };

        match directive {
            Directive::Background { color, dialect: d } => {
                background = color;
                dialect = dialect.or(Some(d));
            }
            Directive::Object {
                name: obj,
                content,
                dialect: d,
            } => {
                objects.insert(obj, ParsedObject::new(obj, content));
                dialect = dialect.or(Some(d));
            }
            Directive::Color { name: obj, color } => {
                if let Some(o) = declared(&mut objects, obj, name) {
                    o.color = color;
                }
            }
            Directive::Scale { name: obj, factor } => {
                if let Some(o) = declared(&mut objects, obj, name) {
                    o.font_size = font_size_from_scale(factor);
                }
            }
            Directive::Move { name: obj, x, y } => {
                if let Some(o) = declared(&mut objects, obj, name) {
                    o.position = Point::new(x, y);
                }
            }
            Directive::Add { target } => steps.push(AnimationStep::add(target)),
            Directive::Wait { duration } => {
                steps.push(AnimationStep::wait(duration.unwrap_or(DEFAULT_DURATION)));
            }
            Directive::Play {
                kind,
                target,
                duration,
                easing,
            } => {
                let canonical = canonical_effect_name(kind);
                if canonical != kind {
                    dialect = dialect.or(Some(Dialect::ManimCe));
                }
                steps.push(
                    AnimationStep::effect(canonical, target)
                        .with_duration(duration.unwrap_or(DEFAULT_DURATION))
                        .with_easing(easing.unwrap_or(DEFAULT_EASING)),
                );
            }
        }
    }

    ParsedScene {
        name: name.to_owned(),
        background,
        objects: objects.into_values().collect(),
        steps,
        dialect,
    }
}

fn declared<'m>(
    objects: &'m mut IndexMap<&str, ParsedObject>,
    name: &str,
    scene: &str,
) -> Option<&'m mut ParsedObject> {
    let found = objects.get_mut(name);
    if found.is_none() {
        tracing::trace!(scene, object = name, "directive names an undeclared object");
    }
    found
}

fn font_size_from_scale(factor: f64) -> u32 {
    let size = (factor * f64::from(DEFAULT_FONT_SIZE)).round();
    if size < f64::from(MIN_FONT_SIZE) {
        MIN_FONT_SIZE
    } else if size > f64::from(u32::MAX) {
        u32::MAX
    } else {
        size as u32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parse/parser.rs"]
mod tests;
