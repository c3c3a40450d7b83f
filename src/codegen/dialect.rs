use crate::foundation::core::HexColor;

/// Target flavour of the generated script.
///
/// Both dialects share one structure and differ only in a handful of names, which this type owns.
/// ManimGL names are canonical: the scene model always stores them.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// 3b1b's `manimlib` (the live preview engine).
    #[default]
    ManimGl,
    /// Manim Community Edition.
    ManimCe,
}

/// Canonical effect names and their Manim Community spelling.
const EFFECT_RENAMES: &[(&str, &str)] = &[("ShowCreation", "Create")];

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::ManimGl, Dialect::ManimCe];

    pub fn label(self) -> &'static str {
        match self {
            Self::ManimGl => "ManimGL",
            Self::ManimCe => "Manim Community",
        }
    }

    pub fn import_line(self) -> &'static str {
        match self {
            Self::ManimGl => "from manimlib import *",
            Self::ManimCe => "from manim import *",
        }
    }

    /// Constructor of math-expression objects.
    pub fn math_tex_ctor(self) -> &'static str {
        match self {
            Self::ManimGl => "Tex",
            Self::ManimCe => "MathTex",
        }
    }

    /// Statement that sets the camera background.
    pub fn background_directive(self, color: HexColor) -> String {
        match self {
            Self::ManimGl => format!("self.camera.background_rgba = color_to_rgba(\"{color}\")"),
            Self::ManimCe => format!("self.camera.background_color = \"{color}\""),
        }
    }

    /// Spelling of a canonical effect name in this dialect.
    pub fn effect_name(self, canonical: &str) -> &str {
        match self {
            Self::ManimGl => canonical,
            Self::ManimCe => EFFECT_RENAMES
                .iter()
                .find(|(gl, _)| *gl == canonical)
                .map_or(canonical, |&(_, ce)| ce),
        }
    }
}

/// Map an effect name written in either dialect back to its canonical spelling.
pub fn canonical_effect_name(name: &str) -> &str {
    EFFECT_RENAMES
        .iter()
        .find(|(_, ce)| *ce == name)
        .map_or(name, |&(gl, _)| gl)
}

/// Effect names that are spelled differently per dialect, as `(canonical, community)` pairs.
pub fn effect_renames() -> &'static [(&'static str, &'static str)] {
    EFFECT_RENAMES
}

#[cfg(test)]
#[path = "../../tests/unit/codegen/dialect.rs"]
mod tests;
