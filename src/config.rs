//! Declarative description of a bake job: which font files to load, which
//! render tasks to run over them, and (optionally) which candidate atlas
//! sizes to try.
//!
//! This is a convenience layer on top of the pure packing core — nothing
//! outside this module touches the filesystem or constructs a `GlyphSource`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::charset::{CharSet, CharsetInput};
use crate::error::BakeError;
use crate::font::{Font, GlyphSource};
use crate::pack::CandidateSizes;
use crate::render::TaskSpec;

/// A bake job, as loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BakeManifest {
    pub fonts: Vec<FontEntry>,
    pub tasks: Vec<TaskEntry>,
    pub candidate_sizes: Option<CandidateSizeConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FontEntry {
    /// The name render tasks refer to this font by, and the generic name
    /// written into the font table.
    pub name: String,
    pub path: PathBuf,
}

/// One render task, as named-font-reference plus a charset built from
/// whichever of `text` / `code_points` / `ranges` are present (unioned).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaskEntry {
    pub font: String,
    pub size: f64,
    pub antialias: bool,
    pub text: Option<String>,
    pub code_points: Vec<u32>,
    pub ranges: Vec<(u32, u32)>,
}

impl TaskEntry {
    fn charset(&self) -> Result<CharSet, BakeError> {
        let mut inputs = Vec::new();
        if let Some(text) = &self.text {
            inputs.push(CharsetInput::from(text.clone()));
        }
        inputs.extend(self.code_points.iter().copied().map(CharsetInput::from));
        inputs.extend(
            self.ranges
                .iter()
                .map(|&(a, b)| CharsetInput::Range(crate::charset::RangeEndpoint::CodePoint(a), crate::charset::RangeEndpoint::CodePoint(b))),
        );
        CharSet::new(inputs)
    }
}

/// Overrides the default doubling `64..=32768` candidate size sequence.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CandidateSizeConfig {
    pub start: u32,
    pub max: u32,
}

impl From<CandidateSizeConfig> for CandidateSizes {
    fn from(cfg: CandidateSizeConfig) -> Self {
        CandidateSizes::new(cfg.start, cfg.max)
    }
}

impl BakeManifest {
    /// Parse a manifest from a TOML document.
    pub fn parse(toml_source: &str) -> Result<Self, BakeError> {
        Ok(toml::from_str(toml_source)?)
    }

    /// Load every font named in `self.fonts` via `make_face`, and resolve
    /// every task's charset. `make_face` is the caller-supplied seam into a
    /// concrete `GlyphSource` (typically `FreeTypeFace::from_path`), kept
    /// out of this module so it stays testable without real font files.
    pub fn resolve(
        &self,
        mut make_face: impl FnMut(&Path) -> Result<Box<dyn GlyphSource>, BakeError>,
    ) -> Result<(Vec<Font>, Vec<TaskSpec>), BakeError> {
        let fonts = self
            .fonts
            .iter()
            .map(|entry| Font::new(entry.name.clone(), make_face(&entry.path)?))
            .collect::<Result<Vec<_>, BakeError>>()?;

        let tasks = self
            .tasks
            .iter()
            .map(|entry| {
                Ok(TaskSpec {
                    font_name: entry.font.clone(),
                    size: entry.size,
                    antialias: entry.antialias,
                    charset: entry.charset()?,
                })
            })
            .collect::<Result<Vec<_>, BakeError>>()?;

        Ok((fonts, tasks))
    }

    /// The candidate size sequence this manifest specifies, or the default.
    pub fn candidate_sizes(&self) -> CandidateSizes {
        self.candidate_sizes.map(CandidateSizes::from).unwrap_or_default()
    }
}
