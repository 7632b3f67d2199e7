//! Keyword dictionary grouping frames into buckets.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::categories::Bucket;
use crate::error::{DiscourseError, Result};

/// A named keyword frame (subcategory) belonging to one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Frame label, also used as the column name in the augmented table.
    pub name: String,
    /// Bucket the frame's counts roll up into.
    pub bucket: Bucket,
    /// Keywords or multi-word phrases, in declaration order.
    pub keywords: Vec<String>,
}

impl Frame {
    /// Create a new frame.
    pub fn new<I, S>(name: impl Into<String>, bucket: Bucket, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            bucket,
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

/// On-disk layout of a lexicon file.
#[derive(Debug, Deserialize)]
struct LexiconFile {
    #[serde(default, rename = "frame")]
    frames: Vec<Frame>,
}

/// Immutable, validated keyword dictionary.
///
/// Construct with [`Lexicon::new`] (or one of the loaders) and pass it to
/// a [`Categorizer`](super::Categorizer). Validation guarantees:
/// - frame names are unique and non-empty
/// - each frame has at least one keyword
/// - no keyword (compared lowercased) is declared by two frames
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lexicon {
    frames: Vec<Frame>,
}

impl Lexicon {
    /// Build a lexicon, rejecting frames that break the dictionary invariants.
    pub fn new(frames: Vec<Frame>) -> Result<Self> {
        let mut names = HashSet::new();
        let mut owners: HashMap<String, &str> = HashMap::new();

        for frame in &frames {
            if frame.name.trim().is_empty() {
                return Err(DiscourseError::InvalidLexicon(
                    "frame name must not be empty".to_string(),
                ));
            }
            if !names.insert(frame.name.as_str()) {
                return Err(DiscourseError::InvalidLexicon(format!(
                    "frame '{}' is declared more than once",
                    frame.name
                )));
            }
            if frame.keywords.is_empty() {
                return Err(DiscourseError::InvalidLexicon(format!(
                    "frame '{}' has no keywords",
                    frame.name
                )));
            }
            for keyword in &frame.keywords {
                let normalized = normalize_keyword(keyword);
                if normalized.is_empty() {
                    return Err(DiscourseError::InvalidLexicon(format!(
                        "frame '{}' contains a blank keyword",
                        frame.name
                    )));
                }
                if let Some(owner) = owners.insert(normalized, frame.name.as_str()) {
                    return Err(DiscourseError::InvalidLexicon(format!(
                        "keyword '{}' appears in both '{owner}' and '{}'",
                        keyword.trim(),
                        frame.name
                    )));
                }
            }
        }

        Ok(Self { frames })
    }

    /// Parse a lexicon from TOML text (`[[frame]]` tables).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: LexiconFile = toml::from_str(content)?;
        Self::new(file.frames)
    }

    /// Load a lexicon from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DiscourseError::io(path, e))?;
        let lexicon = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            frames = lexicon.frames.len(),
            "Loaded lexicon"
        );
        Ok(lexicon)
    }

    /// All frames in declaration order.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frames belonging to a bucket, in declaration order.
    pub fn frames_in(&self, bucket: Bucket) -> impl Iterator<Item = &Frame> {
        self.frames.iter().filter(move |f| f.bucket == bucket)
    }

    /// Look up a frame by name.
    #[must_use]
    pub fn frame(&self, name: &str) -> Option<&Frame> {
        self.frames.iter().find(|f| f.name == name)
    }

    /// Total number of keywords across all frames.
    #[must_use]
    pub fn keyword_count(&self) -> usize {
        self.frames.iter().map(|f| f.keywords.len()).sum()
    }

    /// The Spanish-language dictionary used for the Argentine corpus.
    #[must_use]
    pub fn spanish_default() -> Self {
        let frames = vec![
            Frame::new(
                "la_casta",
                Bucket::Enemy,
                [
                    "casta",
                    "políticos",
                    "corruptos",
                    "privilegiados",
                    "parásitos",
                    "degenerados fiscales",
                    "clase política",
                    "establishment",
                ],
            ),
            Frame::new(
                "kirchnerismo",
                Bucket::Enemy,
                [
                    "kirchnerismo",
                    "kirchneristas",
                    "cristina",
                    "cfk",
                    "fernández",
                    "kicillof",
                    "massa",
                    "máximo",
                    "peronismo",
                ],
            ),
            Frame::new(
                "state_apparatus",
                Bucket::Enemy,
                [
                    "estado",
                    "funcionarios",
                    "ñoquis",
                    "empleados públicos",
                    "burocracia",
                    "ministerios",
                    "banco central",
                    "bcra",
                    "afip",
                ],
            ),
            Frame::new(
                "progressives",
                Bucket::Enemy,
                [
                    "feminismo",
                    "feministas",
                    "progresismo",
                    "zurdos",
                    "izquierda",
                    "socialismo",
                    "comunismo",
                    "marxismo",
                    "colectivismo",
                    "género",
                ],
            ),
            Frame::new(
                "social_movements",
                Bucket::Enemy,
                [
                    "piqueteros",
                    "movimientos sociales",
                    "organizaciones sociales",
                    "planes sociales",
                    "vagos",
                    "planeros",
                ],
            ),
            Frame::new(
                "media",
                Bucket::Enemy,
                [
                    "periodistas",
                    "medios",
                    "prensa",
                    "televisión",
                    "ensobrados",
                    "periodismo militante",
                ],
            ),
            Frame::new(
                "international",
                Bucket::Enemy,
                [
                    "china",
                    "foro de são paulo",
                    "brasil",
                    "lula",
                    "venezuela",
                    "maduro",
                    "cuba",
                    "socialismo internacional",
                ],
            ),
            Frame::new(
                "fiscal_terrorism",
                Bucket::Economic,
                [
                    "terrorismo fiscal",
                    "robo",
                    "saqueo",
                    "expropiación",
                    "confiscación",
                    "inflación",
                    "impuesto",
                    "emisión",
                    "déficit",
                ],
            ),
            Frame::new(
                "emergency",
                Bucket::Economic,
                ["urgente", "inmediato", "ya", "crisis", "emergencia"],
            ),
            Frame::new(
                "existential",
                Bucket::Economic,
                [
                    "catástrofe",
                    "destrucción",
                    "ruina",
                    "colapso",
                    "abismo",
                    "desastre",
                ],
            ),
            Frame::new(
                "war_language",
                Bucket::War,
                ["batalla", "guerra", "lucha", "enemigo", "combate", "victoria"],
            ),
            Frame::new(
                "liberty",
                Bucket::Liberty,
                [
                    "libertad",
                    "libre",
                    "propiedad privada",
                    "mercado",
                    "liberalismo",
                    "libertario",
                ],
            ),
        ];

        Self::new(frames).expect("Invalid built-in lexicon")
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::spanish_default()
    }
}

/// Canonical form used for duplicate detection and matching.
pub(crate) fn normalize_keyword(keyword: &str) -> String {
    keyword.trim().to_lowercase()
}
