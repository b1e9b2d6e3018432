//! Resource name normalization.
//!
//! A resource identifier such as `magazines.ads` or `/v1/photos/` is turned
//! into a chain of [`ResourceToken`]s. Each token keeps the segment exactly as
//! written (URL patterns use it verbatim), a `snake_case` name used for route
//! names, and the param name that addresses a single member.

use convert_case::{Boundary, Case, Casing};

use crate::errors::{ResourceError, Result};

/// Path separator trimmed from both ends of an identifier
pub const PATH_SEPARATOR: char = '/';

/// Separates a parent resource from its children: `magazines.ads`
pub const NESTING_SEPARATOR: char = '.';

/// Param used to address a member of the primary resource
pub const PRIMARY_PARAM: &str = "id";

/// Words whose plural and singular forms are identical
const UNCOUNTABLE: &[&str] = &[
    "deer",
    "equipment",
    "fish",
    "information",
    "metadata",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
];

/// Plurals the suffix rules below get wrong
const IRREGULAR: &[(&str, &str)] = &[
    ("aliases", "alias"),
    ("analyses", "analysis"),
    ("buses", "bus"),
    ("caches", "cache"),
    ("children", "child"),
    ("crises", "crisis"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("halves", "half"),
    ("indices", "index"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("matrices", "matrix"),
    ("men", "man"),
    ("mice", "mouse"),
    ("movies", "movie"),
    ("niches", "niche"),
    ("oxen", "ox"),
    ("people", "person"),
    ("quizzes", "quiz"),
    ("shelves", "shelf"),
    ("shoes", "shoe"),
    ("statuses", "status"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("vertices", "vertex"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
];

/// One dot-separated segment of a resource identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceToken {
    original: String,
    name: String,
    default_param: String,
    param: String,
}

impl ResourceToken {
    fn new(original: &str, is_primary: bool) -> Self {
        let name = snake_case(original);
        let default_param = if is_primary {
            PRIMARY_PARAM.to_string()
        } else {
            format!("{}_id", singular(&name))
        };

        Self {
            original: original.to_string(),
            name,
            param: default_param.clone(),
            default_param,
        }
    }

    /// The segment exactly as it appeared in the identifier. URL patterns
    /// use it verbatim, so dashes and slashes are preserved.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// `snake_case` form used when composing route names
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current param name, without the leading `:`
    #[must_use]
    pub fn param(&self) -> &str {
        &self.param
    }

    #[must_use]
    pub fn default_param(&self) -> &str {
        &self.default_param
    }

    pub(crate) fn set_param(&mut self, param: impl Into<String>) {
        self.param = param.into();
    }
}

/// Split a resource identifier into its token chain.
///
/// Leading and trailing `/` are insignificant. The last token is the primary
/// resource; earlier tokens are ancestors and get `<singular>_id` params.
///
/// # Errors
/// Returns [`ResourceError::InvalidResourceName`] when nothing is left after
/// trimming, or when a nesting segment is empty (`magazines..ads`).
pub fn tokenize(identifier: &str) -> Result<Vec<ResourceToken>> {
    let trimmed = trim_separators(identifier);
    if trimmed.is_empty() {
        return Err(ResourceError::invalid_resource_name(identifier));
    }

    let segments: Vec<&str> = trimmed.split(NESTING_SEPARATOR).collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(ResourceError::invalid_resource_name(identifier));
    }

    let last = segments.len() - 1;
    Ok(segments
        .iter()
        .enumerate()
        .map(|(index, segment)| ResourceToken::new(segment, index == last))
        .collect())
}

/// Strip every leading and trailing path separator
#[must_use]
pub fn trim_separators(identifier: &str) -> &str {
    identifier.trim_matches(PATH_SEPARATOR)
}

/// Convert an identifier to `snake_case`.
///
/// Words break at `/`, `_`, `-` and spaces, at camelCase humps, inside
/// acronyms (`HTMLPages`) and where a letter meets a digit (`v1` becomes
/// `v_1`). Already normalized input comes back unchanged.
#[must_use]
pub fn snake_case(input: &str) -> String {
    let boundaries = [
        Boundary::from_delim("/"),
        Boundary::UNDERSCORE,
        Boundary::HYPHEN,
        Boundary::SPACE,
        Boundary::LOWER_UPPER,
        Boundary::LOWER_DIGIT,
        Boundary::ACRONYM,
    ];
    input.with_boundaries(&boundaries).to_case(Case::Snake)
}

/// Singular form of a `snake_case` name. Only the last word is inflected:
/// `user_profiles` becomes `user_profile`.
#[must_use]
pub fn singular(name: &str) -> String {
    match name.rsplit_once('_') {
        Some((head, last)) => format!("{head}_{}", singular_word(last)),
        None => singular_word(name),
    }
}

fn singular_word(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }

    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == word) {
        return (*singular).to_string();
    }

    if word.len() > 3 && word.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }

    let strips_es = ["sses", "ches", "shes", "xes", "zzes", "oes"]
        .iter()
        .any(|suffix| word.ends_with(suffix));
    if strips_es {
        return word[..word.len() - 2].to_string();
    }

    if ["ss", "us", "is"].iter().any(|suffix| word.ends_with(suffix)) {
        return word.to_string();
    }

    match word.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => word.to_string(),
    }
}
