//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::{DataFile, GameplayDefaults};
use super::registry::ContentRegistry;

pub const RUNES_FILE: &str = "runes.ron";
pub const SKILLS_FILE: &str = "skills.ron";
pub const DEFAULTS_FILE: &str = "gameplay_defaults.ron";

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn read(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: path.display().to_string(),
        message: format!("IO error: {}", e),
    })
}

/// Parse the contents of a DataFile<T> wrapper.
pub fn parse_data_file<T>(contents: &str, file: &str) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let data: DataFile<T> = ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })?;
    Ok(data.items)
}

/// Parse a single RON struct (not wrapped in DataFile).
pub fn parse_single<T>(contents: &str, file: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

fn load_data_file<T>(path: &Path) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    parse_data_file(&read(path)?, &path.display().to_string())
}

fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    parse_single(&read(path)?, &path.display().to_string())
}

/// Load all content from assets/data/*.ron.
/// Every file is attempted; all failures are returned together.
pub fn load_all_content(
    base_path: &Path,
) -> Result<(ContentRegistry, GameplayDefaults), Vec<ContentLoadError>> {
    let mut registry = ContentRegistry::default();
    let mut errors = Vec::new();

    match load_data_file(&base_path.join(RUNES_FILE)) {
        Ok(runes) => registry.runes = runes,
        Err(e) => errors.push(e),
    }
    match load_data_file(&base_path.join(SKILLS_FILE)) {
        Ok(skills) => registry.skills = skills,
        Err(e) => errors.push(e),
    }
    let defaults = match load_single_file::<GameplayDefaults>(&base_path.join(DEFAULTS_FILE)) {
        Ok(defaults) => Some(defaults),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    match defaults {
        Some(defaults) if errors.is_empty() => Ok((registry, defaults)),
        _ => Err(errors),
    }
}
