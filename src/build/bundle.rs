// ABOUTME: Reads every visible file of a directory and writes them as one JSON bundle.
// ABOUTME: Keys are "<source dir>/<file name>", values the raw file text.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::BuildError;

/// Default source directory of the build step.
pub const DEFAULT_SOURCE_DIR: &str = "templates";

/// Template key to template text, serialized in key order.
pub type Bundle = BTreeMap<String, String>;

/// What a completed build produced.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Visible file names that went into the bundle.
    pub filenames: Vec<String>,
    /// Where the bundle was written.
    pub dest_file: PathBuf,
    /// The bundle contents.
    pub bundle: Bundle,
}

/// Default destination for a source directory: `<src_dir>.json`.
pub fn default_destination(src_dir: &str) -> String {
    format!("{}.json", src_dir)
}

/// Whether a directory entry takes part in the bundle.
pub fn is_visible(filename: &str) -> bool {
    !filename.starts_with('.')
}

/// The key a file is bundled under.
pub fn template_key(src_dir: &str, filename: &str) -> String {
    format!("{}/{}", src_dir, filename)
}

/// List the visible entries of `src_dir`, sorted by name.
pub fn visible_filenames(src_dir: &str) -> Result<Vec<String>, BuildError> {
    let read_dir = |source| BuildError::ReadDir {
        path: PathBuf::from(src_dir),
        source,
    };

    let mut filenames = Vec::new();
    for entry in fs::read_dir(src_dir).map_err(read_dir)? {
        let entry = entry.map_err(read_dir)?;
        let filename = entry.file_name().to_string_lossy().into_owned();
        if is_visible(&filename) {
            filenames.push(filename);
        }
    }
    filenames.sort();
    Ok(filenames)
}

/// Read each file into a bundle. Fails on the first unreadable file.
pub fn collect_templates(src_dir: &str, filenames: &[String]) -> Result<Bundle, BuildError> {
    let mut bundle = Bundle::new();
    for filename in filenames {
        let key = template_key(src_dir, filename);
        let content = fs::read_to_string(&key).map_err(|source| BuildError::ReadFile {
            path: PathBuf::from(&key),
            source,
        })?;
        debug!(key = %key, bytes = content.len(), "read template");
        bundle.insert(key, content);
    }
    Ok(bundle)
}

/// Write the bundle as a JSON object.
///
/// The document is written to a sibling temporary file and renamed into
/// place, so `dest_file` never holds a partial bundle.
pub fn write_bundle(dest_file: &Path, bundle: &Bundle) -> Result<(), BuildError> {
    let json = serde_json::to_string(bundle)?;

    let mut staging = dest_file.as_os_str().to_owned();
    staging.push(".partial");
    let staging = PathBuf::from(staging);

    let written = fs::write(&staging, json).and_then(|()| fs::rename(&staging, dest_file));
    if let Err(source) = written {
        // a failed write may have left a partial staging file behind
        let _ = fs::remove_file(&staging);
        return Err(BuildError::Write {
            path: dest_file.to_path_buf(),
            source,
        });
    }
    Ok(())
}

/// Build the bundle for `src_dir` and write it to `dest_file`.
pub fn build_bundle(src_dir: &str, dest_file: &Path) -> Result<BuildReport, BuildError> {
    let filenames = visible_filenames(src_dir)?;
    let bundle = collect_templates(src_dir, &filenames)?;
    write_bundle(dest_file, &bundle)?;

    Ok(BuildReport {
        filenames,
        dest_file: dest_file.to_path_buf(),
        bundle,
    })
}
