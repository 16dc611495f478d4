//! Filesystem-based add-on catalog.
//!
//! Loads add-on bundles from a directory tree so teams can replace the
//! built-in assets without rebuilding the binary.
//!
//! # Directory layout expected
//!
//! ```text
//! addons/
//! └── rag/
//!     ├── addon.toml           ← manifest (required)
//!     └── files/               ← copied into the project, paths preserved
//!         ├── packages/rag/package.json
//!         └── docker-compose.rag.yml
//! ```
//!
//! # `addon.toml` format
//!
//! ```toml
//! description = "Vector search"   # optional
//!
//! [[append]]
//! path    = ".env.example"
//! snippet = "VECTOR_DATABASE_URL=\n"
//! ```
//!
//! Modules without a subdirectory fall back to [`BuiltinAddons`].

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use monoseed_core::{
    application::ports::AddonCatalog,
    domain::{AddonAppend, AddonBundle, AddonFile, DomainError, OptionalModule, RelativePath},
    error::MonoseedResult,
};

use super::BuiltinAddons;

const MANIFEST: &str = "addon.toml";
const FILES_DIR: &str = "files";

/// Deserialised `addon.toml`.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct AddonManifest {
    pub description: Option<String>,
    #[serde(default, rename = "append")]
    pub appends: Vec<AppendEntry>,
}

/// One `[[append]]` entry.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct AppendEntry {
    pub path: String,
    pub snippet: String,
}

/// Why an add-on directory could not be loaded.
#[derive(Debug, Error)]
pub enum AddonLoadError {
    #[error("failed to read '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Loads bundles from `<root>/<module>/`.
#[derive(Debug, Clone)]
pub struct DirectoryAddons {
    root: PathBuf,
    fallback: BuiltinAddons,
}

impl DirectoryAddons {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fallback: BuiltinAddons,
        }
    }

    /// Load the bundle in `dir`. `dir` must contain `addon.toml`.
    #[instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub fn load_bundle(
        &self,
        module: OptionalModule,
        dir: &Path,
    ) -> Result<AddonBundle, AddonLoadError> {
        let manifest_path = dir.join(MANIFEST);
        let raw = fs::read_to_string(&manifest_path).map_err(|source| AddonLoadError::Io {
            path: manifest_path.clone(),
            source,
        })?;
        let manifest: AddonManifest =
            toml::from_str(&raw).map_err(|source| AddonLoadError::Parse {
                path: manifest_path.clone(),
                source,
            })?;

        let mut bundle = AddonBundle::new(module);

        let files_root = dir.join(FILES_DIR);
        if files_root.is_dir() {
            for entry in WalkDir::new(&files_root).min_depth(1).sort_by_file_name() {
                let entry = entry?;
                if !entry.file_type().is_file() {
                    continue;
                }

                let rel = entry
                    .path()
                    .strip_prefix(&files_root)
                    .map_err(|_| DomainError::UnsafePath {
                        path: entry.path().display().to_string(),
                    })?;
                let content =
                    fs::read_to_string(entry.path()).map_err(|source| AddonLoadError::Io {
                        path: entry.path().to_path_buf(),
                        source,
                    })?;

                debug!(path = %rel.display(), "Loaded add-on file");
                bundle.files.push(AddonFile {
                    path: RelativePath::try_new(rel)?,
                    content,
                });
            }
        }

        for append in manifest.appends {
            bundle.appends.push(AddonAppend {
                path: RelativePath::try_new(append.path)?,
                snippet: append.snippet,
            });
        }

        bundle.validate()?;
        debug!(
            files = bundle.files.len(),
            appends = bundle.appends.len(),
            description = manifest.description.as_deref().unwrap_or(""),
            "Loaded add-on bundle"
        );
        Ok(bundle)
    }
}

impl AddonCatalog for DirectoryAddons {
    fn get(&self, module: OptionalModule) -> MonoseedResult<Option<AddonBundle>> {
        let dir = self.root.join(module.as_str());
        if !dir.join(MANIFEST).is_file() {
            debug!(module = %module, "No add-on directory, using built-in bundle");
            return self.fallback.get(module);
        }

        self.load_bundle(module, &dir)
            .map(Some)
            .map_err(|e| match e {
                AddonLoadError::Domain(domain) => domain.into(),
                other => DomainError::InvalidAddon {
                    module: module.to_string(),
                    reason: other.to_string(),
                }
                .into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed(root: &Path, manifest: &str, files: &[(&str, &str)]) {
        let dir = root.join("rag");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(MANIFEST), manifest).unwrap();
        for (path, content) in files {
            let path = dir.join(FILES_DIR).join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
    }

    #[test]
    fn loads_files_and_appends() {
        let tmp = TempDir::new().unwrap();
        seed(
            tmp.path(),
            r#"
description = "custom rag"

[[append]]
path = ".env.example"
snippet = "VECTOR_URL=\n"
"#,
            &[
                ("packages/rag/package.json", "{ \"name\": \"@{{PROJECT_NAME}}/rag\" }"),
                ("docker-compose.rag.yml", "services: {}"),
            ],
        );

        let bundle = DirectoryAddons::new(tmp.path())
            .get(OptionalModule::Rag)
            .unwrap()
            .unwrap();

        let files: Vec<String> = bundle.files.iter().map(|f| f.path.to_string()).collect();
        assert_eq!(files, vec!["docker-compose.rag.yml", "packages/rag/package.json"]);
        assert_eq!(bundle.appends.len(), 1);
        assert_eq!(bundle.appends[0].snippet, "VECTOR_URL=\n");
    }

    #[test]
    fn missing_directory_falls_back_to_builtin() {
        let tmp = TempDir::new().unwrap();
        let bundle = DirectoryAddons::new(tmp.path())
            .get(OptionalModule::Rag)
            .unwrap()
            .unwrap();
        assert_eq!(bundle, crate::addons::rag_bundle());
    }

    #[test]
    fn malformed_manifest_is_invalid_addon() {
        let tmp = TempDir::new().unwrap();
        seed(tmp.path(), "this is not = = toml", &[("a.txt", "a")]);

        let err = DirectoryAddons::new(tmp.path())
            .get(OptionalModule::Rag)
            .unwrap_err();
        assert!(err.to_string().contains("Invalid add-on 'rag'"));
    }

    #[test]
    fn escaping_append_path_is_rejected() {
        let tmp = TempDir::new().unwrap();
        seed(
            tmp.path(),
            "[[append]]\npath = \"../outside\"\nsnippet = \"x\"\n",
            &[],
        );

        let err = DirectoryAddons::new(tmp.path())
            .get(OptionalModule::Rag)
            .unwrap_err();
        assert!(err.to_string().contains("../outside"));
    }
}
