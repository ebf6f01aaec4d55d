//! Flutter project layout and `sqlwing.toml` loading.

use std::path::{Path, PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Deserialize;
use sqlwing_codegen::GenerateConfig;
use thiserror::Error;

/// Result type for project operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<ProjectError>>;

/// Default config file name, looked up in the project root.
pub const CONFIG_FILE: &str = "sqlwing.toml";

/// Directories generated files are written to, relative to the root.
pub const OUTPUT_DIRS: [&str; 4] = [
    "lib/models",
    "lib/providers",
    "lib/views",
    "lib/sql_enums_dart_classes",
];

#[derive(Debug, Error, Diagnostic)]
pub enum ProjectError {
    #[error("directory not found: '{path}'")]
    #[diagnostic(
        code(sqlwing::missing_root),
        help("pass the root directory of a Flutter project")
    )]
    MissingRoot { path: PathBuf },

    #[error("'{path}' does not contain a 'lib' folder")]
    #[diagnostic(code(sqlwing::missing_lib), help("maybe it is not a Flutter project"))]
    MissingLib { path: PathBuf },

    #[error("directory not found: '{path}'")]
    #[diagnostic(
        code(sqlwing::missing_sqls),
        help("create a 'sqls' folder under 'lib' and add your SQL files")
    )]
    MissingSqls { path: PathBuf },

    #[error("failed to access '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file not found: '{path}'")]
    #[diagnostic(
        code(sqlwing::missing_config),
        help("drop --config to read 'sqlwing.toml' from the project root")
    )]
    ConfigMissing { path: PathBuf },

    #[error("failed to parse sqlwing.toml")]
    #[diagnostic(code(sqlwing::config_parse))]
    ConfigParse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

impl ProjectError {
    fn io(path: &Path, source: std::io::Error) -> Box<Self> {
        Box::new(Self::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Contents of `sqlwing.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub generate: GenerateConfig,
}

impl ProjectConfig {
    /// Parse config text, pointing errors at `filename`.
    pub fn parse(content: &str, filename: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| {
            let span = source.span().map(SourceSpan::from);
            Box::new(ProjectError::ConfigParse {
                src: NamedSource::new(filename, content.to_string()),
                span,
                source,
            })
        })
    }
}

/// A validated Flutter project root with a `lib/sqls` folder.
#[derive(Debug)]
pub struct FlutterProject {
    root: PathBuf,
    name: String,
}

impl FlutterProject {
    /// Validate the layout under `root`.
    ///
    /// The root, `lib/` and `lib/sqls/` must all exist.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Box::new(ProjectError::MissingRoot {
                path: root.to_path_buf(),
            }));
        }

        let lib = root.join("lib");
        if !lib.is_dir() {
            return Err(Box::new(ProjectError::MissingLib {
                path: root.to_path_buf(),
            }));
        }

        let sqls = lib.join("sqls");
        if !sqls.is_dir() {
            return Err(Box::new(ProjectError::MissingSqls { path: sqls }));
        }

        let canonical = std::fs::canonicalize(root).map_err(|e| ProjectError::io(root, e))?;
        let name = canonical
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "app".to_string());

        Ok(Self {
            root: root.to_path_buf(),
            name,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Last component of the root directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sqls_dir(&self) -> PathBuf {
        self.root.join("lib").join("sqls")
    }

    /// Regular files in `lib/sqls`, sorted by path.
    pub fn sql_files(&self) -> Result<Vec<PathBuf>> {
        let dir = self.sqls_dir();
        let entries = std::fs::read_dir(&dir).map_err(|e| ProjectError::io(&dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| ProjectError::io(&dir, e))?.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Create the missing output directories, returning the ones created.
    pub fn ensure_output_dirs(&self) -> Result<Vec<String>> {
        let mut created = Vec::new();
        for dir in OUTPUT_DIRS {
            let path = self.root.join(dir);
            if !path.is_dir() {
                std::fs::create_dir_all(&path).map_err(|e| ProjectError::io(&path, e))?;
                created.push(dir.to_string());
            }
        }
        Ok(created)
    }

    /// Load the config from `path`, or from `sqlwing.toml` in the root.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load_config(&self, path: Option<&Path>) -> Result<ProjectConfig> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (self.root.join(CONFIG_FILE), false),
        };

        if !path.is_file() {
            return if explicit {
                Err(Box::new(ProjectError::ConfigMissing { path }))
            } else {
                Ok(ProjectConfig::default())
            };
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ProjectError::io(&path, e))?;
        ProjectConfig::parse(&content, &path.display().to_string())
    }
}
