use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use cmake_template::{Language, Project};
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::{InitError, Result};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s").unwrap());

/// Unresolved options. Used both for the command line and for the optional TOML file.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Options {
    pub name: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub linklibs: Option<String>,
    pub install: Option<bool>,
    pub lib: Option<bool>,
    pub configure: Option<bool>,
    pub generator: Option<String>,
}

impl Options {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| InitError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| InitError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fields set in `self` win, the rest come from `fallback`.
    pub fn or(self, fallback: Options) -> Options {
        Options {
            name: self.name.or(fallback.name),
            description: self.description.or(fallback.description),
            language: self.language.or(fallback.language),
            linklibs: self.linklibs.or(fallback.linklibs),
            install: self.install.or(fallback.install),
            lib: self.lib.or(fallback.lib),
            configure: self.configure.or(fallback.configure),
            generator: self.generator.or(fallback.generator),
        }
    }
}

/// Resolved configuration, built once per run and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub project: Project,
    pub configure: bool,
    pub generator: String,
}

pub const DEFAULT_GENERATOR: &str = "Ninja";

/// Applies defaults and validates the language. `root` supplies the name when none is given.
pub fn resolve(options: Options, root: &Path) -> Result<ProjectConfig> {
    let name = match options.name.filter(|n| !n.is_empty()) {
        Some(name) => name,
        None => name_from_dir(root)?,
    };
    let language = match options.language {
        Some(lang) => lang.parse::<Language>()?,
        None => Language::default(),
    };

    let config = ProjectConfig {
        project: Project {
            name,
            description: options.description.unwrap_or_default(),
            language,
            link_libs: options.linklibs.unwrap_or_default(),
            library: options.lib.unwrap_or(false),
            installable: options.install.unwrap_or(true),
        },
        configure: options.configure.unwrap_or(false),
        generator: options
            .generator
            .unwrap_or_else(|| DEFAULT_GENERATOR.to_string()),
    };
    debug!("Resolved {:?}", config);
    Ok(config)
}

fn name_from_dir(dir: &Path) -> Result<String> {
    let base = dir
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| InitError::NoProjectName(dir.to_path_buf()))?;
    Ok(sanitize(base))
}

/// Lowercases and turns every whitespace character into `_`.
pub fn sanitize(name: &str) -> String {
    WHITESPACE.replace_all(&name.to_lowercase(), "_").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn root() -> PathBuf {
        PathBuf::from("/home/me/My Cool\tProject")
    }

    #[test]
    fn defaults() {
        let cfg = resolve(Options::default(), &root()).unwrap();
        assert_eq!(cfg.project.name, "my_cool_project");
        assert_eq!(cfg.project.language, Language::C);
        assert_eq!(cfg.project.description, "");
        assert_eq!(cfg.project.link_libs, "");
        assert!(cfg.project.installable);
        assert!(!cfg.project.library);
        assert!(!cfg.configure);
        assert_eq!(cfg.generator, "Ninja");
    }

    #[test]
    fn explicit_name_is_kept_verbatim() {
        let options = Options {
            name: Some("Keep Me".into()),
            ..Options::default()
        };
        assert_eq!(resolve(options, &root()).unwrap().project.name, "Keep Me");
    }

    #[test]
    fn empty_name_falls_back_to_directory() {
        let options = Options {
            name: Some(String::new()),
            ..Options::default()
        };
        assert_eq!(resolve(options, &root()).unwrap().project.name, "my_cool_project");
    }

    #[test]
    fn root_directory_has_no_name() {
        let err = resolve(Options::default(), Path::new("/")).unwrap_err();
        assert!(matches!(err, InitError::NoProjectName(_)));
    }

    #[test]
    fn accepts_both_languages() {
        for (token, lang) in [("C", Language::C), ("CXX", Language::Cxx)] {
            let options = Options {
                name: Some("x".into()),
                language: Some(token.into()),
                ..Options::default()
            };
            let cfg = resolve(options, &root()).unwrap();
            assert_eq!(cfg.project.language, lang);
            assert_eq!(cfg.project.name, "x");
        }
    }

    #[test]
    fn rejects_other_languages() {
        for token in ["c", "Cxx", "C++", "rust", ""] {
            let options = Options {
                language: Some(token.into()),
                ..Options::default()
            };
            let err = resolve(options, &root()).unwrap_err();
            assert!(matches!(err, InitError::Language(_)), "{}", token);
        }
    }

    #[test]
    fn command_line_overrides_file() {
        let cli = Options {
            lib: Some(false),
            generator: Some("Unix Makefiles".into()),
            ..Options::default()
        };
        let file: Options = toml::from_str(
            r#"
            name = "from_file"
            lib = true
            install = false
            generator = "Ninja"
            "#,
        )
        .unwrap();
        let cfg = resolve(cli.or(file), &root()).unwrap();
        assert_eq!(cfg.project.name, "from_file");
        assert!(!cfg.project.library);
        assert!(!cfg.project.installable);
        assert_eq!(cfg.generator, "Unix Makefiles");
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        assert!(toml::from_str::<Options>("colour = true").is_err());
    }

    #[test]
    fn load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("init.toml");
        fs::write(&path, "lib = \"yes\"").unwrap();
        assert!(matches!(
            Options::load(&path),
            Err(InitError::ConfigParse { .. })
        ));
        assert!(matches!(
            Options::load(&dir.path().join("missing.toml")),
            Err(InitError::ConfigRead { .. })
        ));
    }
}
