use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Source language selected for the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    C,
    Cxx,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("language must be either C or CXX, got `{0}`")]
pub struct UnknownLanguage(pub String);

impl Language {
    /// Token used by CMake, both in `LANGUAGES` and in `CMAKE_<LANG>_*` variables.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Cxx => "CXX",
        }
    }

    fn standard(self) -> &'static str {
        match self {
            Language::C => "11",
            Language::Cxx => "17",
        }
    }

    fn source_globs(self) -> &'static str {
        match self {
            Language::C => r#""src/*.c""#,
            Language::Cxx => r#""src/*.cpp" "src/*.cc""#,
        }
    }

    fn header_globs(self) -> &'static str {
        match self {
            Language::C => r#""include/*.h""#,
            Language::Cxx => r#""include/*.h" "include/*.hpp""#,
        }
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" => Ok(Language::C),
            "CXX" => Ok(Language::Cxx),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the generated documents depend on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub language: Language,
    /// Space separated library names, passed through to `target_link_libraries`.
    pub link_libs: String,
    pub library: bool,
    pub installable: bool,
}

impl Project {
    pub fn has_link_libs(&self) -> bool {
        !self.link_libs.trim().is_empty()
    }

    /// Library and installable together turn on every packaging artifact.
    pub fn is_packaged(&self) -> bool {
        self.library && self.installable
    }

    /// `-l` flags for the pkg-config manifest, in the order given. Duplicates are kept.
    pub fn link_flags(&self) -> Vec<String> {
        self.link_libs
            .split_whitespace()
            .map(|lib| format!("-l{}", lib))
            .collect()
    }
}

#[derive(Serialize)]
pub(crate) struct ListsContext<'a> {
    pub name: &'a str,
    pub description: String,
    pub language: &'static str,
    pub standard: &'static str,
    pub source_globs: &'static str,
    pub header_globs: &'static str,
    pub link_libs: &'a str,
}

impl<'a> ListsContext<'a> {
    pub fn new(project: &'a Project) -> Self {
        ListsContext {
            name: &project.name,
            description: escape_quoted(&project.description),
            language: project.language.as_str(),
            standard: project.language.standard(),
            source_globs: project.language.source_globs(),
            header_globs: project.language.header_globs(),
            link_libs: project.link_libs.trim(),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct PkgConfigContext {
    pub link_flags: Vec<String>,
}

#[derive(Serialize)]
pub(crate) struct PackageConfigContext<'a> {
    pub name: &'a str,
}

// CMake quoted argument: backslash, double quote and `$` (variable references).
fn escape_quoted(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "\\$")
}
