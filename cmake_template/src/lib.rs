mod model;

pub use crate::model::{Language, Project, UnknownLanguage};

use crate::model::{ListsContext, PackageConfigContext, PkgConfigContext};
use include_dir::{Dir, include_dir};
use serde::Serialize;
use thiserror::Error;
use tinytemplate::{TinyTemplate, format_unescaped};

static TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

const PKG_CONFIG_TEMPLATE: &str = "pkg_config.pc.in.tmpl";
const PACKAGE_CONFIG_TEMPLATE: &str = "package_config.cmake.in.tmpl";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template `{0}` is not embedded")]
    Missing(&'static str),
    #[error("template `{name}` failed: {message}")]
    Template { name: &'static str, message: String },
}

/// One named partial of `CMakeLists.txt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Preamble,
    LibraryTarget,
    ExecutableTarget,
    CompileOptions,
    LinkLibraries,
    /// Always emitted. Compiler family and build type are checked by CMake at configure time.
    Hardening,
    IncludeDirectories,
    Install,
}

impl Section {
    fn template(self) -> &'static str {
        match self {
            Section::Preamble => "preamble.cmake.tmpl",
            Section::LibraryTarget => "library.cmake.tmpl",
            Section::ExecutableTarget => "executable.cmake.tmpl",
            Section::CompileOptions => "compile_options.cmake.tmpl",
            Section::LinkLibraries => "link_libraries.cmake.tmpl",
            Section::Hardening => "hardening.cmake.tmpl",
            Section::IncludeDirectories => "include_directories.cmake.tmpl",
            Section::Install => "install.cmake.tmpl",
        }
    }
}

/// Sections of `CMakeLists.txt` for `project`, in output order.
pub fn sections(project: &Project) -> Vec<Section> {
    let mut sections = vec![Section::Preamble];
    sections.push(if project.library {
        Section::LibraryTarget
    } else {
        Section::ExecutableTarget
    });
    sections.push(Section::CompileOptions);
    if project.has_link_libs() {
        sections.push(Section::LinkLibraries);
    }
    sections.push(Section::Hardening);
    sections.push(Section::IncludeDirectories);
    if project.is_packaged() {
        sections.push(Section::Install);
    }
    sections
}

/// A rendered file, named relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub contents: String,
}

pub struct Renderer {
    tt: TinyTemplate<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut tt = TinyTemplate::new();
        tt.set_default_formatter(&format_unescaped);

        for file in TEMPLATES.files() {
            let name = file
                .path()
                .to_str()
                .ok_or(RenderError::Missing("<non utf-8 path>"))?;
            let text = file.contents_utf8().ok_or(RenderError::Missing(name))?;
            tt.add_template(name, text)
                .map_err(|e| RenderError::Template {
                    name,
                    message: e.to_string(),
                })?;
        }

        Ok(Renderer { tt })
    }

    fn render<T: Serialize>(&self, name: &'static str, ctx: &T) -> Result<String, RenderError> {
        self.tt.render(name, ctx).map_err(|e| RenderError::Template {
            name,
            message: e.to_string(),
        })
    }

    /// `CMakeLists.txt`, composed from [`sections`] separated by blank lines.
    pub fn cmake_lists(&self, project: &Project) -> Result<Document, RenderError> {
        let ctx = ListsContext::new(project);
        let parts = sections(project)
            .into_iter()
            .map(|section| self.render(section.template(), &ctx))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Document {
            file_name: "CMakeLists.txt".to_string(),
            contents: parts.join("\n"),
        })
    }

    /// `<name>.pc.in`, expanded by `configure_file` at install time.
    pub fn pkg_config(&self, project: &Project) -> Result<Document, RenderError> {
        let ctx = PkgConfigContext {
            link_flags: project.link_flags(),
        };
        Ok(Document {
            file_name: format!("{}.pc.in", project.name),
            contents: self.render(PKG_CONFIG_TEMPLATE, &ctx)?,
        })
    }

    /// `<name>Config.cmake.in`, pointing consumers at the exported targets.
    pub fn package_config(&self, project: &Project) -> Result<Document, RenderError> {
        let ctx = PackageConfigContext {
            name: &project.name,
        };
        Ok(Document {
            file_name: format!("{}Config.cmake.in", project.name),
            contents: self.render(PACKAGE_CONFIG_TEMPLATE, &ctx)?,
        })
    }
}
