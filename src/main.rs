mod cmake;
mod config;
mod error;
mod render;

use std::path::{Path, PathBuf};

use anyhow::bail;
use clap::Parser;
use cmake_template::{Project, Renderer};
use tracing::{error, info, Level};

use crate::config::{Options, ProjectConfig};
use crate::error::InitError;
use crate::render::{create_layout, write_document};

/// Scaffold CMakeLists.txt and packaging stubs for a C or C++ project
/// in the current directory.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Name of the project [default: current directory name]
    #[arg(long)]
    name: Option<String>,
    /// Description of the project
    #[arg(long)]
    desc: Option<String>,
    /// Language of the project: C or CXX [default: C]
    #[arg(long)]
    lang: Option<String>,
    /// Space separated libraries to link against
    #[arg(long)]
    linklibs: Option<String>,
    /// Generate install rules and packaging files for libraries [default: true]
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    install: Option<bool>,
    /// Build a library instead of an executable [default: false]
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    lib: Option<bool>,
    /// Run cmake after generating the files [default: false]
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    configure: Option<bool>,
    /// CMake generator to use [default: Ninja]
    #[arg(long)]
    generator: Option<String>,
    /// TOML file supplying defaults for the options above
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            name: self.name.clone(),
            description: self.desc.clone(),
            language: self.lang.clone(),
            linklibs: self.linklibs.clone(),
            install: self.install,
            lib: self.lib,
            configure: self.configure,
            generator: self.generator.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .without_time()
        .init();

    let root = std::env::current_dir().map_err(InitError::CurrentDir)?;
    let file_options = match &cli.config {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let config = config::resolve(cli.options().or(file_options), &root)?;

    run(&config, &root)
}

fn run(config: &ProjectConfig, root: &Path) -> anyhow::Result<()> {
    let project = &config.project;
    create_layout(root)?;

    let renderer = Renderer::new()?;
    write_document(root, &renderer.cmake_lists(project)?)?;

    if project.is_packaged() {
        let failures = generate_package_files(&renderer, project, root);
        if !failures.is_empty() {
            for failure in &failures {
                error!("{}", failure);
            }
            bail!("{} packaging file(s) could not be generated", failures.len());
        }
    }

    if config.configure {
        cmake::configure(root, &config.generator)?;
    }

    info!("Project {} is ready", project.name);
    Ok(())
}

/// Renders and writes both packaging stubs, collecting every failure.
fn generate_package_files(renderer: &Renderer, project: &Project, root: &Path) -> Vec<InitError> {
    [renderer.pkg_config(project), renderer.package_config(project)]
        .into_iter()
        .filter_map(|doc| {
            doc.map_err(InitError::from)
                .and_then(|doc| write_document(root, &doc))
                .err()
        })
        .collect()
}
