use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};
use which::which;

use crate::error::{InitError, Result};

/// Generators cmake may be asked to target.
pub const GENERATORS: &[&str] = &[
    "Ninja",
    "Unix Makefiles",
    "Ninja Multi-Config",
    "Watcom WMake",
    "CodeBlocks - Ninja",
    "CodeBlocks - Unix Makefiles",
    "Green Hills MULTI",
];

pub const BUILD_DIR: &str = "build";

pub fn check_generator(generator: &str) -> Result<()> {
    if GENERATORS.contains(&generator) {
        Ok(())
    } else {
        Err(InitError::InvalidGenerator {
            name: generator.to_string(),
            allowed: GENERATORS,
        })
    }
}

fn find_cmake() -> Result<PathBuf> {
    let path = which("cmake").map_err(|_| InitError::CmakeNotFound)?;
    debug!("Found cmake at: {:?}", path);
    Ok(path)
}

/// Wipes `build/` and runs `cmake -S . -B build -G <generator>` in `root`.
///
/// The generator is checked before anything is removed. cmake's output goes
/// straight to our stdout and stderr.
pub fn configure(root: &Path, generator: &str) -> Result<()> {
    check_generator(generator)?;
    let cmake = find_cmake()?;

    let build = root.join(BUILD_DIR);
    if build.exists() {
        fs::remove_dir_all(&build).map_err(InitError::io(&build))?;
    }
    fs::create_dir_all(&build).map_err(InitError::io(&build))?;

    info!("Running cmake with generator {}", generator);
    let status = Command::new(cmake)
        .args(["-S", ".", "-B", BUILD_DIR, "-G", generator])
        .current_dir(root)
        .status()
        .map_err(InitError::CmakeSpawn)?;

    if status.success() {
        Ok(())
    } else {
        Err(InitError::CmakeFailed(status))
    }
}
