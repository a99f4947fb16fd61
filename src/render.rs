use std::fs;
use std::path::{Path, PathBuf};

use cmake_template::Document;
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::{debug, info};

use crate::error::{InitError, Result};

pub const LAYOUT: [&str; 3] = ["include", "src", "build"];

/// Creates the source layout under `root`. Existing directories are left alone.
pub fn create_layout(root: &Path) -> Result<()> {
    for dir in LAYOUT {
        let path = root.join(dir);
        fs::create_dir_all(&path).map_err(InitError::io(&path))?;
    }
    Ok(())
}

fn temp_path(target: &Path) -> PathBuf {
    let suffix: String = rng()
        .sample_iter(Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.tmp-{}", name, suffix))
}

/// Writes `doc` under `root` through a sibling temp file, so the target is either
/// the previous file or the complete new one.
pub fn write_document(root: &Path, doc: &Document) -> Result<PathBuf> {
    let target = root.join(&doc.file_name);
    let tmp = temp_path(&target);
    debug!("Writing {:?} via {:?}", target, tmp);

    let written = fs::write(&tmp, &doc.contents).and_then(|_| fs::rename(&tmp, &target));
    if let Err(source) = written {
        let _ = fs::remove_file(&tmp);
        return Err(InitError::Io {
            path: target,
            source,
        });
    }

    info!("Generated {}", target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(contents: &str) -> Document {
        Document {
            file_name: "CMakeLists.txt".into(),
            contents: contents.into(),
        }
    }

    #[test]
    fn layout_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        create_layout(dir.path()).unwrap();
        fs::write(dir.path().join("src/main.c"), "int main(void) { return 0; }").unwrap();
        create_layout(dir.path()).unwrap();
        for d in LAYOUT {
            assert!(dir.path().join(d).is_dir());
        }
        assert!(dir.path().join("src/main.c").exists());
    }

    #[test]
    fn write_overwrites_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        write_document(dir.path(), &doc("first")).unwrap();
        let path = write_document(dir.path(), &doc("second")).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "second");
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn write_into_missing_directory_fails_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("missing");
        match write_document(&root, &doc("x")) {
            Err(InitError::Io { path, .. }) => assert_eq!(path, root.join("CMakeLists.txt")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn temp_file_is_a_hidden_sibling() {
        let tmp = temp_path(Path::new("/p/demo.pc.in"));
        assert_eq!(tmp.parent(), Some(Path::new("/p")));
        let name = tmp.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(".demo.pc.in.tmp-"));
        assert_eq!(name.len(), ".demo.pc.in.tmp-".len() + 8);
    }
}
