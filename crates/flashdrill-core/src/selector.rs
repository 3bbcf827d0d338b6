//! Deck file discovery and selection.
//!
//! Decks are looked up in two places: the current directory and the
//! configured working directory. Random picks only ever come from the
//! working directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::DrillError;
use crate::record::read_lines;

/// Whether a file name passes the exclusion filters.
pub fn is_eligible(name: &str, excludes: &[String], excludes_ext: &[String]) -> bool {
    !excludes.iter().any(|excluded| excluded == name)
        && !excludes_ext.iter().any(|ext| name.ends_with(ext.as_str()))
}

/// The eligible deck files of both directories.
#[derive(Debug, Clone)]
pub struct Catalog {
    current_dir: PathBuf,
    working_dir: PathBuf,
    /// Eligible file names in the current directory, sorted.
    pub current: Vec<String>,
    /// Eligible file names in the working directory, sorted.
    pub working: Vec<String>,
}

/// List the eligible files of `current_dir` and `working_dir`.
///
/// A missing working directory simply contributes no files.
pub fn list_eligible(
    current_dir: &Path,
    working_dir: &Path,
    excludes: &[String],
    excludes_ext: &[String],
) -> Result<Catalog> {
    let current = list_dir(current_dir, excludes, excludes_ext)?;
    let working = if working_dir.is_dir() {
        list_dir(working_dir, excludes, excludes_ext)?
    } else {
        tracing::debug!("working directory {} does not exist", working_dir.display());
        Vec::new()
    };

    Ok(Catalog {
        current_dir: current_dir.to_path_buf(),
        working_dir: working_dir.to_path_buf(),
        current,
        working,
    })
}

fn list_dir(dir: &Path, excludes: &[String], excludes_ext: &[String]) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        if entry.path().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::warn!("skipping non UTF-8 file name in {}", dir.display());
            continue;
        };
        if is_eligible(&name, excludes, excludes_ext) {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

impl Catalog {
    /// Resolve a listed file name to its path, current directory first.
    pub fn locate(&self, name: &str) -> Result<PathBuf> {
        let candidates = [
            (&self.current, &self.current_dir),
            (&self.working, &self.working_dir),
        ];
        candidates
            .into_iter()
            .filter(|(names, _)| names.iter().any(|n| n == name))
            .map(|(_, dir)| dir.join(name))
            .find(|path| path.is_file())
            .ok_or_else(|| DrillError::NotFound(name.to_string()).into())
    }

    /// The lines of a listed file.
    pub fn get_file(&self, name: &str) -> Result<Vec<String>> {
        let path = self.locate(name)?;
        tracing::debug!("reading deck {}", path.display());
        read_lines(&path)
    }

    /// The name and lines of one working-directory file chosen at random.
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(String, Vec<String>)> {
        let name = self
            .working
            .choose(rng)
            .ok_or_else(|| self.empty_working_dir())?;
        Ok((name.clone(), self.get_file(name)?))
    }

    /// The concatenated lines of `count` working-directory files drawn with
    /// replacement, so the same file may be drawn more than once.
    pub fn pick_random_concat<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
    ) -> Result<Vec<String>> {
        if self.working.is_empty() {
            return Err(self.empty_working_dir());
        }

        let mut lines = Vec::new();
        for _ in 0..count {
            if let Some(name) = self.working.choose(rng) {
                lines.extend(self.get_file(name)?);
            }
        }
        Ok(lines)
    }

    fn empty_working_dir(&self) -> anyhow::Error {
        DrillError::NotFound(format!(
            "eligible file in working directory {}",
            self.working_dir.display()
        ))
        .into()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// current/{test.txt, test.ini, test, shared} and
    /// working/{test.txt, test.ini, test, deck, sub/}
    fn fixture() -> (tempfile::TempDir, Catalog) {
        let root = tempfile::tempdir().unwrap();
        let current = root.path().join("current");
        let working = root.path().join("working");
        std::fs::create_dir_all(working.join("sub")).unwrap();
        std::fs::create_dir_all(&current).unwrap();

        for name in ["test.txt", "test.ini", "test"] {
            std::fs::write(current.join(name), "a#b\n").unwrap();
            std::fs::write(working.join(name), "c#d\n").unwrap();
        }
        std::fs::write(current.join("shared"), "current#copy\n").unwrap();
        std::fs::write(working.join("deck"), "x#y\nz#w\n").unwrap();

        let catalog = list_eligible(
            &current,
            &working,
            &strings(&["test.ini"]),
            &strings(&[".txt"]),
        )
        .unwrap();
        (root, catalog)
    }

    #[test]
    fn eligibility_filters() {
        let excludes = strings(&["test.ini"]);
        let ext = strings(&[".txt", ".py"]);
        assert!(is_eligible("test", &excludes, &ext));
        assert!(!is_eligible("test.ini", &excludes, &ext));
        assert!(!is_eligible("notes.txt", &excludes, &ext));
        assert!(!is_eligible("script.py", &excludes, &ext));
        assert!(is_eligible("python", &excludes, &ext));
    }

    #[test]
    fn lists_exclude_names_extensions_and_directories() {
        let (_root, catalog) = fixture();
        assert_eq!(catalog.current, vec!["shared", "test"]);
        assert_eq!(catalog.working, vec!["deck", "test"]);
    }

    #[test]
    fn missing_working_dir_is_empty() {
        let root = tempfile::tempdir().unwrap();
        let catalog =
            list_eligible(root.path(), &root.path().join("missing"), &[], &[]).unwrap();
        assert!(catalog.working.is_empty());
    }

    #[test]
    fn get_file_prefers_current_dir() {
        let (_root, catalog) = fixture();
        assert_eq!(catalog.get_file("test").unwrap(), vec!["a#b"]);
        assert_eq!(catalog.get_file("deck").unwrap(), vec!["x#y", "z#w"]);
    }

    #[test]
    fn get_file_rejects_excluded_and_missing() {
        let (_root, catalog) = fixture();
        for name in ["test.ini", "test.txt", "not_a_file", "sub"] {
            let err = catalog.get_file(name).unwrap_err();
            assert!(
                matches!(DrillError::find(&err), Some(DrillError::NotFound(n)) if n == name),
                "{name} should not be found"
            );
        }
    }

    #[test]
    fn pick_random_comes_from_working_dir() {
        let (_root, catalog) = fixture();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            let (name, lines) = catalog.pick_random(&mut rng).unwrap();
            assert!(catalog.working.contains(&name));
            assert!(!lines.is_empty());
        }
    }

    #[test]
    fn pick_random_concat_draws_count_files() {
        let (_root, catalog) = fixture();
        let mut rng = StdRng::seed_from_u64(3);
        let lines = catalog.pick_random_concat(&mut rng, 3).unwrap();
        // "deck" has two lines, "test" one, so three draws give 3..=6 lines.
        assert!((3..=6).contains(&lines.len()), "got {lines:?}");
    }

    #[test]
    fn random_picks_need_working_files() {
        let root = tempfile::tempdir().unwrap();
        let catalog = list_eligible(root.path(), root.path(), &[], &[]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(catalog.pick_random(&mut rng).is_err());
        let err = catalog.pick_random_concat(&mut rng, 2).unwrap_err();
        assert!(matches!(
            DrillError::find(&err),
            Some(DrillError::NotFound(_))
        ));
    }
}
