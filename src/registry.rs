//! File bindings for the current-version and bump phases
//!
//! Package files are read to discover the current version. Bump files are
//! the package files followed by any bump-only files, so every file that
//! determines the version is also rewritten when it changes.

use crate::error::ConfigError;
use crate::updater::Updater;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// A file paired with the convention its version is stored in
#[derive(Debug, Clone)]
pub struct FileBinding {
    /// Path relative to the project root
    pub path: PathBuf,
    /// Convention used to read and write the version
    pub updater: Updater,
}

impl FileBinding {
    /// Create a new binding
    pub fn new(path: impl Into<PathBuf>, updater: Updater) -> Self {
        Self {
            path: path.into(),
            updater,
        }
    }
}

/// Ordered package-file and bump-file bindings
#[derive(Debug, Clone)]
pub struct UpdaterRegistry {
    /// Bindings in registration order; the first `package_count` are package files
    bindings: Vec<FileBinding>,
    package_count: usize,
}

impl UpdaterRegistry {
    /// Build a registry from package files and additional bump-only files
    pub fn new(
        package_files: Vec<FileBinding>,
        extra_bump_files: Vec<FileBinding>,
    ) -> Result<Self, ConfigError> {
        if package_files.is_empty() {
            return Err(ConfigError::NoPackageFiles);
        }

        let package_count = package_files.len();
        let mut bindings = package_files;
        bindings.extend(extra_bump_files);

        let mut seen = HashSet::new();
        for binding in &bindings {
            if !seen.insert(normalize(&binding.path)) {
                return Err(ConfigError::DuplicateFile {
                    file: binding.path.clone(),
                });
            }
        }

        Ok(Self {
            bindings,
            package_count,
        })
    }

    /// Registry with one package file and no bump-only files
    pub fn single(package: FileBinding) -> Self {
        Self {
            bindings: vec![package],
            package_count: 1,
        }
    }

    /// Files consulted for the current version
    pub fn package_files(&self) -> &[FileBinding] {
        &self.bindings[..self.package_count]
    }

    /// Every file rewritten on a bump, package files first
    pub fn bump_files(&self) -> &[FileBinding] {
        &self.bindings
    }

    /// Returns true if the path is bound as a package file
    pub fn is_package_file(&self, path: &Path) -> bool {
        self.package_files().iter().any(|b| b.path == path)
    }

    /// Visit every package file in registration order
    pub fn for_each_package_file(&self, mut visit: impl FnMut(&Path, &Updater)) {
        for binding in self.package_files() {
            visit(&binding.path, &binding.updater);
        }
    }

    /// Visit every bump file in registration order
    pub fn for_each_bump_file(&self, mut visit: impl FnMut(&Path, &Updater)) {
        for binding in self.bump_files() {
            visit(&binding.path, &binding.updater);
        }
    }

    /// Visit every bump file in registration order, stopping at the first error
    pub fn try_for_each_bump_file<E>(
        &self,
        mut visit: impl FnMut(&Path, &Updater) -> Result<(), E>,
    ) -> Result<(), E> {
        for binding in self.bump_files() {
            visit(&binding.path, &binding.updater)?;
        }
        Ok(())
    }
}

/// Lexically normalize a path so spellings of one file compare equal
///
/// `.` components are dropped and `name/..` pairs collapse. The filesystem is
/// not consulted, so symlinks are not resolved.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sample_registry() -> UpdaterRegistry {
        UpdaterRegistry::new(
            vec![FileBinding::new("pyproject.toml", Updater::poetry())],
            vec![FileBinding::new("pkg/version.py", Updater::python())],
        )
        .unwrap()
    }

    #[test]
    fn test_package_files_are_bump_files() {
        let registry = sample_registry();
        let bump: Vec<&Path> = registry
            .bump_files()
            .iter()
            .map(|b| b.path.as_path())
            .collect();

        for package in registry.package_files() {
            assert!(bump.contains(&package.path.as_path()));
        }
        assert_eq!(
            bump,
            vec![Path::new("pyproject.toml"), Path::new("pkg/version.py")]
        );
    }

    #[test]
    fn test_duplicate_file_with_different_spelling_rejected() {
        for spelling in ["./pyproject.toml", "pkg/../pyproject.toml", "./pkg/./../pyproject.toml"] {
            let err = UpdaterRegistry::new(
                vec![FileBinding::new("pyproject.toml", Updater::poetry())],
                vec![FileBinding::new(spelling, Updater::python())],
            )
            .unwrap_err();
            assert!(
                matches!(err, ConfigError::DuplicateFile { ref file } if file == Path::new(spelling)),
                "expected DuplicateFile for {}, got {:?}",
                spelling,
                err
            );
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("./a/b")), PathBuf::from("a/b"));
        assert_eq!(normalize(Path::new("a/./b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize(Path::new("../a")), PathBuf::from("../a"));
        assert_eq!(normalize(Path::new("a/../../b")), PathBuf::from("../b"));
    }

    #[test]
    fn test_is_package_file() {
        let registry = sample_registry();
        assert!(registry.is_package_file(Path::new("pyproject.toml")));
        assert!(!registry.is_package_file(Path::new("pkg/version.py")));
    }

    #[test]
    fn test_for_each_package_file() {
        let registry = sample_registry();
        let mut visited = Vec::new();
        registry.for_each_package_file(|path, updater| {
            visited.push((path.to_path_buf(), updater.name().to_string()));
        });
        assert_eq!(
            visited,
            vec![(PathBuf::from("pyproject.toml"), "poetry".to_string())]
        );
    }

    #[test]
    fn test_for_each_bump_file_writes_each_once_in_order() {
        let registry = sample_registry();
        let mut files: HashMap<PathBuf, String> = HashMap::new();
        files.insert(
            PathBuf::from("pyproject.toml"),
            "[tool.poetry]\nversion = \"0.1.0\"\n".to_string(),
        );
        files.insert(
            PathBuf::from("pkg/version.py"),
            "__version__ = \"0.1.0\"\n".to_string(),
        );

        let mut order = Vec::new();
        registry.for_each_bump_file(|path, updater| {
            order.push(path.to_path_buf());
            let content = files.get_mut(path).unwrap();
            *content = updater.write_version(content, "0.2.0");
        });

        assert_eq!(
            order,
            vec![
                PathBuf::from("pyproject.toml"),
                PathBuf::from("pkg/version.py")
            ]
        );
        assert_eq!(
            files[Path::new("pyproject.toml")],
            "[tool.poetry]\nversion = \"0.2.0\"\n"
        );
        assert_eq!(files[Path::new("pkg/version.py")], "__version__ = \"0.2.0\"\n");
    }

    #[test]
    fn test_try_for_each_bump_file_stops_on_error() {
        let registry = sample_registry();
        let mut visited = Vec::new();
        let result: Result<(), String> = registry.try_for_each_bump_file(|path, _| {
            visited.push(path.to_path_buf());
            Err(format!("cannot read {}", path.display()))
        });

        assert_eq!(result.unwrap_err(), "cannot read pyproject.toml");
        assert_eq!(visited, vec![PathBuf::from("pyproject.toml")]);
    }

    #[test]
    fn test_single() {
        let registry =
            UpdaterRegistry::single(FileBinding::new("pyproject.toml", Updater::poetry()));
        assert_eq!(registry.package_files().len(), 1);
        assert_eq!(registry.bump_files().len(), 1);
    }

    #[test]
    fn test_multiple_package_files() {
        let registry = UpdaterRegistry::new(
            vec![
                FileBinding::new("pyproject.toml", Updater::poetry()),
                FileBinding::new("other/pyproject.toml", Updater::poetry()),
            ],
            Vec::new(),
        )
        .unwrap();
        assert_eq!(registry.package_files().len(), 2);
        assert_eq!(registry.bump_files().len(), 2);
    }

    #[test]
    fn test_requires_package_file() {
        let err = UpdaterRegistry::new(
            Vec::new(),
            vec![FileBinding::new("pkg/version.py", Updater::python())],
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::NoPackageFiles));
    }

    #[test]
    fn test_rejects_duplicate_file() {
        let err = UpdaterRegistry::new(
            vec![FileBinding::new("pyproject.toml", Updater::poetry())],
            vec![FileBinding::new("pyproject.toml", Updater::python())],
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateFile { .. }));
    }
}
