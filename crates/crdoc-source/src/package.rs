//! Go package loading
//!
//! A package is every `.go` file directly inside a directory, test files
//! excluded. Only exported declarations are kept, the way `go doc` shows
//! a package.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crdoc_core::{FieldDecl, PackageDecl, TypeDecl};

use crate::ast::SourceFile;
use crate::error::{Result, SourceError};
use crate::parser;

/// Load the Go package in `dir`
pub fn load_package(dir: &Path) -> Result<PackageDecl> {
    if !dir.is_dir() {
        return Err(SourceError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for path in go_files(dir)? {
        let content = fs::read_to_string(&path).map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;
        let file = parser::parse(&content).map_err(|source| SourceError::Parse {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(
            path = %path.display(),
            package = %file.package,
            types = file.types.len(),
            "parsed source file"
        );
        files.push((path, file));
    }

    assemble(dir, files)
}

/// Non-test `.go` files directly inside `dir`, sorted by name
fn go_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| SourceError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if name.ends_with(".go") && !name.ends_with("_test.go") {
            paths.push(entry.into_path());
        }
    }

    Ok(paths)
}

/// Merge parsed files into a single package
pub fn assemble(dir: &Path, files: Vec<(PathBuf, SourceFile)>) -> Result<PackageDecl> {
    let mut files = files.into_iter();
    let Some((_, first)) = files.next() else {
        return Err(SourceError::NoGoFiles(dir.to_path_buf()));
    };

    let mut package = PackageDecl {
        name: first.package.clone(),
        doc: String::new(),
        types: Vec::new(),
    };

    for file in std::iter::once(first).chain(files.map(|(_, file)| file)) {
        if file.package != package.name {
            return Err(SourceError::PackageMismatch {
                dir: dir.to_path_buf(),
                first: package.name,
                second: file.package,
            });
        }

        if !file.doc.is_empty() {
            if !package.doc.is_empty() {
                package.doc.push('\n');
            }
            package.doc.push_str(&file.doc);
        }

        package
            .types
            .extend(file.types.into_iter().filter_map(exported_type));
    }

    package.types.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(package)
}

fn exported_type(mut decl: TypeDecl) -> Option<TypeDecl> {
    if !is_exported(&decl.name) {
        return None;
    }
    decl.fields.retain(is_exported_field);
    Some(decl)
}

fn is_exported_field(field: &FieldDecl) -> bool {
    match &field.ident {
        Some(ident) => is_exported(ident),
        None => field.expr.bare_name().is_some_and(is_exported),
    }
}

fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crdoc_core::TypeExpr;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn test_load_package() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "doc.go",
            "// Package v1 is an API.\n// +groupName=example.io\npackage v1\n",
        );
        write(
            &dir,
            "types.go",
            "package v1\n\ntype Zeta struct {\n\tName string `json:\"name\"`\n}\n\ntype Alpha struct {\n\tinner\n\tSize int `json:\"size\"`\n\tcount int\n}\n\ntype hidden struct{}\n",
        );
        write(
            &dir,
            "types_test.go",
            "package v1_test\n\nfunc TestNothing(t *testing.T) {}\n",
        );
        write(&dir, "README.md", "# not go\n");

        let pkg = load_package(dir.path()).unwrap();

        assert_eq!(pkg.name, "v1");
        assert_eq!(pkg.doc, "Package v1 is an API.\n+groupName=example.io\n");

        let names: Vec<&str> = pkg.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);

        let alpha = &pkg.types[0];
        assert_eq!(alpha.fields.len(), 1);
        assert_eq!(alpha.fields[0].ident.as_deref(), Some("Size"));
        assert_eq!(alpha.fields[0].expr, TypeExpr::Ident("int".to_string()));
    }

    #[test]
    fn test_load_package_merges_docs() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.go", "// First.\npackage v1\n");
        write(&dir, "b.go", "// Second.\npackage v1\n");

        let pkg = load_package(dir.path()).unwrap();
        assert_eq!(pkg.doc, "First.\n\nSecond.\n");
    }

    #[test]
    fn test_load_package_mismatch() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.go", "package v1\n");
        write(&dir, "b.go", "package v2\n");

        let err = load_package(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            SourceError::PackageMismatch { ref first, ref second, .. } if first == "v1" && second == "v2"
        ));
    }

    #[test]
    fn test_load_package_no_files() {
        let dir = TempDir::new().unwrap();
        write(&dir, "only_test.go", "package v1\n");

        let err = load_package(dir.path()).unwrap_err();
        assert!(matches!(err, SourceError::NoGoFiles(_)));
    }

    #[test]
    fn test_load_package_missing_dir() {
        let err = load_package(Path::new("/nonexistent/crdoc/api")).unwrap_err();
        assert!(matches!(err, SourceError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_load_package_parse_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "broken.go", "package v1\n\ntype A struct {\n");

        let err = load_package(dir.path()).unwrap_err();
        match err {
            SourceError::Parse { path, .. } => assert!(path.ends_with("broken.go")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_embedded_exported_field_kept() {
        let file = parser::parse(
            "package v1\n\ntype A struct {\n\tmetav1.TypeMeta `json:\",inline\"`\n\t*Base `json:\",inline\"`\n}\n",
        )
        .unwrap();
        let pkg = assemble(Path::new("."), vec![(PathBuf::from("a.go"), file)]).unwrap();
        assert_eq!(pkg.types[0].fields.len(), 2);
    }
}
