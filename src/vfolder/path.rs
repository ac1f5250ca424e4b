//! Pootle path handling.
//!
//! Stores live at `/<language>/<project>/<dir>.../<file>`. Everything after the
//! `/<language>/<project>/` prefix is the store's *relative* path, which is what
//! filter rules are matched against.

use crate::error::{Result, VfolderError};

/// A pootle path broken into its components.
///
/// `dir` keeps a trailing slash when present (`"sub/dir/"`) and is empty for
/// files sitting directly in the translation project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PootlePath {
    pub language: String,
    pub project: String,
    pub dir: String,
    pub filename: String,
}

impl PootlePath {
    /// Parses a store path. A language, a project and a filename are required.
    pub fn parse(path: &str) -> Result<Self> {
        let invalid = || VfolderError::InvalidPath(path.to_string());

        let rest = path.strip_prefix('/').ok_or_else(invalid)?;
        let mut parts = rest.splitn(3, '/');
        let language = parts.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let project = parts.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let ctx = parts.next().ok_or_else(invalid)?;

        let (dir, filename) = match ctx.rfind('/') {
            Some(pos) => (&ctx[..=pos], &ctx[pos + 1..]),
            None => ("", ctx),
        };
        if filename.is_empty() || dir.starts_with('/') || dir.contains("//") {
            return Err(invalid());
        }

        Ok(Self {
            language: language.to_string(),
            project: project.to_string(),
            dir: dir.to_string(),
            filename: filename.to_string(),
        })
    }

    /// Path below the translation project, e.g. `glossary/terms.po`.
    pub fn relative(&self) -> String {
        format!("{}{}", self.dir, self.filename)
    }

    /// The pootle path of the containing directory, with trailing slash.
    pub fn parent(&self) -> String {
        format!("/{}/{}/{}", self.language, self.project, self.dir)
    }

    /// The translation project root, e.g. `/en/myproj/`.
    pub fn tp_root(&self) -> String {
        format!("/{}/{}/", self.language, self.project)
    }
}

impl std::fmt::Display for PootlePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}/{}/{}{}", self.language, self.project, self.dir, self.filename)
    }
}

/// Builds the virtual pootle path a folder exposes for a real directory:
/// `/en/proj/sub/dir/` seen through folder `vf` becomes `/en/proj/vf/sub/dir/`.
pub fn vfolder_path(directory: &str, folder_name: &str) -> Result<String> {
    let invalid = || VfolderError::InvalidPath(directory.to_string());

    let rest = directory
        .strip_prefix('/')
        .and_then(|r| r.strip_suffix('/'))
        .ok_or_else(invalid)?;
    let mut parts = rest.splitn(3, '/');
    let language = parts.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
    let project = parts.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;

    let mut path = format!("/{}/{}/{}/", language, project, folder_name);
    if let Some(dir) = parts.next().filter(|s| !s.is_empty()) {
        path.push_str(dir);
        path.push('/');
    }
    Ok(path)
}

/// Ancestors of a directory path, nearest first, stopping at the
/// translation project root (which is included).
pub fn ancestor_dirs(directory: &str) -> Vec<String> {
    let trimmed = directory.trim_end_matches('/');
    let segments: Vec<&str> = trimmed.split('/').collect();
    // ["", lang, proj, ...] -> the root is at len 3
    let mut out = Vec::new();
    let mut end = segments.len();
    while end > 3 {
        end -= 1;
        out.push(format!("{}/", segments[..end].join("/")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_store_path() {
        let p = PootlePath::parse("/en/myproj/glossary/sub/terms.po").unwrap();
        assert_eq!(p.language, "en");
        assert_eq!(p.project, "myproj");
        assert_eq!(p.dir, "glossary/sub/");
        assert_eq!(p.filename, "terms.po");
        assert_eq!(p.relative(), "glossary/sub/terms.po");
        assert_eq!(p.parent(), "/en/myproj/glossary/sub/");
        assert_eq!(p.to_string(), "/en/myproj/glossary/sub/terms.po");
    }

    #[test]
    fn parses_top_level_store_path() {
        let p = PootlePath::parse("/fr/proj/app.po").unwrap();
        assert_eq!(p.dir, "");
        assert_eq!(p.relative(), "app.po");
        assert_eq!(p.parent(), "/fr/proj/");
        assert_eq!(p.tp_root(), "/fr/proj/");
    }

    #[test]
    fn rejects_incomplete_paths() {
        for bad in ["", "en/proj/a.po", "/en/", "/en/proj/", "/en/proj/dir/", "//proj/a.po", "/en/proj//a.po"] {
            assert!(
                matches!(PootlePath::parse(bad), Err(VfolderError::InvalidPath(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn vfolder_path_inserts_folder_name() {
        assert_eq!(
            vfolder_path("/en/proj/sub/dir/", "docs").unwrap(),
            "/en/proj/docs/sub/dir/"
        );
        assert_eq!(vfolder_path("/en/proj/", "docs").unwrap(), "/en/proj/docs/");
        assert!(vfolder_path("/en/", "docs").is_err());
    }

    #[test]
    fn ancestors_stop_at_project_root() {
        assert_eq!(
            ancestor_dirs("/en/proj/a/b/"),
            vec!["/en/proj/a/".to_string(), "/en/proj/".to_string()]
        );
        assert!(ancestor_dirs("/en/proj/").is_empty());
    }
}
