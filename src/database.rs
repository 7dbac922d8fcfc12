use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Serialized syntax tree of one source file, as produced by a parser.
#[salsa::input(debug)]
pub struct SourceTree {
    #[returns(ref)]
    pub path: PathBuf,
    #[returns(ref)]
    pub text: String,
}

#[derive(Default, Clone)]
#[salsa::db]
pub struct RulangDatabaseImpl {
    storage: salsa::Storage<Self>,
    /// Loaded trees, keyed by canonical path.
    files: Arc<DashMap<PathBuf, SourceTree>>,
}

#[salsa::db]
impl salsa::Database for RulangDatabaseImpl {}

impl RulangDatabaseImpl {
    /// Load a tree file, reusing the existing input if it was loaded before.
    pub fn input(
        &self,
        path: PathBuf,
    ) -> Result<SourceTree, Box<dyn std::error::Error + Send + Sync>> {
        let path = path.canonicalize()?;
        match self.files.entry(path.clone()) {
            Entry::Occupied(entry) => Ok(*entry.get()),
            Entry::Vacant(entry) => {
                let contents = std::fs::read_to_string(&path)?;
                tracing::debug!(path = %path.display(), bytes = contents.len(), "Loaded syntax tree");
                let source = SourceTree::new(self, path, contents);
                Ok(*entry.insert(source))
            }
        }
    }

    /// Number of distinct files loaded so far.
    pub fn loaded_files(&self) -> usize {
        self.files.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_reuses_loaded_file() {
        let db = RulangDatabaseImpl::default();
        let demos = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos");

        let first = db.input(demos.join("hello.json")).expect("demo should load");
        let second = db
            .input(demos.join("..").join("demos").join("hello.json"))
            .expect("demo should load");

        assert_eq!(first, second);
        assert_eq!(db.loaded_files(), 1);
        assert!(first.text(&db).contains("\"Package\""));
    }

    #[test]
    fn test_input_reports_missing_file() {
        let db = RulangDatabaseImpl::default();
        assert!(db.input(PathBuf::from("does/not/exist.json")).is_err());
        assert_eq!(db.loaded_files(), 0);
    }
}
