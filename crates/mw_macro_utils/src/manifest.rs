use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::SystemTime;
use std::{env, fs};

use toml_edit::{Document, TomlError};

const FACADE_NAME: &str = "memberwise";
const CRATE_PREFIX: &str = "mw_";
const DEPENDENCY_TABLES: [&str; 2] = ["dependencies", "dev-dependencies"];

/// The dependency names of the caller's Cargo.toml, used to locate a
/// `memberwise` crate from generated code.
///
/// Derive macros emit absolute paths, and the caller may depend on
/// `mw_mapping` directly or only through the `memberwise` facade.
///
/// # Example
///
/// ```rust
/// # use mw_macro_utils::Manifest;
/// let manifest = Manifest::parse("[dependencies]\nmemberwise = \"0.0.1\"\n").unwrap();
/// let path: syn::Path = manifest.get_crate_path("mw_mapping");
/// assert!(path.leading_colon.is_some());
/// assert_eq!(path.segments[0].ident, "memberwise");
/// assert_eq!(path.segments[1].ident, "mapping");
/// ```
///
/// # Resolution rules
///
/// `dependencies` is searched first, then `dev-dependencies`. In each table:
///
/// 1. A dependency on the requested crate itself gives `::crate_name`.
/// 2. For a `mw_`-prefixed crate, a dependency on `memberwise` gives
///    `::memberwise::short_name` (`mw_mapping` becomes `::memberwise::mapping`).
///
/// With no match the result is `::crate_name`. A crate referencing itself
/// lands there, so its root must carry `extern crate self as crate_name;`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    tables: [BTreeSet<String>; 2],
}

struct Cached {
    path: PathBuf,
    modified: Option<SystemTime>,
    manifest: Manifest,
}

impl Manifest {
    /// Collect the dependency names of a manifest's text.
    pub fn parse(text: &str) -> Result<Self, TomlError> {
        let document = Document::parse(text)?;
        let tables = DEPENDENCY_TABLES.map(|key| {
            document
                .get(key)
                .and_then(|item| item.as_table_like())
                .map(|table| table.iter().map(|(name, _)| name.to_owned()).collect())
                .unwrap_or_default()
        });
        Ok(Self { tables })
    }

    /// Return the path of the crate `name` as seen from this manifest.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        let short_name = name.strip_prefix(CRATE_PREFIX);
        for deps in &self.tables {
            if deps.contains(name) {
                return absolute_path(&[name]);
            }
            if let Some(short_name) = short_name
                && deps.contains(FACADE_NAME)
            {
                return absolute_path(&[FACADE_NAME, short_name]);
            }
        }
        absolute_path(&[name])
    }

    /// Run `func` on the manifest of the crate being compiled.
    ///
    /// The last manifest read is kept and read again only when its path or
    /// modification time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static CACHE: Mutex<Option<Cached>> = Mutex::new(None);

        let path = manifest_path();
        let modified = fs::metadata(&path).and_then(|meta| meta.modified()).ok();

        let mut cache = CACHE.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = cache.take();
        let cached = match previous {
            Some(cached) if cached.path == path && cached.modified == modified => cache.insert(cached),
            _ => {
                let manifest = Self::load(&path);
                cache.insert(Cached { path, modified, manifest })
            }
        };
        func(&cached.manifest)
    }

    fn load(path: &Path) -> Self {
        let text = fs::read_to_string(path)
            .unwrap_or_else(|err| panic!("cannot read `{}`: {err}", path.display()));
        Self::parse(&text).unwrap_or_else(|err| panic!("cannot parse `{}`: {err}", path.display()))
    }
}

fn manifest_path() -> PathBuf {
    let Some(dir) = env::var_os("CARGO_MANIFEST_DIR") else {
        panic!("`CARGO_MANIFEST_DIR` is not set, `memberwise` derives must be built by cargo");
    };
    PathBuf::from(dir).join("Cargo.toml")
}

fn absolute_path(segments: &[&str]) -> syn::Path {
    let text = format!("::{}", segments.join("::"));
    syn::parse_str(&text).unwrap_or_else(|err| panic!("`{text}` is not a valid path: {err}"))
}

#[cfg(test)]
mod tests {
    use super::Manifest;

    fn segments(manifest: &str, name: &str) -> Vec<String> {
        let path = Manifest::parse(manifest).unwrap().get_crate_path(name);
        assert!(path.leading_colon.is_some());
        path.segments.iter().map(|s| s.ident.to_string()).collect()
    }

    #[test]
    fn direct_dependency() {
        assert_eq!(segments("[dependencies]\nmw_mapping = \"0.0.1\"\n", "mw_mapping"), ["mw_mapping"]);
    }

    #[test]
    fn through_facade() {
        assert_eq!(
            segments("[dependencies]\nmemberwise = \"0.0.1\"\n", "mw_mapping"),
            ["memberwise", "mapping"]
        );
        assert_eq!(
            segments("dependencies = { memberwise = { path = \"..\" } }\n", "mw_mapping"),
            ["memberwise", "mapping"]
        );
    }

    #[test]
    fn dependencies_before_dev_dependencies() {
        let both = "[dependencies]\nmemberwise = \"0.0.1\"\n[dev-dependencies]\nmw_mapping = \"0.0.1\"\n";
        assert_eq!(segments(both, "mw_mapping"), ["memberwise", "mapping"]);

        let dev = "[dev-dependencies]\nmemberwise = \"0.0.1\"\n";
        assert_eq!(segments(dev, "mw_mapping"), ["memberwise", "mapping"]);
    }

    #[test]
    fn fallback() {
        let manifest = "[dependencies]\nserde = \"1\"\n";
        assert_eq!(segments(manifest, "mw_mapping"), ["mw_mapping"]);
        assert_eq!(segments("[dependencies]\nmemberwise = \"1\"\n", "other"), ["other"]);
        assert_eq!(segments("", "mw_mapping"), ["mw_mapping"]);
    }

    #[test]
    fn invalid_manifest() {
        assert!(Manifest::parse("[dependencies\n").is_err());
    }
}
