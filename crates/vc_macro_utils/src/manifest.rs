use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;
use std::{env, fs};

use proc_macro2::Span;
use toml_edit::{Document, Item, Table};

/// Name of the crate that re-exports every `vc_*` crate of the workspace.
pub const UMBRELLA_CRATE: &str = "vc_mapper";

const PREFIX: &str = "vc_";
const DEPENDENCY_TABLES: [&str; 2] = ["dependencies", "dev-dependencies"];

/// The parsed `Cargo.toml` of the crate that invokes a derive macro.
///
/// Derive output has to name `vc_reflect` the way the invoking crate sees it:
///
/// - a direct dependency on `vc_reflect` gives `::vc_reflect`;
/// - a dependency on the umbrella crate gives `::vc_mapper::reflect`;
/// - anything else falls back to `::vc_reflect`.
///
/// `dependencies` is searched before `dev-dependencies`.
///
/// ```
/// # use vc_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.crate_path("vc_reflect"));
/// assert!(path.leading_colon.is_some());
/// ```
///
/// Crates that use the derive on their own types should add
/// `extern crate self as vc_reflect;` to their root.
#[derive(Debug)]
pub struct Manifest {
    document: Option<Document<Box<str>>>,
    modified: Option<SystemTime>,
}

impl Manifest {
    fn load(path: &PathBuf) -> Self {
        let modified = fs::metadata(path).and_then(|m| m.modified()).ok();
        let document = fs::read_to_string(path)
            .ok()
            .and_then(|text| Document::parse(text.into_boxed_str()).ok());
        Self { document, modified }
    }

    fn tables(&self) -> impl Iterator<Item = &Table> {
        DEPENDENCY_TABLES.iter().filter_map(|name| {
            match self.document.as_ref().and_then(|doc| doc.get(name)) {
                Some(Item::Table(table)) => Some(table),
                _ => None,
            }
        })
    }

    fn absolute(segments: &[&str]) -> syn::Path {
        let mut path = syn::Path {
            leading_colon: Some(Default::default()),
            segments: Default::default(),
        };
        for segment in segments {
            path.segments
                .push(syn::Ident::new(segment, Span::call_site()).into());
        }
        path
    }

    /// Resolves the path under which `name` is reachable from the invoking crate.
    pub fn crate_path(&self, name: &str) -> syn::Path {
        for table in self.tables() {
            if table.contains_key(name) {
                return Self::absolute(&[name]);
            }
            if let Some(short) = name.strip_prefix(PREFIX)
                && table.contains_key(UMBRELLA_CRATE)
            {
                return Self::absolute(&[UMBRELLA_CRATE, short]);
            }
        }
        Self::absolute(&[name])
    }

    /// Runs `func` with the manifest of the crate being compiled.
    ///
    /// Parsed manifests are cached per path and reloaded when the file changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static CACHE: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = env::var_os("CARGO_MANIFEST_DIR")
            .map(PathBuf::from)
            .unwrap_or_default()
            .join("Cargo.toml");
        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok();

        {
            let cache = CACHE.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = cache.get(&path)
                && manifest.modified == modified
            {
                return func(manifest);
            }
        }

        let manifest = Self::load(&path);
        let result = func(&manifest);
        CACHE
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);
        result
    }
}
