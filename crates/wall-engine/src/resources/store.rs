use std::any::Any;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::{Asset, ResourceError};

type StoredAsset = Arc<dyn Any + Send + Sync>;

/// Name-keyed cache of typed assets.
///
/// Absence is a normal state: `find` returns `None` for unknown names and for
/// names holding a different asset type. Entries are replaced wholesale on
/// re-attach; handles already given out keep the previous asset alive.
#[derive(Default)]
pub struct ResourceStore {
    entries: HashMap<String, StoredAsset>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `path`, decodes it as `T` and attaches it under `name`.
    pub fn load<T: Asset>(
        &mut self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Arc<T>, ResourceError> {
        let name = name.into();
        let path = path.as_ref();

        let bytes = std::fs::read(path).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let asset = T::decode(&name, &bytes)?;

        log::debug!("loaded asset `{name}` from {}", path.display());
        Ok(self.attach(name, asset))
    }

    /// Stores `asset` under `name`, replacing any previous entry.
    pub fn attach<T: Asset>(&mut self, name: impl Into<String>, asset: T) -> Arc<T> {
        self.attach_shared(name, Arc::new(asset))
    }

    /// Like [`attach`](Self::attach) for an asset that is already shared.
    pub fn attach_shared<T: Asset>(&mut self, name: impl Into<String>, asset: Arc<T>) -> Arc<T> {
        let name = name.into();
        if self.entries.insert(name.clone(), asset.clone()).is_some() {
            log::debug!("asset `{name}` replaced");
        }
        asset
    }

    pub fn find<T: Asset>(&self, name: &str) -> Option<Arc<T>> {
        self.entries.get(name)?.clone().downcast::<T>().ok()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for ResourceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceStore")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
