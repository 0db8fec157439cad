use std::{
    collections::HashMap,
    io::ErrorKind,
    path::PathBuf,
};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Error, Route, RouteRecord, validate_name};

/// Where route definitions live.
/// An unknown route is `Ok(None)`, never an error.
#[async_trait]
pub trait RouteStore: Send + Sync {
    async fn get(&self, name: &str) -> Result<Option<Route>, Error>;
    async fn put(&self, route: &Route) -> Result<(), Error>;
}

/// One `<name>.json` file per route inside a directory.
#[derive(Debug, Clone)]
pub struct FileRouteStore {
    dir: PathBuf,
}

impl FileRouteStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

#[async_trait]
impl RouteStore for FileRouteStore {
    async fn get(&self, name: &str) -> Result<Option<Route>, Error> {
        if validate_name(name).is_err() {
            return Ok(None);
        }
        let path = self.path_for(name);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(route = %name, "No route file at {}", path.display());
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };
        let record: RouteRecord = serde_json::from_slice(&bytes)?;
        Ok(Some(Route::from_record(name, record)))
    }

    async fn put(&self, route: &Route) -> Result<(), Error> {
        validate_name(route.name())?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let bytes = serde_json::to_vec_pretty(&route.to_record())?;
        tokio::fs::write(self.path_for(route.name()), bytes).await?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryRouteStore {
    routes: RwLock<HashMap<String, Route>>,
}

impl MemoryRouteStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_routes(routes: impl IntoIterator<Item = Route>) -> Self {
        Self {
            routes: RwLock::new(
                routes
                    .into_iter()
                    .map(|route| (route.name().to_string(), route))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl RouteStore for MemoryRouteStore {
    async fn get(&self, name: &str) -> Result<Option<Route>, Error> {
        Ok(self.routes.read().await.get(name).cloned())
    }

    async fn put(&self, route: &Route) -> Result<(), Error> {
        self.routes
            .write()
            .await
            .insert(route.name().to_string(), route.clone());
        Ok(())
    }
}
