use std::{
    io::ErrorKind,
    path::PathBuf,
};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Error, Vehicles};

/// Backing storage for the whole vehicle registry.
/// Implementations read and write the full set at once; serializing writers
/// is the registry's job, not the store's.
#[async_trait]
pub trait VehicleStore: Send + Sync {
    async fn load(&self) -> Result<Vehicles, Error>;
    async fn save(&self, vehicles: &Vehicles) -> Result<(), Error>;
}

/// Registry persisted as a single JSON object keyed by vehicle id.
#[derive(Debug, Clone)]
pub struct FileVehicleStore {
    path: PathBuf,
}

impl FileVehicleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl VehicleStore for FileVehicleStore {
    async fn load(&self) -> Result<Vehicles, Error> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No registry file yet");
                return Ok(Vehicles::new());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    // Written to a sibling file first and renamed over the old one, so a
    // crash mid write leaves the previous registry intact.
    async fn save(&self, vehicles: &Vehicles) -> Result<(), Error> {
        let bytes = serde_json::to_vec(vehicles)?;
        let staging = self.staging_path();
        tokio::fs::write(&staging, bytes).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryVehicleStore {
    vehicles: RwLock<Vehicles>,
}

impl MemoryVehicleStore {
    pub fn new() -> Self {
        Default::default()
    }
}

#[async_trait]
impl VehicleStore for MemoryVehicleStore {
    async fn load(&self) -> Result<Vehicles, Error> {
        Ok(self.vehicles.read().await.clone())
    }

    async fn save(&self, vehicles: &Vehicles) -> Result<(), Error> {
        *self.vehicles.write().await = vehicles.clone();
        Ok(())
    }
}
