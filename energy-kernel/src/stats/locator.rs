/**
 * FILE LOCATOR - Recherche des fichiers de stats d'une journée
 *
 * FONCTIONNEMENT :
 * - Journée complète : `00_to_23_59_59` puis `00_to_23_59`, le premier trouvé gagne
 * - Sinon matin (`00_to_12`) et après-midi (`12_to_23_59`) indépendamment
 * - Chaque candidat est lu directement : un NotFound à la lecture = absent
 *   (pas de test d'existence préalable, donc pas de course check/lecture)
 */

use crate::config::{EquipmentType, KernelConfig};
use crate::error::{EnergyError, EnergyResult};
use crate::models::{DateKey, Window};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::debug;

/// Fichier de stats lu depuis le disque
#[derive(Debug, Clone)]
pub struct StatsFile {
    pub name: String,
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

#[derive(Debug)]
pub enum Location {
    FullDay(StatsFile),
    Partial {
        morning: Option<StatsFile>,
        afternoon: Option<StatsFile>,
    },
    NotFound,
}

#[derive(Clone)]
pub struct FileLocator {
    config: Arc<KernelConfig>,
}

impl FileLocator {
    pub fn new(config: Arc<KernelConfig>) -> Self {
        Self { config }
    }

    pub async fn locate(&self, ty: &EquipmentType, date: &DateKey) -> EnergyResult<Location> {
        let dir = self.config.folder_of(ty);
        ensure_dir(&dir).await?;

        for window in Window::FULL_DAY_PRIORITY {
            let name = window.file_name(&ty.prefix, date);
            if let Some(file) = read_stats_file(&dir, &name).await? {
                debug!(file = %name, "fichier complet trouvé");
                return Ok(Location::FullDay(file));
            }
        }

        let morning = find_partial(&dir, Window::Morning.file_name(&ty.prefix, date)).await?;
        let afternoon = find_partial(&dir, Window::Afternoon.file_name(&ty.prefix, date)).await?;

        if morning.is_none() && afternoon.is_none() {
            return Ok(Location::NotFound);
        }
        Ok(Location::Partial { morning, afternoon })
    }
}

/// Seul un NotFound compte comme absent ; toute autre erreur de lecture remonte
async fn find_partial(dir: &Path, name: String) -> EnergyResult<Option<StatsFile>> {
    let file = read_stats_file(dir, &name).await?;
    if file.is_some() {
        debug!(file = %name, "fichier partiel trouvé");
    }
    Ok(file)
}

/// Lit `<dir>/<name>` ; `Ok(None)` si le fichier n'existe pas
pub async fn read_stats_file(dir: &Path, name: &str) -> EnergyResult<Option<StatsFile>> {
    let path = dir.join(name);
    match fs::read(&path).await {
        Ok(contents) => Ok(Some(StatsFile { name: name.to_string(), path, contents })),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(EnergyError::Read { file: path, source }),
    }
}

/// Le dossier du type doit exister et être un dossier
pub async fn ensure_dir(dir: &Path) -> EnergyResult<()> {
    let meta = fs::metadata(dir).await.map_err(|source| EnergyError::UpstreamIo {
        dir: dir.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(EnergyError::UpstreamIo {
            dir: dir.to_path_buf(),
            source: std::io::Error::other("not a directory"),
        });
    }
    Ok(())
}

/// Noms (UTF-8) des entrées d'un dossier, triés
pub async fn list_file_names(dir: &Path) -> EnergyResult<Vec<String>> {
    let upstream = |source| EnergyError::UpstreamIo { dir: dir.to_path_buf(), source };

    let mut entries = fs::read_dir(dir).await.map_err(upstream)?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(upstream)? {
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => debug!(name = ?raw, "nom de fichier non UTF-8 ignoré"),
        }
    }
    names.sort();
    Ok(names)
}
