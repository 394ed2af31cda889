/*!
Fixture de stats sur disque

Chaque `StatsFixture` possède son propre répertoire temporaire, ce qui permet
de lancer les tests en parallèle sans partage d'état.
*/

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Contenu d'un fichier de stats tel que produit par l'export énergie
#[derive(Debug, Serialize)]
struct StatsPayload<'a> {
    data: StatsData<'a>,
}

#[derive(Debug, Serialize)]
struct StatsData<'a> {
    #[serde(rename = "AccumulatedActiveEnergyDelivered")]
    accumulated_active_energy_delivered: &'a [Value],
}

/// Arborescence de stats temporaire : `<root>/<folder>/<fichier>.json`
pub struct StatsFixture {
    dir: TempDir,
}

impl StatsFixture {
    /// Crée une racine vide
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("energy-stats-")
            .tempdir()
            .context("création du répertoire temporaire")?;
        Ok(Self { dir })
    }

    /// Racine à passer à la config du kernel
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Crée (si besoin) le dossier d'un type et retourne son chemin
    pub fn folder(&self, folder: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(folder);
        fs::create_dir_all(&path).with_context(|| format!("création de {}", path.display()))?;
        Ok(path)
    }

    /// Écrit un fichier de stats contenant les relevés donnés
    pub fn write_readings(&self, folder: &str, file_name: &str, readings: &[Value]) -> Result<PathBuf> {
        let payload = StatsPayload {
            data: StatsData { accumulated_active_energy_delivered: readings },
        };
        let body = serde_json::to_string_pretty(&payload)?;
        self.write_raw(folder, file_name, &body)
    }

    /// Écrit un fichier au contenu arbitraire (JSON cassé, structure inattendue...)
    pub fn write_raw(&self, folder: &str, file_name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.folder(folder)?.join(file_name);
        fs::write(&path, contents).with_context(|| format!("écriture de {}", path.display()))?;
        Ok(path)
    }

    /// Supprime le dossier d'un type (simule un montage absent)
    pub fn remove_folder(&self, folder: &str) -> Result<()> {
        let path = self.dir.path().join(folder);
        if path.exists() {
            fs::remove_dir_all(&path)?;
        }
        Ok(())
    }
}

/// Relevé minimal `{"ts": <ts>, "value": <ts * 10>}`
pub fn reading(ts: i64) -> Value {
    json!({ "ts": ts, "value": ts * 10 })
}

/// Suite de relevés minimaux, dans l'ordre donné
pub fn readings(ts: &[i64]) -> Vec<Value> {
    ts.iter().copied().map(reading).collect()
}
