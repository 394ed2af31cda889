/**
 * CONFIGURATION KERNEL - Racine des stats + table des types d'équipement
 *
 * RÔLE :
 * Valeur immuable construite au démarrage puis partagée (Arc) avec chaque
 * composant. Aucun état global : les tests passent leur propre racine.
 *
 * SOURCES (par ordre de priorité) :
 * - Variables d'environnement ENERGY_STATS_ROOT / ENERGY_LISTEN_ADDR
 * - Fichier YAML (ENERGY_KERNEL_CONFIG, défaut "energy.yaml")
 * - Valeurs par défaut (tgbt, climatisation, compresseurs)
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "energy.yaml";
pub const DEFAULT_LISTEN: &str = "0.0.0.0:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("lecture config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("config YAML invalide: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("adresse d'écoute invalide '{0}'")]
    Listen(String),
    #[error("type '{0}' déclaré plusieurs fois (clés identiques à la casse près)")]
    DuplicateType(String),
}

/// Type d'équipement : dossier de stockage + préfixe des fichiers
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EquipmentType {
    #[serde(skip)]
    pub id: String,
    pub folder: String,
    pub prefix: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct KernelConfig {
    pub root: PathBuf,
    #[serde(default = "default_listen")]
    pub listen: String,
    #[serde(default = "default_types")]
    pub types: BTreeMap<String, EquipmentType>,
}

fn default_listen() -> String {
    DEFAULT_LISTEN.into()
}

fn default_types() -> BTreeMap<String, EquipmentType> {
    [
        ("tgbt", "TGBT", "TGBT"),
        ("climatisation", "Climatisations", "Climatisation"),
        ("compresseurs", "Compresseurs", "Compresseurs"),
    ]
    .into_iter()
    .map(|(id, folder, prefix)| {
        (
            id.to_string(),
            EquipmentType { id: id.into(), folder: folder.into(), prefix: prefix.into() },
        )
    })
    .collect()
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./Stats"),
            listen: default_listen(),
            types: default_types(),
        }
    }
}

impl KernelConfig {
    /// Config par défaut pointant sur une autre racine (tests, CLI)
    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into(), ..Self::default() }
    }

    /// Clés en minuscules + id recopié dans chaque entrée.
    /// Deux clés égales à la casse près sont refusées.
    pub fn normalized(mut self) -> Result<Self, ConfigError> {
        let mut types = BTreeMap::new();
        for (key, mut t) in std::mem::take(&mut self.types) {
            let id = key.to_lowercase();
            if types.contains_key(&id) {
                return Err(ConfigError::DuplicateType(id));
            }
            t.id = id.clone();
            types.insert(id, t);
        }
        self.types = types;
        Ok(self)
    }

    /// Recherche insensible à la casse
    pub fn equipment(&self, id: &str) -> Option<&EquipmentType> {
        self.types.get(&id.to_lowercase())
    }

    /// Dossier d'un type sous la racine
    pub fn folder_of(&self, ty: &EquipmentType) -> PathBuf {
        self.root.join(&ty.folder)
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen.parse().map_err(|_| ConfigError::Listen(self.listen.clone()))
    }
}

/// Parse un contenu YAML ; un fichier vide donne la config par défaut
pub fn parse_config(txt: &str) -> Result<KernelConfig, ConfigError> {
    if txt.trim().is_empty() {
        return Ok(KernelConfig::default());
    }
    let cfg: KernelConfig = serde_yaml::from_str(txt)?;
    cfg.normalized()
}

pub async fn load_config() -> Result<KernelConfig, ConfigError> {
    let path = std::env::var("ENERGY_KERNEL_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let mut cfg = load_config_from(Path::new(&path)).await?;

    if let Ok(root) = std::env::var("ENERGY_STATS_ROOT") {
        cfg.root = PathBuf::from(root);
    }
    if let Ok(listen) = std::env::var("ENERGY_LISTEN_ADDR") {
        cfg.listen = listen;
    }
    Ok(cfg)
}

pub async fn load_config_from(path: &Path) -> Result<KernelConfig, ConfigError> {
    if !path.exists() {
        warn!(path = %path.display(), "pas de fichier de config, usage config par défaut");
        return Ok(KernelConfig::default());
    }
    let txt = fs::read_to_string(path).await.map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&txt)
}
