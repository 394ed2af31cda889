use super::extractor::extract;
use super::locator::{list_file_names, read_stats_file};
use crate::config::{EquipmentType, KernelConfig};
use crate::error::EnergyResult;
use crate::models::{cmp_by_ts, Reading};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Historique complet d'un type : tous les fichiers `<prefix>*.json`,
/// sans contrôle du suffixe de date, triés par `ts` croissant.
#[derive(Clone)]
pub struct Aggregator {
    config: Arc<KernelConfig>,
}

impl Aggregator {
    pub fn new(config: Arc<KernelConfig>) -> Self {
        Self { config }
    }

    pub async fn aggregate_all(&self, ty: &EquipmentType) -> EnergyResult<Vec<Reading>> {
        let dir = self.config.folder_of(ty);
        let names = list_file_names(&dir).await?;

        let mut all = Vec::new();
        let mut files = 0usize;
        for name in names.iter().filter(|n| n.starts_with(&ty.prefix) && n.ends_with(".json")) {
            let file = match read_stats_file(&dir, name).await {
                Ok(Some(file)) => file,
                Ok(None) => {
                    debug!(file = %name, "fichier disparu depuis le listing");
                    continue;
                }
                Err(e) => {
                    warn!(file = %name, error = %e, "fichier ignoré");
                    continue;
                }
            };
            match extract(&file) {
                Ok(readings) => {
                    files += 1;
                    all.extend(readings);
                }
                Err(e) => warn!(file = %name, error = %e, "erreur parsing fichier"),
            }
        }

        // tri stable : à ts égal, l'ordre des fichiers (par nom) est conservé
        all.sort_by(cmp_by_ts);
        info!(kind = %ty.id, files, entries = all.len(), "historique agrégé");
        Ok(all)
    }
}
