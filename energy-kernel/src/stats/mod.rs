/**
 * STATS - Résolution des fichiers de relevés énergétiques
 *
 * RÔLE :
 * Ce module répond aux trois questions de l'API énergie à partir des
 * fichiers JSON déposés par l'export (un dossier par type d'équipement) :
 * - quelles dates sont disponibles pour un type ?
 * - quel est l'historique complet d'un type ?
 * - quels sont les relevés d'un type pour une date ?
 *
 * FONCTIONNEMENT :
 * - locator   : candidats `<prefix>_<date>_<fenêtre>.json` et lecture directe
 * - extractor : `data.AccumulatedActiveEnergyDelivered` → relevés
 * - resolver  : précédence journée complète / fusion matin + après-midi
 * - catalog   : dates distinctes via motif de nom de fichier
 * - aggregator: tous les fichiers du type, triés par `ts`
 *
 * Aucun cache ni état partagé mutable : chaque requête relit le disque.
 */

use crate::config::{EquipmentType, KernelConfig};
use crate::error::{EnergyError, EnergyResult};
use crate::models::{DateKey, Reading};
use aggregator::Aggregator;
use catalog::CatalogScanner;
use resolver::DayResolver;
use std::sync::Arc;

pub mod aggregator;
pub mod catalog;
pub mod extractor;
pub mod locator;
pub mod resolver;

/// Point d'entrée unique utilisé par la couche HTTP
#[derive(Clone)]
pub struct StatsService {
    config: Arc<KernelConfig>,
    resolver: DayResolver,
    catalog: CatalogScanner,
    aggregator: Aggregator,
}

impl StatsService {
    pub fn new(config: Arc<KernelConfig>) -> Self {
        Self {
            resolver: DayResolver::new(config.clone()),
            catalog: CatalogScanner::new(config.clone()),
            aggregator: Aggregator::new(config.clone()),
            config,
        }
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Type connu ou `UnknownType` (toujours vérifié en premier)
    pub fn equipment(&self, kind: &str) -> EnergyResult<&EquipmentType> {
        self.config
            .equipment(kind)
            .ok_or_else(|| EnergyError::UnknownType(kind.to_string()))
    }

    pub async fn all(&self, kind: &str) -> EnergyResult<Vec<Reading>> {
        let ty = self.equipment(kind)?;
        self.aggregator.aggregate_all(ty).await
    }

    pub async fn dates(&self, kind: &str) -> EnergyResult<Vec<DateKey>> {
        let ty = self.equipment(kind)?;
        self.catalog.list_dates(ty).await
    }

    pub async fn day(&self, kind: &str, date: &str) -> EnergyResult<Vec<Reading>> {
        let ty = self.equipment(kind)?;
        // une date hors format ne peut nommer aucun fichier
        let date = DateKey::parse(date).ok_or_else(|| EnergyError::InvalidDate(date.to_string()))?;
        self.resolver.resolve(ty, &date).await
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{fixture_config, ts_of};
    use super::*;
    use energy_devkit::{readings, StatsFixture};

    #[tokio::test]
    async fn test_unknown_type_checked_first() {
        let fx = StatsFixture::new().unwrap();
        let svc = StatsService::new(fixture_config(&fx));

        assert!(matches!(svc.all("unknown").await, Err(EnergyError::UnknownType(_))));
        assert!(matches!(svc.dates("unknown").await, Err(EnergyError::UnknownType(_))));
        // même avec une date invalide, le type passe d'abord
        assert!(matches!(svc.day("unknown", "pas-une-date").await, Err(EnergyError::UnknownType(_))));
    }

    #[tokio::test]
    async fn test_invalid_date_never_hits_disk() {
        let fx = StatsFixture::new().unwrap();
        let svc = StatsService::new(fixture_config(&fx));
        // dossier TGBT absent : une date valide donnerait UpstreamIo
        assert!(matches!(svc.day("tgbt", "..").await, Err(EnergyError::InvalidDate(_))));
    }

    #[tokio::test]
    async fn test_case_insensitive_type() {
        let fx = StatsFixture::new().unwrap();
        fx.write_readings("Climatisations", "Climatisation_20250601_00_to_23_59.json", &readings(&[4, 2]))
            .unwrap();
        let svc = StatsService::new(fixture_config(&fx));

        let day = svc.day("CLIMATISATION", "20250601").await.unwrap();
        assert_eq!(ts_of(&day), vec![4.0, 2.0]);
        let all = svc.all("Climatisation").await.unwrap();
        assert_eq!(ts_of(&all), vec![2.0, 4.0]);
        let dates = svc.dates("climatisation").await.unwrap();
        assert_eq!(dates, vec![DateKey::parse("20250601").unwrap()]);
    }
}
