/**
 * DAY RESOLVER - Relevés d'un type pour une date donnée
 *
 * PRÉCÉDENCE :
 * 1. Fichier journée complète → ses relevés tels quels (JSON invalide = erreur 500)
 * 2. Sinon matin puis après-midi, chacun dans l'ordre du fichier, sans re-tri
 *    par `ts` (contrairement à l'historique complet). Un fichier partiel
 *    au JSON invalide est journalisé et ne contribue rien ; un fichier
 *    présent mais illisible (permissions, E/S) fait échouer la requête.
 * 3. Rien d'exploitable → NotFound
 */

use super::extractor::extract;
use super::locator::{FileLocator, Location};
use crate::config::{EquipmentType, KernelConfig};
use crate::error::{EnergyError, EnergyResult};
use crate::models::{DateKey, Reading};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct DayResolver {
    locator: FileLocator,
}

impl DayResolver {
    pub fn new(config: Arc<KernelConfig>) -> Self {
        Self { locator: FileLocator::new(config) }
    }

    pub async fn resolve(&self, ty: &EquipmentType, date: &DateKey) -> EnergyResult<Vec<Reading>> {
        let not_found = || EnergyError::NotFound { kind: ty.id.clone(), date: date.to_string() };

        match self.locator.locate(ty, date).await? {
            Location::FullDay(file) => {
                debug!(file = %file.name, "lecture du fichier complet");
                extract(&file)
            }
            Location::Partial { morning, afternoon } => {
                let mut merged = Vec::new();
                for file in [morning, afternoon].into_iter().flatten() {
                    match extract(&file) {
                        Ok(readings) => merged.extend(readings),
                        Err(e) => warn!(file = %file.name, error = %e, "fichier partiel ignoré"),
                    }
                }
                if merged.is_empty() {
                    return Err(not_found());
                }
                info!(kind = %ty.id, %date, entries = merged.len(), "fichiers partiels combinés");
                Ok(merged)
            }
            Location::NotFound => Err(not_found()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::testing::{fixture_config, ts_of};
    use energy_devkit::{readings, StatsFixture};

    async fn resolve(fx: &StatsFixture, kind: &str, date: &str) -> EnergyResult<Vec<Reading>> {
        let cfg = fixture_config(fx);
        let ty = cfg.equipment(kind).unwrap().clone();
        DayResolver::new(cfg).resolve(&ty, &DateKey::parse(date).unwrap()).await
    }

    #[tokio::test]
    async fn test_full_day_wins_over_partials() {
        let fx = StatsFixture::new().unwrap();
        fx.write_readings("TGBT", "TGBT_20250601_00_to_23_59_59.json", &readings(&[1, 2])).unwrap();
        fx.write_readings("TGBT", "TGBT_20250601_00_to_12.json", &readings(&[9])).unwrap();

        let out = resolve(&fx, "tgbt", "20250601").await.unwrap();
        assert_eq!(ts_of(&out), vec![1.0, 2.0]);
    }

    #[tokio::test]
    async fn test_morning_then_afternoon_not_resorted() {
        let fx = StatsFixture::new().unwrap();
        fx.write_readings("TGBT", "TGBT_20250602_00_to_12.json", &readings(&[5, 3])).unwrap();
        fx.write_readings("TGBT", "TGBT_20250602_12_to_23_59.json", &readings(&[7, 1])).unwrap();

        let out = resolve(&fx, "tgbt", "20250602").await.unwrap();
        assert_eq!(ts_of(&out), vec![5.0, 3.0, 7.0, 1.0]);
    }

    #[tokio::test]
    async fn test_invalid_partial_is_skipped() {
        let fx = StatsFixture::new().unwrap();
        fx.write_raw("TGBT", "TGBT_20250602_00_to_12.json", "{ pas du json").unwrap();
        fx.write_readings("TGBT", "TGBT_20250602_12_to_23_59.json", &readings(&[7])).unwrap();

        let out = resolve(&fx, "tgbt", "20250602").await.unwrap();
        assert_eq!(ts_of(&out), vec![7.0]);
    }

    #[tokio::test]
    async fn test_unreadable_partial_is_fatal() {
        let fx = StatsFixture::new().unwrap();
        // un dossier à la place du fichier matin : lecture en échec (EISDIR)
        fx.folder("TGBT/TGBT_20250602_00_to_12.json").unwrap();
        fx.write_readings("TGBT", "TGBT_20250602_12_to_23_59.json", &readings(&[7])).unwrap();

        let err = resolve(&fx, "tgbt", "20250602").await.unwrap_err();
        match err {
            EnergyError::Read { file, .. } => assert!(file.ends_with("TGBT_20250602_00_to_12.json")),
            other => panic!("attendu Read, obtenu {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_full_day_is_fatal() {
        let fx = StatsFixture::new().unwrap();
        fx.write_raw("TGBT", "TGBT_20250601_00_to_23_59.json", "{ pas du json").unwrap();
        fx.write_readings("TGBT", "TGBT_20250601_00_to_12.json", &readings(&[9])).unwrap();

        let err = resolve(&fx, "tgbt", "20250601").await.unwrap_err();
        assert!(matches!(err, EnergyError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_full_day_without_readings_field_is_empty() {
        let fx = StatsFixture::new().unwrap();
        fx.write_raw("TGBT", "TGBT_20250601_00_to_23_59_59.json", r#"{"data":{}}"#).unwrap();

        let out = resolve(&fx, "tgbt", "20250601").await.unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_not_found_cases() {
        let fx = StatsFixture::new().unwrap();
        fx.folder("TGBT").unwrap();
        // aucun fichier
        let err = resolve(&fx, "tgbt", "20250605").await.unwrap_err();
        assert!(matches!(&err, EnergyError::NotFound { kind, date } if kind == "tgbt" && date == "20250605"));

        // deux partiels inexploitables
        fx.write_raw("TGBT", "TGBT_20250606_00_to_12.json", "oops").unwrap();
        fx.write_raw("TGBT", "TGBT_20250606_12_to_23_59.json", r#"{"data":{}}"#).unwrap();
        let err = resolve(&fx, "tgbt", "20250606").await.unwrap_err();
        assert!(matches!(err, EnergyError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_missing_folder_is_upstream_not_not_found() {
        let fx = StatsFixture::new().unwrap();
        let err = resolve(&fx, "climatisation", "20250601").await.unwrap_err();
        assert!(matches!(err, EnergyError::UpstreamIo { .. }));
    }

    #[tokio::test]
    async fn test_resolve_is_idempotent() {
        let fx = StatsFixture::new().unwrap();
        fx.write_readings("TGBT", "TGBT_20250602_00_to_12.json", &readings(&[5])).unwrap();
        fx.write_readings("TGBT", "TGBT_20250602_12_to_23_59.json", &readings(&[7])).unwrap();

        let first = resolve(&fx, "tgbt", "20250602").await.unwrap();
        let second = resolve(&fx, "tgbt", "20250602").await.unwrap();
        assert_eq!(first, second);
    }
}
