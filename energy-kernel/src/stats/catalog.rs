use super::locator::list_file_names;
use crate::config::{EquipmentType, KernelConfig};
use crate::error::EnergyResult;
use crate::models::{DateKey, Window};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::{Arc, LazyLock};

/// `_<date>_<fenêtre>.json`, à appliquer après le préfixe du type
static DATED_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    let windows: Vec<&str> = Window::ALL.iter().map(|w| w.token()).collect();
    let pattern = format!(r"^_(\d{{8}})_({})\.json$", windows.join("|"));
    Regex::new(&pattern).expect("motif de suffixe valide")
});

/// Date portée par un nom de fichier de stats, si le suffixe est reconnu
pub fn date_of(prefix: &str, file_name: &str) -> Option<DateKey> {
    let rest = file_name.strip_prefix(prefix)?;
    let caps = DATED_SUFFIX.captures(rest)?;
    DateKey::parse(caps.get(1)?.as_str())
}

#[derive(Clone)]
pub struct CatalogScanner {
    config: Arc<KernelConfig>,
}

impl CatalogScanner {
    pub fn new(config: Arc<KernelConfig>) -> Self {
        Self { config }
    }

    /// Dates distinctes disponibles pour un type, ordre croissant
    pub async fn list_dates(&self, ty: &EquipmentType) -> EnergyResult<Vec<DateKey>> {
        let names = list_file_names(&self.config.folder_of(ty)).await?;
        let dates: BTreeSet<DateKey> = names.iter().filter_map(|n| date_of(&ty.prefix, n)).collect();
        Ok(dates.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnergyError;
    use crate::stats::testing::fixture_config;
    use energy_devkit::{readings, StatsFixture};

    #[test]
    fn test_date_of_recognized_suffixes() {
        for suffix in ["00_to_12", "12_to_23_59", "00_to_23_59_59", "00_to_23_59"] {
            let name = format!("TGBT_20250601_{suffix}.json");
            assert_eq!(date_of("TGBT", &name).unwrap().as_str(), "20250601", "{name}");
        }
    }

    #[test]
    fn test_date_of_rejects_other_names() {
        assert!(date_of("TGBT", "TGBT_20250601_06_to_18.json").is_none());
        assert!(date_of("TGBT", "TGBT_20250601_00_to_12.json.bak").is_none());
        assert!(date_of("TGBT", "TGBT_2025061_00_to_12.json").is_none());
        assert!(date_of("TGBT", "Climatisation_20250601_00_to_12.json").is_none());
        assert!(date_of("TGBT", "TGBTX_20250601_00_to_12.json").is_none());
        assert!(date_of("TGBT", "TGBT_20250601_00_to_23_59_59_59.json").is_none());
    }

    #[tokio::test]
    async fn test_list_dates_distinct_and_sorted() {
        let fx = StatsFixture::new().unwrap();
        for name in [
            "TGBT_20250603_00_to_23_59_59.json",
            "TGBT_20250601_00_to_12.json",
            "TGBT_20250601_12_to_23_59.json",
            "TGBT_20250602_00_to_23_59.json",
            "TGBT_20250604_06_to_18.json",
            "TGBT_export.json",
            "notes.txt",
        ] {
            fx.write_readings("TGBT", name, &readings(&[1])).unwrap();
        }
        let cfg = fixture_config(&fx);

        let scanner = CatalogScanner::new(cfg.clone());
        let tgbt = cfg.equipment("tgbt").unwrap();
        let dates = scanner.list_dates(tgbt).await.unwrap();
        let names: Vec<&str> = dates.iter().map(DateKey::as_str).collect();
        assert_eq!(names, vec!["20250601", "20250602", "20250603"]);

        // disque inchangé : même résultat
        assert_eq!(scanner.list_dates(tgbt).await.unwrap(), dates);
    }

    #[tokio::test]
    async fn test_list_dates_empty_folder_and_missing_folder() {
        let fx = StatsFixture::new().unwrap();
        fx.folder("Climatisations").unwrap();
        let cfg = fixture_config(&fx);
        let scanner = CatalogScanner::new(cfg.clone());

        let dates = scanner.list_dates(cfg.equipment("climatisation").unwrap()).await.unwrap();
        assert!(dates.is_empty());

        let err = scanner.list_dates(cfg.equipment("compresseurs").unwrap()).await.unwrap_err();
        assert!(matches!(err, EnergyError::UpstreamIo { .. }));
    }
}
