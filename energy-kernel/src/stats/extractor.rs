use super::locator::StatsFile;
use crate::error::{EnergyError, EnergyResult};
use crate::models::Reading;
use serde_json::Value;

/// Chemin JSON du tableau de relevés dans un fichier de stats
pub const READINGS_POINTER: &str = "/data/AccumulatedActiveEnergyDelivered";

/// Extrait les relevés d'un fichier.
/// Champ absent ou qui n'est pas un tableau : aucun relevé, pas d'erreur.
/// Contenu non JSON : `EnergyError::Parse`, à l'appelant de décider.
pub fn extract(file: &StatsFile) -> EnergyResult<Vec<Reading>> {
    let mut json: Value = serde_json::from_slice(&file.contents).map_err(|source| EnergyError::Parse {
        file: file.path.clone(),
        source,
    })?;

    let readings = match json.pointer_mut(READINGS_POINTER).map(Value::take) {
        Some(Value::Array(items)) => items.into_iter().map(Reading::new).collect(),
        _ => Vec::new(),
    };
    Ok(readings)
}
