//! Energy Kernel - API de lecture des relevés énergétiques
//!
//! Expose les fichiers de stats journaliers (un dossier par type d'équipement)
//! via une API REST : dates disponibles, historique complet, relevés d'un jour.

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod models;
pub mod stats;

pub use config::{EquipmentType, KernelConfig};
pub use error::{EnergyError, EnergyResult};
pub use stats::StatsService;
