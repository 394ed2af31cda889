/*!
# Energy DevKit - Fixtures pour tests du kernel

Bibliothèque facilitant l'écriture de tests contre une vraie arborescence de stats:
- Répertoire racine temporaire (supprimé en fin de test)
- Écriture de fichiers `<prefix>_<date>_<suffix>.json` au format attendu
- Fichiers bruts (JSON invalide, champs manquants) pour les cas d'erreur
*/

pub mod fixture;

pub use fixture::{StatsFixture, reading, readings};
