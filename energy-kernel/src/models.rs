use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

/// Date `YYYYMMDD` telle qu'elle apparaît dans les noms de fichiers.
/// Pas de validation calendaire : seulement 8 chiffres ASCII.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    pub fn parse(raw: &str) -> Option<Self> {
        (raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit())).then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fenêtre horaire couverte par un fichier de stats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// 00_to_12
    Morning,
    /// 12_to_23_59
    Afternoon,
    /// 00_to_23_59_59
    FullDay,
    /// 00_to_23_59 (ancien export)
    FullDayShort,
}

impl Window {
    pub const ALL: [Window; 4] = [Window::Morning, Window::Afternoon, Window::FullDay, Window::FullDayShort];

    /// Ordre de priorité des fichiers journée complète
    pub const FULL_DAY_PRIORITY: [Window; 2] = [Window::FullDay, Window::FullDayShort];

    pub fn token(self) -> &'static str {
        match self {
            Window::Morning => "00_to_12",
            Window::Afternoon => "12_to_23_59",
            Window::FullDay => "00_to_23_59_59",
            Window::FullDayShort => "00_to_23_59",
        }
    }

    /// `<prefix>_<date>_<token>.json`
    pub fn file_name(self, prefix: &str, date: &DateKey) -> String {
        format!("{prefix}_{date}_{}.json", self.token())
    }
}

/// Un relevé brut ; seul `ts` est interprété, le reste est renvoyé tel quel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reading(Value);

impl Reading {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn ts(&self) -> Option<f64> {
        self.0.get("ts").and_then(Value::as_f64)
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Tri par `ts` croissant ; les relevés sans `ts` numérique passent en tête.
pub fn cmp_by_ts(a: &Reading, b: &Reading) -> Ordering {
    match (a.ts(), b.ts()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
