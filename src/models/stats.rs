//! Derived statistics models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a game is credited when several players share the top score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TiePolicy {
    /// The first top-scoring player in row order takes the win.
    #[default]
    FirstByRow,
    /// Each of `k` tied players receives `1/k` of a win.
    SplitCredit,
    /// Nobody is credited for a tied game.
    Exclude,
}

impl fmt::Display for TiePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiePolicy::FirstByRow => write!(f, "first-by-row"),
            TiePolicy::SplitCredit => write!(f, "split-credit"),
            TiePolicy::Exclude => write!(f, "exclude"),
        }
    }
}

impl FromStr for TiePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-by-row" | "first" => Ok(TiePolicy::FirstByRow),
            "split-credit" | "split" => Ok(TiePolicy::SplitCredit),
            "exclude" => Ok(TiePolicy::Exclude),
            other => Err(format!(
                "unknown tie policy '{}' (expected first-by-row, split-credit or exclude)",
                other
            )),
        }
    }
}

/// A numeric statistic value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Float(f64),
}

impl StatValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            StatValue::Int(v) => *v as f64,
            StatValue::Float(v) => *v,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Int(v) => write!(f, "{}", v),
            // Whole floats keep one decimal so they read as averages, e.g. "1.0"
            StatValue::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            StatValue::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for StatValue {
    fn from(v: i64) -> Self {
        StatValue::Int(v)
    }
}

impl From<f64> for StatValue {
    fn from(v: f64) -> Self {
        StatValue::Float(v)
    }
}

/// One `(player, value)` row of a statistics table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub player: String,
    pub value: StatValue,
}

impl TableRow {
    pub fn new(player: impl Into<String>, value: impl Into<StatValue>) -> Self {
        Self {
            player: player.into(),
            value: value.into(),
        }
    }
}

/// Shape of a computed statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Statistic {
    Scalar(StatValue),
    List(Vec<String>),
    NamedList(Vec<(String, u64)>),
    Table(Vec<TableRow>),
}

impl Statistic {
    /// Table rows, if this statistic is a table.
    pub fn as_table(&self) -> Option<&[TableRow]> {
        match self {
            Statistic::Table(rows) => Some(rows),
            _ => None,
        }
    }

    /// Look up a player's value in a table statistic.
    pub fn value_for(&self, player: &str) -> Option<StatValue> {
        self.as_table()?
            .iter()
            .find(|row| row.player == player)
            .map(|row| row.value)
    }
}

/// A named statistic in report order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedStatistic {
    pub name: String,
    pub statistic: Statistic,
}

/// The full ordered statistics set of one evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsReport {
    /// When these stats were computed
    pub computed_at: DateTime<Utc>,

    /// Tie policy used for "Games won"
    pub tie_policy: TiePolicy,

    pub statistics: Vec<NamedStatistic>,
}

impl StatsReport {
    pub fn new(tie_policy: TiePolicy, statistics: Vec<NamedStatistic>) -> Self {
        Self {
            computed_at: Utc::now(),
            tie_policy,
            statistics,
        }
    }

    /// Get a statistic by name.
    pub fn get(&self, name: &str) -> Option<&Statistic> {
        self.statistics
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.statistic)
    }

    pub fn names(&self) -> Vec<&str> {
        self.statistics.iter().map(|s| s.name.as_str()).collect()
    }
}
