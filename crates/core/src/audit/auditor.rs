use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum entries retained in the global audit log.
pub const AUDIT_LOG_CAPACITY: usize = 10_000;

/// Maximum entries retained per entity.
pub const ENTITY_HISTORY_CAPACITY: usize = 100;

/// Kind of value being recorded.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalculationKind {
    Composite,
    Environmental,
    Social,
    Governance,
    Coverage,
}

impl CalculationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationKind::Composite => "COMPOSITE",
            CalculationKind::Environmental => "ENVIRONMENTAL",
            CalculationKind::Social => "SOCIAL",
            CalculationKind::Governance => "GOVERNANCE",
            CalculationKind::Coverage => "COVERAGE",
        }
    }
}

/// Fire-and-forget sink for computed values.
///
/// Implementations must not fail the caller; recording is best effort.
pub trait CalculationRecorder: Send + Sync {
    fn record_calculation(&self, entity_id: &str, kind: CalculationKind, value: f64);

    fn record_portfolio_calculation(
        &self,
        portfolio_id: &str,
        kind: CalculationKind,
        value: f64,
        holding_count: usize,
    );
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub entity_id: String,
    pub calculation_type: String,
    pub result: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl AuditEntry {
    fn new(entity_id: &str, calculation_type: String, result: f64) -> Self {
        Self {
            entity_id: entity_id.to_string(),
            calculation_type,
            result,
            timestamp: Utc::now(),
            metadata: HashMap::new(),
        }
    }
}

/// Latest values and a bounded trail of recordings for one entity.
#[derive(Debug, Clone, Default)]
pub struct CalculationHistory {
    latest: HashMap<String, f64>,
    entries: VecDeque<AuditEntry>,
}

impl CalculationHistory {
    fn push(&mut self, entry: AuditEntry) {
        self.latest
            .insert(entry.calculation_type.clone(), entry.result);
        self.entries.push_back(entry);
        while self.entries.len() > ENTITY_HISTORY_CAPACITY {
            self.entries.pop_front();
        }
    }

    pub fn latest(&self, kind: CalculationKind) -> Option<f64> {
        self.latest.get(kind.as_str()).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// In-memory recorder keeping a bounded global log and per-entity history.
#[derive(Debug, Default)]
pub struct CalculationAuditor {
    log: Mutex<VecDeque<AuditEntry>>,
    history: Mutex<HashMap<String, CalculationHistory>>,
}

impl CalculationAuditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_size(&self) -> usize {
        self.log.lock().map(|log| log.len()).unwrap_or(0)
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.log
            .lock()
            .map(|log| log.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn history(&self, entity_id: &str) -> Option<CalculationHistory> {
        self.history
            .lock()
            .ok()
            .and_then(|history| history.get(entity_id).cloned())
    }

    fn append(&self, entry: AuditEntry) {
        if let Ok(mut log) = self.log.lock() {
            log.push_back(entry);
            while log.len() > AUDIT_LOG_CAPACITY {
                log.pop_front();
            }
        }
    }
}

impl CalculationRecorder for CalculationAuditor {
    fn record_calculation(&self, entity_id: &str, kind: CalculationKind, value: f64) {
        trace!("audit {} {} = {}", entity_id, kind.as_str(), value);
        let entry = AuditEntry::new(entity_id, kind.as_str().to_string(), value);
        if let Ok(mut history) = self.history.lock() {
            history
                .entry(entity_id.to_string())
                .or_default()
                .push(entry.clone());
        }
        self.append(entry);
    }

    fn record_portfolio_calculation(
        &self,
        portfolio_id: &str,
        kind: CalculationKind,
        value: f64,
        holding_count: usize,
    ) {
        trace!(
            "audit portfolio {} {} = {} ({} holdings)",
            portfolio_id,
            kind.as_str(),
            value,
            holding_count
        );
        let mut entry = AuditEntry::new(portfolio_id, format!("PORTFOLIO_{}", kind.as_str()), value);
        entry
            .metadata
            .insert("holdingCount".to_string(), Value::from(holding_count));
        self.append(entry);
    }
}
