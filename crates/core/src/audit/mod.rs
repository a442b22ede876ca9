//! Audit module - recorders for computed scores.

mod auditor;

pub use auditor::{
    AuditEntry, CalculationAuditor, CalculationHistory, CalculationKind, CalculationRecorder,
    AUDIT_LOG_CAPACITY, ENTITY_HISTORY_CAPACITY,
};
