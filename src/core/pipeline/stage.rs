//! Per-entity run state

use crate::domain::EntityKind;
use crate::log_stage_transition;
use std::fmt;

/// Where one entity is in its run
///
/// Export walks `Pending → TokenAcquired → Fetching(page) → Fetched →
/// Written` once per window; ingest walks `Pending → Fetched → Written`.
/// Any stage may move to `Failed`, which is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityStage {
    Pending,
    TokenAcquired,
    Fetching { page: u32 },
    Fetched,
    Written,
    Failed,
}

impl EntityStage {
    pub fn can_advance_to(&self, next: EntityStage) -> bool {
        use EntityStage::*;

        match (*self, next) {
            (Failed, _) => false,
            (_, Failed) => true,
            (Pending, TokenAcquired | Fetched) => true,
            (TokenAcquired, Fetching { .. }) => true,
            (Fetching { .. }, Fetching { .. } | Fetched) => true,
            (Fetched, Written | Fetching { .. }) => true,
            (Written, Fetching { .. } | Fetched) => true,
            _ => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, EntityStage::Written | EntityStage::Failed)
    }
}

impl fmt::Display for EntityStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityStage::Pending => write!(f, "PENDING"),
            EntityStage::TokenAcquired => write!(f, "TOKEN_ACQUIRED"),
            EntityStage::Fetching { page } => write!(f, "FETCHING({page})"),
            EntityStage::Fetched => write!(f, "FETCHED"),
            EntityStage::Written => write!(f, "WRITTEN"),
            EntityStage::Failed => write!(f, "FAILED"),
        }
    }
}

/// Stage tracker for one entity
#[derive(Debug, Clone)]
pub struct EntityRun {
    entity: EntityKind,
    stage: EntityStage,
}

impl EntityRun {
    pub fn new(entity: EntityKind) -> Self {
        Self {
            entity,
            stage: EntityStage::Pending,
        }
    }

    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    pub fn stage(&self) -> EntityStage {
        self.stage
    }

    /// Moves to `next`, logging the transition
    ///
    /// Transitions not allowed by [`EntityStage::can_advance_to`] are logged
    /// and ignored.
    pub fn advance(&mut self, next: EntityStage) {
        if !self.stage.can_advance_to(next) {
            tracing::warn!(
                entity = %self.entity,
                from = %self.stage,
                to = %next,
                "Ignoring invalid stage transition"
            );
            return;
        }
        log_stage_transition!(self.entity, self.stage, next);
        self.stage = next;
    }

    pub fn fail(&mut self) {
        self.advance(EntityStage::Failed);
    }
}
