//! Derived stepper progress. Computed, never stored.

use serde::Serialize;

/// The four displayed lifecycle stages, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Develop,
    Deploy,
    Test,
    Publish,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Develop, Stage::Deploy, Stage::Test, Stage::Publish];

    /// Zero-based display position.
    pub fn position(self) -> u8 {
        match self {
            Stage::Develop => 0,
            Stage::Deploy => 1,
            Stage::Test => 2,
            Stage::Publish => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Develop => "Develop",
            Stage::Deploy => "Deploy",
            Stage::Test => "Test",
            Stage::Publish => "Publish",
        }
    }
}

/// Active step as produced by the resolver.
///
/// The raw indices are 0, 1, 3 and 4: index 2 is never produced, so while an
/// API is deployed but unpublished the highlight sits on the Publish position
/// and Test is drawn as completed. `Published` (4) is past the last position,
/// i.e. every stage is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveStep {
    Develop,
    Deploy,
    Test,
    Published,
}

impl ActiveStep {
    pub fn index(self) -> u8 {
        match self {
            ActiveStep::Develop => 0,
            ActiveStep::Deploy => 1,
            ActiveStep::Test => 3,
            ActiveStep::Published => 4,
        }
    }

    pub fn stage(self) -> Stage {
        match self {
            ActiveStep::Develop => Stage::Develop,
            ActiveStep::Deploy => Stage::Deploy,
            ActiveStep::Test => Stage::Test,
            ActiveStep::Published => Stage::Publish,
        }
    }
}

/// How a stage is drawn relative to the active index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMarker {
    Completed,
    Active,
    Upcoming,
}

/// Resolver output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedProgress {
    pub active_step: ActiveStep,
    pub develop_complete: bool,
    pub endpoint_complete: bool,
    pub deploy_complete: bool,
    pub publish_complete: bool,
}

impl DerivedProgress {
    pub fn active_step_index(&self) -> u8 {
        self.active_step.index()
    }

    /// Stages before the active index are completed, the one at it is active.
    pub fn marker(&self, stage: Stage) -> StepMarker {
        let active = self.active_step_index();
        let position = stage.position();
        if position < active {
            StepMarker::Completed
        } else if position == active {
            StepMarker::Active
        } else {
            StepMarker::Upcoming
        }
    }
}
