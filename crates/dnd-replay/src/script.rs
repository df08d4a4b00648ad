use std::fs;
use std::path::{Path, PathBuf};

use dnd_tree::error::LoadError;
use dnd_tree::gesture::PointerKind;
use dnd_tree::hit_test::Bounds;
use dnd_tree::tree::NodeId;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Tree(#[from] LoadError),
    #[error("failed to read script {path}: {source}")]
    ReadScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script json: {0}")]
    Script(#[source] serde_json::Error),
    #[error("event {index} goes back in time ({at_ms} ms after {previous_ms} ms)")]
    OutOfOrder {
        index: usize,
        at_ms: u64,
        previous_ms: u64,
    },
    #[error("failed to encode report: {0}")]
    Report(#[source] serde_json::Error),
}

impl From<ReplayError> for std::io::Error {
    fn from(err: ReplayError) -> Self {
        match err {
            ReplayError::Tree(err) => err.into(),
            ReplayError::ReadScript { source, .. } => source,
            other => std::io::Error::new(std::io::ErrorKind::InvalidData, other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Down,
    Move,
    Up,
}

impl From<StepKind> for PointerKind {
    fn from(kind: StepKind) -> Self {
        match kind {
            StepKind::Down => PointerKind::Down,
            StepKind::Move => PointerKind::Move,
            StepKind::Up => PointerKind::Up,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub kind: StepKind,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub at_ms: u64,
}

/// Fixed on-screen geometry for a node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Element {
    pub id: NodeId,
    #[serde(flatten)]
    pub bounds: Bounds,
}

/// Pointer script. Without `elements` the tree is laid out as rows and
/// re-laid out after every step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub elements: Option<Vec<Element>>,
    pub events: Vec<Step>,
}

impl Script {
    pub fn parse(json: &str) -> Result<Self, ReplayError> {
        let script: Self = serde_json::from_str(json).map_err(ReplayError::Script)?;
        script.check_order()?;
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let json = fs::read_to_string(path).map_err(|source| ReplayError::ReadScript {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&json)
    }

    fn check_order(&self) -> Result<(), ReplayError> {
        let mut previous_ms = 0;
        for (index, step) in self.events.iter().enumerate() {
            if step.at_ms < previous_ms {
                return Err(ReplayError::OutOfOrder {
                    index,
                    at_ms: step.at_ms,
                    previous_ms,
                });
            }
            previous_ms = step.at_ms;
        }
        Ok(())
    }
}
