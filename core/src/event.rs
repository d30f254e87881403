//! Events emitted by the transition function.
//!
//! An empty event list means the input was a no-op and nothing
//! needs to be rendered.

use crate::{state::DataPoint, types::Tick};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    Started {
        tick: Tick,
    },
    Paused {
        tick: Tick,
    },
    PointAppended {
        point: DataPoint,
    },
    /// The horizon was reached and the run stopped by itself.
    Completed {
        tick: Tick,
    },
    Reset {
        previous_tick: Tick,
    },
}

impl SimEvent {
    /// Stable name of the variant, for logs.
    pub fn type_name(&self) -> &'static str {
        match self {
            SimEvent::Started { .. }       => "started",
            SimEvent::Paused { .. }        => "paused",
            SimEvent::PointAppended { .. } => "point_appended",
            SimEvent::Completed { .. }     => "completed",
            SimEvent::Reset { .. }         => "reset",
        }
    }
}
