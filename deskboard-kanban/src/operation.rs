//! Command traits
//!
//! Commands are structs whose fields are the parameters. Each one names itself
//! with a verb/noun pair (`move card`) through [`Operation`] and does its work
//! in [`Execute::execute`] against a [`BoardStore`].

use crate::error::Result;
use crate::store::BoardStore;
use crate::types::{BoardId, OperationOutcome};
use async_trait::async_trait;
use serde::Serialize;

/// Metadata every command carries
pub trait Operation {
    fn verb(&self) -> &'static str;

    fn noun(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Canonical op string, e.g. "move card"
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }

    /// Board the command targets, if any
    fn board_id(&self) -> Option<&BoardId> {
        None
    }

    /// Read-only commands are not recorded in the activity log
    fn is_read_only(&self) -> bool {
        false
    }
}

/// Run a command against the board store
#[async_trait]
pub trait Execute: Operation + Serialize + Send + Sync {
    type Output: Serialize + Send;

    async fn execute(&self, store: &BoardStore) -> Result<Self::Output>;

    /// How a successful run is recorded
    fn outcome(&self, _output: &Self::Output) -> OperationOutcome {
        OperationOutcome::Applied
    }
}

/// Implement [`Operation`] for a command struct.
///
/// ```ignore
/// operation!(MoveCard {
///     verb: "move",
///     noun: "card",
///     description: "Move a card to another column",
///     board: board_id,
/// });
/// ```
macro_rules! operation {
    ($ty:ty {
        verb: $verb:literal,
        noun: $noun:literal,
        description: $desc:literal
        $(, board: $board:ident)?
        $(, read_only: $ro:literal)?
        $(,)?
    }) => {
        impl $crate::operation::Operation for $ty {
            fn verb(&self) -> &'static str {
                $verb
            }

            fn noun(&self) -> &'static str {
                $noun
            }

            fn description(&self) -> &'static str {
                $desc
            }

            $(
                fn board_id(&self) -> Option<&$crate::types::BoardId> {
                    Some(&self.$board)
                }
            )?

            $(
                fn is_read_only(&self) -> bool {
                    $ro
                }
            )?
        }
    };
}

pub(crate) use operation;
