//! Card commands

mod add;
mod delete;
mod get;
mod mv;
mod update;

pub use add::AddCard;
pub use delete::DeleteCard;
pub use get::{CardLocation, GetCard};
pub use mv::{apply_move, MoveCard, MoveOutcome};
pub use update::UpdateCard;
