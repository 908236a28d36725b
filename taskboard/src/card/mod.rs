//! Card commands

mod add;
mod delete;
mod get;
mod list;
mod replace;
mod update;

pub use add::AddCard;
pub use delete::DeleteCard;
pub use get::GetCard;
pub use list::ListCards;
pub use replace::ReplaceCards;
pub use update::UpdateCard;
