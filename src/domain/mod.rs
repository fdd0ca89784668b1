pub mod catalog;
pub mod chat;
pub mod state;

pub use catalog::{ContentType, Exam, LearningItem};
pub use chat::{ChatMessage, Sender};
pub use state::{AppState, Mode, Page, Student};
