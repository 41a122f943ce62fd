pub mod badges;
pub mod entry;
pub mod error;
pub mod mastery;
pub mod preprocess;
pub mod progression;
pub mod quiz;
pub mod scheduler;
pub mod strength;
pub mod word_of_day;

pub use error::CoreError;
