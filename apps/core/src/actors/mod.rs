pub mod coach;
pub mod messages;

pub use coach::CoachHandle;
