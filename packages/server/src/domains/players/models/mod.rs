pub mod player;

pub use player::{Player, Role, SkillLevel};
