pub mod dedup;
pub mod messages;
pub mod notifier;
pub mod observers;

pub use dedup::{DedupCache, DedupKey};
pub use notifier::{Notifier, NotifierObserver};
pub use observers::{MatchObserver, ObserverRegistry};
