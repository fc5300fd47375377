pub mod recommendation;
pub mod song;

pub use recommendation::{Lookup, Recommendation, DEFAULT_TOP_N};
pub use song::SongRecord;
