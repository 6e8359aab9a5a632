pub mod changes;
pub mod ranker;
pub mod similarity;
pub mod windows;

pub use changes::*;
pub use ranker::*;
pub use similarity::*;
pub use windows::*;
