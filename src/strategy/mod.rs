pub mod explain;
pub mod optimization;
