pub mod completion;
pub mod insight;
