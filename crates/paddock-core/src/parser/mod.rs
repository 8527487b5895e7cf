pub mod classify;
pub mod dispatch;
pub mod families;
pub mod tokenizer;

pub use classify::{Classification, Classifier};
pub use dispatch::Dispatcher;
pub use families::FamilyParser;
pub use tokenizer::{Delimiter, ReleaseTokens, Tokenizer};
