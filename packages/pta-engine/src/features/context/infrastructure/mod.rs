pub mod selector;

pub use selector::{ContextSelector, Receiver};
