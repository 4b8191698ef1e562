pub mod heap_model;

pub use heap_model::HeapModel;
