pub mod classifier;
pub mod extractor;
pub mod reference_table;
pub mod research;
pub mod statement;
pub mod tools;

pub use classifier::Classifier;
pub use research::{LegalResearchService, PrecedentSource};
pub use tools::{ToolDescriptor, ToolError, ToolName};
