pub mod assessment;
pub mod case;
pub mod config;
pub mod statement;
pub mod tools;

pub use assessment::{EvidenceFlag, IndicatorCategory, SeverityAssessment, Verdict};
pub use case::CaseCandidate;
pub use config::{ClassifierConfig, Config, FetchConfig, PrecedentSourceConfig};
pub use statement::StatementRequest;
