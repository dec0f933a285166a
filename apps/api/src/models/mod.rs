pub mod analysis;
pub mod lenient;
pub mod roadmap;

pub use analysis::AnalysisResult;
pub use roadmap::RoadmapResult;
