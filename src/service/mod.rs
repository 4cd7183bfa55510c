pub mod analysis;
pub mod competitor;
pub mod content;
pub mod issues;
pub mod llm;
pub mod scoring;
pub mod screenshot;
pub mod suggestion;
pub mod template;

pub use analysis::AnalysisService;
pub use competitor::CompetitorService;
pub use content::ContentScanner;
pub use llm::LlmClient;
pub use screenshot::ScreenshotCapturer;
pub use suggestion::SuggestionService;
pub use template::TemplateService;
