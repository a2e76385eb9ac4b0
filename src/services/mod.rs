pub mod debug_log;
pub mod language_model;
pub mod reporter;
pub mod version_control;

pub use debug_log::DebugLog;
pub use language_model::LanguageModelService;
pub use reporter::Reporter;
pub use version_control::VersionControlService;
