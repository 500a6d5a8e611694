// Endpoint operations
//
// One module per remote capability. Every operation follows the same
// shape: validate the request locally, dispatch with its fixed path and
// method, decode the body typed per operation. No request reaches the
// dispatcher without passing validation.

pub mod content;
pub mod download;
pub mod export;
pub mod function;
pub mod introspect;
pub mod options;
pub mod pdf;
pub mod performance;
pub mod scrape;
pub mod screenshot;
pub mod session;
pub mod unblock;

pub use content::ContentRequest;
pub use download::DownloadRequest;
pub use export::{ExportFormat, ExportRequest, ExportResult};
pub use function::{FunctionRequest, FunctionResult};
pub use introspect::Health;
pub use options::{
    Cookie, HttpCredentials, ResourceBlocking, SameSite, Viewport, WaitEvent, WaitOptions,
};
pub use pdf::{PaperFormat, PdfMargins, PdfRequest, PdfRequestBuilder};
pub use performance::{PerformanceConfig, PerformanceRequest};
pub use scrape::{ScrapeRequest, ScrapeResult, ScrapeTarget, ScrapedElement, ScrapedSelector};
pub use screenshot::{ImageFormat, ScreenshotClip, ScreenshotRequest, ScreenshotRequestBuilder};
pub use session::{CreateSessionRequest, Session, SessionStatus};
pub use unblock::{UnblockRequest, UnblockResult};
