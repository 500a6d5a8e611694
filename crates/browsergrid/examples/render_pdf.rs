// Render a page to PDF and save it locally
//
// Shows: client configuration, a validated request, branching on error kinds

use browsergrid::api::{PaperFormat, PdfRequest};
use browsergrid::{Client, ClientConfig, ErrorKind, Region};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ClientConfig::builder()
        .token(std::env::var("BROWSERGRID_TOKEN")?)
        .region(Region::Us)
        .build()?;
    let client = Client::new(config);

    let request = PdfRequest::builder()
        .url("https://example.com")
        .format(PaperFormat::A4)
        .print_background(true)
        .build();

    match client.render_pdf(request).await {
        Ok(document) => {
            std::fs::write("example.pdf", &document)?;
            println!("Wrote example.pdf ({} bytes)", document.len());
        }
        Err(e) => match e.kind() {
            ErrorKind::Authentication => eprintln!("Token rejected: {e}"),
            ErrorKind::RateLimit => eprintln!("Throttled, try again later: {e}"),
            ErrorKind::Validation => eprintln!("Bad request: {e}"),
            _ => eprintln!("Render failed: {e}"),
        },
    }

    Ok(())
}
