// Probe the socket endpoint and print the connection URL a driver would use
//
// Shows: broker URL building, the reachability probe, launch options

use browsergrid::{
    BrowserFlavor, Client, ClientConfig, ConnectMode, LaunchOptions, Region, build_connection_url,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ClientConfig::builder()
        .token(std::env::var("BROWSERGRID_TOKEN")?)
        .region(Region::Eu)
        .build()?;
    let client = Client::new(config);

    let launch = LaunchOptions {
        headless: Some(true),
        stealth: Some(true),
        args: Some(vec!["--disable-gpu".into()]),
        ..Default::default()
    };

    let url = build_connection_url(
        &client.config(),
        ConnectMode::Playwright,
        BrowserFlavor::Firefox,
        &launch,
    )?;
    println!("A playwright driver would attach to: {url}");

    let reachable = client.test_connection(ConnectMode::Puppeteer, None).await;
    println!("Socket endpoint reachable: {reachable}");

    Ok(())
}
