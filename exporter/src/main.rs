use mongo_exporter::core::ExporterApp;

#[tokio::main]
async fn main() {
    if let Err(e) = ExporterApp::run().await {
        eprintln!("\nError: {}\n", e);
        std::process::exit(ExporterApp::exit_code(&e));
    }
}
