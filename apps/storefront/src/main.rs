//! Binary entry point for the storefront shell.

#[tokio::main]
async fn main() {
    if let Err(err) = storefront::run().await {
        eprintln!("fatal: {err}");
        std::process::exit(1);
    }
}
