use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = storefront::cli::Cli::parse();
    if let Err(e) = storefront::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
