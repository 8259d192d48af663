#[tokio::main]
async fn main() {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    if let Err(err) = storefront_widgets::run().await {
        eprintln!("{}", err.to_json());
        std::process::exit(err.code);
    }
}
