use clap::Parser;
use tokio::net::TcpListener;

mod annotations;
mod app_context;
mod auth;
mod cli;
mod health;
mod http;
mod logging;
mod map_view;
mod shell;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    logging::init();
    let app_context = app_context::init(&args);
    let router = http::router::new(&args, app_context);

    let listener = TcpListener::bind(args.listen_address)
        .await
        .unwrap_or_else(|err| panic!("Failed to listen on {}: {err}", args.listen_address));
    tracing::info!(listen_address = %args.listen_address, "Serving the annotation map.");
    axum::serve(listener, router)
        .await
        .expect("The HTTP server stopped unexpectedly.");
}
