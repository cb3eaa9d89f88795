mod check;
mod cli;
mod infra;
mod routes;
mod server;

use billing_gate::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
