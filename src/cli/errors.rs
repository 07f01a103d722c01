use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Initialisation error: {0:?}")]
    InitError(#[source] anyhow::Error),

    #[error("Run error: {0:?}")]
    RunError(#[source] anyhow::Error),
}

pub const fn init_error(error: anyhow::Error) -> CliError { CliError::InitError(error) }

pub const fn run_error(error: anyhow::Error) -> CliError { CliError::RunError(error) }
