use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriterError {
    #[error("Failed to write within the requested location")]
    IOError(#[source] std::io::Error),
}
