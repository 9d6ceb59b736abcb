#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Layout(#[from] notegraph_layout::Error),
    #[error(transparent)]
    Core(#[from] notegraph_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
