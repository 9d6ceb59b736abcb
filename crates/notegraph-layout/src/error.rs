#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("edge {edge} references a missing node (note={note}, entity={entity}, nodes={nodes})")]
    MissingEndpoint {
        edge: usize,
        note: usize,
        entity: usize,
        nodes: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
