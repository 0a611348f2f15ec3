//! Error type shared by the collaborators and the event loop.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The Docker Engine API returned an error or was unreachable.
    #[error(transparent)]
    Docker(#[from] bollard::errors::Error),

    /// A `docker compose` invocation could not be spawned.
    #[error("failed to run docker compose: {0}")]
    ComposeSpawn(#[source] std::io::Error),

    /// A `docker compose` invocation exited unsuccessfully.
    #[error("docker compose {command} failed for project '{project}': {stderr}")]
    Compose {
        command: &'static str,
        project: String,
        stderr: String,
    },

    /// Terminal or filesystem I/O.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn compose_error_names_project_and_command() {
        let err = Error::Compose {
            command: "down",
            project: "web".into(),
            stderr: "no such project".into(),
        };
        assert_eq!(
            err.to_string(),
            "docker compose down failed for project 'web': no such project"
        );
    }
}
