pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Vault root {path:?} is not readable.")]
	VaultUnreadable { path: std::path::PathBuf, source: std::io::Error },
}
