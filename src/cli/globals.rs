use std::path::PathBuf;

/// Arguments shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub base_url: String,
    pub data_dir: PathBuf,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(base_url: String, data_dir: PathBuf) -> Self {
        Self { base_url, data_dir }
    }
}
