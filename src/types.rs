use std::fmt;

/// A container confirmed to exist in the runtime, together with the compose
/// file(s) it was started from.
///
/// Only [`ContainerResolver`](crate::resolve::ContainerResolver) creates
/// these. The compose file value comes from the runtime's own metadata and is
/// kept verbatim, so it may hold several comma-separated paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerIdentity {
    pub name: String,
    pub compose_file: String,
}

impl ContainerIdentity {
    /// Individual compose files listed in the config-files label.
    pub fn compose_files(&self) -> impl Iterator<Item = &str> {
        self.compose_file
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Lifecycle operation a trigger asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Fetch the newest image, then recreate the container.
    Pull,
    /// Rebuild the image from its compose build context and recreate.
    Rebuild,
}

impl Operation {
    /// Status token echoed back in the acknowledgement.
    pub fn status_token(self) -> &'static str {
        match self {
            Operation::Pull => "pulling",
            Operation::Rebuild => "building",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Pull => f.write_str("pull"),
            Operation::Rebuild => f.write_str("rebuild"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_files_splits_multi_file_label() {
        let id = ContainerIdentity {
            name: "web".into(),
            compose_file: "/srv/app/compose.yml, /srv/app/compose.prod.yml".into(),
        };
        let files: Vec<_> = id.compose_files().collect();
        assert_eq!(files, vec!["/srv/app/compose.yml", "/srv/app/compose.prod.yml"]);
    }
}
