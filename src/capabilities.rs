//! Discovery of optional companion packages installed alongside the site

use std::path::Path;

use tracing::debug;

/// Packages that together provide image processing for cached files
pub const IMAGE_PROCESSING_PACKAGES: [&str; 3] = [
    "gatsby-image",
    "gatsby-plugin-sharp",
    "gatsby-transformer-sharp",
];

/// What the surrounding site has installed. Evaluated once at startup.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    image_processing: bool,
}

impl Capabilities {
    /// Look for the companion packages in `node_modules` of `program_directory`
    /// or any of its ancestors, the way Node resolves packages.
    pub fn discover(program_directory: &Path) -> Self {
        let missing: Vec<&str> = IMAGE_PROCESSING_PACKAGES
            .iter()
            .copied()
            .filter(|package| !is_installed(program_directory, package))
            .collect();

        if !missing.is_empty() {
            debug!(?missing, "Image processing packages not installed");
        }

        Self {
            image_processing: missing.is_empty(),
        }
    }

    pub fn image_processing(&self) -> bool {
        self.image_processing
    }
}

fn is_installed(program_directory: &Path, package: &str) -> bool {
    program_directory.ancestors().any(|dir| {
        dir.join("node_modules")
            .join(package)
            .join("package.json")
            .is_file()
    })
}
