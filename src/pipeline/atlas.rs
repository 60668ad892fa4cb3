//! Locating the UNC neonatal atlas

use crate::command::archive;
use crate::io::configuration::{UNC_ATLAS_ARCHIVE, UNC_ATLAS_DIR};
use crate::io::error::{Result, SegError};
use crate::pipeline::context::Context;
use std::path::{Path, PathBuf};

/// Templates and tissue priors of the UNC 2020 neonatal atlas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeonateAtlas {
    /// Whole-head template
    pub template: PathBuf,
    /// Skull-stripped template, cerebellum included
    pub template_brain: PathBuf,
    /// Grey matter prior
    pub gm: PathBuf,
    /// White matter prior
    pub wm: PathBuf,
    /// Cerebrospinal fluid prior
    pub csf: PathBuf,
}

impl NeonateAtlas {
    /// Expected atlas layout under `atlas_dir`
    pub fn in_dir(atlas_dir: &Path) -> Self {
        let templates = templates_dir(atlas_dir);
        let template = |name: &str| templates.join(format!("infant-neo-{name}.nii.gz"));
        Self {
            template: template("withSkull"),
            template_brain: template("withCerebellum"),
            gm: template("seg-gm"),
            wm: template("seg-wm"),
            csf: template("seg-csf"),
        }
    }

    /// Whether every atlas image is present
    pub fn exists(&self) -> bool {
        [
            &self.template,
            &self.template_brain,
            &self.gm,
            &self.wm,
            &self.csf,
        ]
        .iter()
        .all(|path| path.is_file())
    }
}

fn templates_dir(atlas_dir: &Path) -> PathBuf {
    atlas_dir.join(UNC_ATLAS_DIR).join("atlas").join("templates")
}

/// Find the atlas, extracting its archive once if needed
///
/// # Errors
///
/// Returns an error if the archive cannot be extracted or the atlas is still
/// incomplete afterwards
pub fn locate_unc_atlas(atlas_dir: &Path, ctx: &mut Context<'_>) -> Result<NeonateAtlas> {
    let atlas = NeonateAtlas::in_dir(atlas_dir);
    if atlas.exists() {
        return Ok(atlas);
    }

    let archive_path = atlas_dir.join(UNC_ATLAS_ARCHIVE);
    if !archive_path.is_file() {
        return Err(SegError::AtlasNotFound {
            path: templates_dir(atlas_dir),
        });
    }

    tracing::info!("Extracting neonatal atlas from {}", archive_path.display());
    let executor = ctx.executor();
    archive::extract(&archive_path, atlas_dir, executor, ctx.log_file())?;

    if atlas.exists() {
        Ok(atlas)
    } else {
        Err(SegError::AtlasNotFound {
            path: templates_dir(atlas_dir),
        })
    }
}
