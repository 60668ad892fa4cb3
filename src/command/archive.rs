//! Archive extraction through the usual command-line tools

use crate::command::builder::Command;
use crate::command::executor::Executor;
use crate::io::error::{Result, SegError, file_system};
use crate::io::logging::LogFile;
use std::path::Path;

/// Archive formats recognised by file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// `.tar.bz2`, `.tbz2`
    TarBzip2,
    /// `.tar.gz`, `.tgz`
    TarGzip,
    /// `.bz2`
    Bzip2,
    /// `.rar`
    Rar,
    /// `.gz`
    Gzip,
    /// `.tar`
    Tar,
    /// `.zip`
    Zip,
    /// `.7z`
    SevenZip,
}

// Compound suffixes come before their single-suffix counterparts
const SUFFIXES: [(&str, ArchiveKind); 10] = [
    (".tar.bz2", ArchiveKind::TarBzip2),
    (".tbz2", ArchiveKind::TarBzip2),
    (".tar.gz", ArchiveKind::TarGzip),
    (".tgz", ArchiveKind::TarGzip),
    (".bz2", ArchiveKind::Bzip2),
    (".rar", ArchiveKind::Rar),
    (".gz", ArchiveKind::Gzip),
    (".tar", ArchiveKind::Tar),
    (".zip", ArchiveKind::Zip),
    (".7z", ArchiveKind::SevenZip),
];

impl ArchiveKind {
    /// Identify the archive format from the file name
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is not recognised
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();

        SUFFIXES
            .iter()
            .find(|(suffix, _)| name.ends_with(suffix))
            .map(|&(_, kind)| kind)
            .ok_or_else(|| SegError::UnsupportedArchive {
                path: path.to_path_buf(),
            })
    }

    /// Command that unpacks this kind of archive
    pub fn command(self, archive: &Path) -> Command {
        let cmd = match self {
            Self::TarBzip2 => Command::new("tar").arg("-xvjf"),
            Self::TarGzip => Command::new("tar").arg("-xvzf"),
            Self::Tar => Command::new("tar").arg("-xvf"),
            Self::Bzip2 => Command::new("bunzip2"),
            Self::Gzip => Command::new("gunzip"),
            Self::Rar => Command::new("unrar").arg("x"),
            Self::Zip => Command::new("unzip"),
            Self::SevenZip => Command::new("7z").arg("x"),
        };
        cmd.arg(archive)
    }
}

/// Extract an archive into a destination directory
///
/// The extractor runs inside `destination`, so the archive path is made
/// absolute first. Single-file compressors (`gunzip`, `bunzip2`) decompress
/// next to the archive regardless of the destination.
///
/// # Errors
///
/// Returns an error if the format is unknown, the extraction program is
/// missing, or extraction fails
pub fn extract(
    archive: &Path,
    destination: &Path,
    executor: &dyn Executor,
    log: &mut LogFile,
) -> Result<()> {
    let kind = ArchiveKind::from_path(archive)?;
    let archive =
        std::path::absolute(archive).map_err(file_system(archive, "resolve absolute path"))?;
    let cmd = kind.command(&archive).current_dir(destination);

    if !executor.is_available(cmd.program()) {
        return Err(SegError::DependencyMissing {
            program: cmd.program().to_string(),
        });
    }

    log.log(&format!(
        "Extracting {} into {}",
        archive.display(),
        destination.display()
    ))?;
    executor.execute(&cmd, log)
}
