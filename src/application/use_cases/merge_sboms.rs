use crate::ports::outbound::{ArtifactReader, OutputWriter, ProgressReporter, SbomFormatter};
use crate::sbom_generation::domain::SbomMetadata;
use crate::sbom_generation::policies::{ArtifactNaming, MERGED_SBOM_FILE_NAME};
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// MergeSbomsUseCase - concatenates the components of every SBOM in a directory
///
/// Purely structural: component entries are appended in file-name order
/// and never de-duplicated. Files that are not valid JSON are skipped with
/// a warning.
pub struct MergeSbomsUseCase<'a, A, W, P> {
    reader: &'a A,
    writer: &'a W,
    reporter: &'a P,
    formatter: &'a dyn SbomFormatter,
}

impl<'a, A, W, P> MergeSbomsUseCase<'a, A, W, P>
where
    A: ArtifactReader,
    W: OutputWriter,
    P: ProgressReporter,
{
    pub fn new(reader: &'a A, writer: &'a W, reporter: &'a P, formatter: &'a dyn SbomFormatter) -> Self {
        Self {
            reader,
            writer,
            reporter,
            formatter,
        }
    }

    /// SBOM files in `output_dir` that take part in merging, sorted
    pub fn mergeable_files(&self, output_dir: &Path) -> Result<Vec<PathBuf>> {
        Ok(self
            .reader
            .list_files(output_dir)?
            .into_iter()
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(ArtifactNaming::is_mergeable_sbom)
            })
            .collect())
    }

    /// Writes `merged-bom.json` into `output_dir`
    ///
    /// # Returns
    /// The merged file, or `None` when fewer than two SBOMs were found
    pub fn execute(&self, output_dir: &Path) -> Result<Option<PathBuf>> {
        let files = self.mergeable_files(output_dir)?;
        if files.len() < 2 {
            self.reporter.report(&format!(
                "Found {} SBOM file(s), nothing to merge",
                files.len()
            ));
            return Ok(None);
        }

        self.reporter
            .report(&format!("🔗 Merging {} SBOM files", files.len()));

        let mut components = Vec::new();
        for file in &files {
            match self.components_of(file) {
                Ok(found) => {
                    tracing::debug!(file = %file.display(), components = found.len(), "Merging SBOM");
                    components.extend(found);
                }
                Err(e) => {
                    tracing::warn!(file = %file.display(), error = %e, "Skipping SBOM");
                    self.reporter.report_error(&format!(
                        "⚠️  Skipping unreadable SBOM {}: {}",
                        file.display(),
                        e
                    ));
                }
            }
        }

        let merged_path = output_dir.join(MERGED_SBOM_FILE_NAME);
        let total = components.len();
        let content = self
            .formatter
            .format_merged(components, &SbomMetadata::for_this_tool())?;
        self.writer.write(&merged_path, &content)?;

        self.reporter.report_completion(&format!(
            "Merged SBOM with {} component(s) written to {}",
            total,
            merged_path.display()
        ));
        Ok(Some(merged_path))
    }

    /// `components` of one SBOM; a document without components contributes none
    fn components_of(&self, file: &Path) -> Result<Vec<serde_json::Value>> {
        let content = self.reader.read_artifact(file)?;
        let document: serde_json::Value = serde_json::from_str(&content)?;
        Ok(document
            .get("components")
            .and_then(|c| c.as_array())
            .cloned()
            .unwrap_or_default())
    }
}
