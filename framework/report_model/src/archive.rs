use crate::record::{RunCategory, RunRecord};
use crate::store::load_document;
use std::path::Path;

/// All persisted records, partitioned by category.
///
/// Built fresh on every analysis pass. Files are visited in name order, which
/// is timestamp order given the result-file naming scheme, and records keep
/// their in-file order.
#[derive(Debug, Default, Clone)]
pub struct ResultsArchive {
    pub baseline: Vec<RunRecord>,
    pub progressive: Vec<RunRecord>,
    pub endpoint_comparison: Vec<RunRecord>,
}

impl ResultsArchive {
    /// Load every result file under `dir`.
    ///
    /// A missing directory yields an empty archive. Files whose name carries
    /// no recognisable category, and files that fail to parse, are logged and
    /// skipped so one bad file never blocks the rest of the analysis.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let mut archive = Self::default();

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("Results directory {} does not exist", dir.display());
                return Ok(archive);
            }
            Err(e) => return Err(e.into()),
        };

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        for path in paths {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let Some(category) = RunCategory::from_file_name(&name) else {
                log::warn!("Skipping result file with unrecognised category: {name}");
                continue;
            };

            match load_document(&path, category) {
                Ok(records) => archive.partition_mut(category).extend(records),
                Err(e) => {
                    log::warn!("Skipping unreadable result file {name}: {e}");
                }
            }
        }

        Ok(archive)
    }

    fn partition_mut(&mut self, category: RunCategory) -> &mut Vec<RunRecord> {
        match category {
            RunCategory::Baseline => &mut self.baseline,
            RunCategory::Progressive => &mut self.progressive,
            RunCategory::EndpointComparison => &mut self.endpoint_comparison,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.baseline.len() + self.progressive.len() + self.endpoint_comparison.len()
    }

    /// Iterate every record across all categories.
    pub fn all_records(&self) -> impl Iterator<Item = &RunRecord> {
        self.baseline
            .iter()
            .chain(self.progressive.iter())
            .chain(self.endpoint_comparison.iter())
    }
}
