//! Report session
//!
//! Bundles settings, the loader and the load cache so a caller can react to
//! each change of the filter controls with `load` + `report`, passing every
//! input explicitly.

use std::path::Path;
use std::sync::Arc;

use crate::config::Settings;
use crate::error::{EmpenhoError, EmpenhoResult};
use crate::models::{CommitmentRecord, FilterCriteria};
use crate::reports::{render, EmpenhoReport, ReportOptions};

use super::cache::{LoadCache, SourceKey};
use super::loader::RecordLoader;

pub struct Session {
    settings: Settings,
    loader: RecordLoader,
    cache: LoadCache,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            loader: RecordLoader::from_settings(&settings),
            settings,
            cache: LoadCache::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn cache(&self) -> &LoadCache {
        &self.cache
    }

    /// Load a file, reusing the cached parse while its content is unchanged
    pub fn load_path(&mut self, path: &Path) -> EmpenhoResult<Arc<[CommitmentRecord]>> {
        let bytes = std::fs::read(path).map_err(|e| {
            EmpenhoError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        self.load_bytes(&path.display().to_string(), &bytes)
    }

    /// Load uploaded content under a caller-chosen name
    pub fn load_bytes(
        &mut self,
        name: &str,
        bytes: &[u8],
    ) -> EmpenhoResult<Arc<[CommitmentRecord]>> {
        let key = SourceKey::new(name, bytes);
        let loader = &self.loader;
        self.cache.get_or_load(&key, || loader.load_bytes(bytes))
    }

    /// Render a report with the session's ranking size
    pub fn report(
        &self,
        records: &[CommitmentRecord],
        criteria: &FilterCriteria,
    ) -> EmpenhoReport {
        render(
            records,
            criteria,
            ReportOptions {
                top_n: self.settings.top_n,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CSV: &str = "Id Empenho,Data Emissão,Categoria de Despesa,Favorecido,Órgão,Valor do Empenho Convertido pra R$\n\
                       NE1,2024-01-01,Cat,Fav,Org,10\n";

    #[test]
    fn test_repeated_load_hits_cache() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();

        let mut session = Session::new(Settings::default());
        let first = session.load_path(file.path()).unwrap();
        let second = session.load_path(file.path()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(session.cache().stats(), (1, 1));
    }

    #[test]
    fn test_changed_file_reloads() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();

        let mut session = Session::new(Settings::default());
        let first = session.load_path(file.path()).unwrap();

        file.write_all(b"NE2,2024-01-02,Cat,Fav,Org,20\n").unwrap();
        let second = session.load_path(file.path()).unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert_eq!(session.cache().len(), 1);
    }

    #[test]
    fn test_report_uses_settings_top_n() {
        let mut settings = Settings::default();
        settings.top_n = 1;
        let mut session = Session::new(settings);

        let csv = format!("{CSV}NE2,2024-01-02,Cat,Other,Org2,20\n");
        let records = session.load_bytes("upload.csv", csv.as_bytes()).unwrap();
        let report = session.report(&records, &FilterCriteria::full(&records));

        assert_eq!(report.top_beneficiaries.len(), 1);
        assert_eq!(report.top_beneficiaries[0].key, "Other");
    }
}
