use anyhow::Context;

use crate::{table::Table, tabula_wrapper};

/// Single threaded implementation of [tabula_wrapper::TableDetector] that
/// runs Tabula in an attached JVM.
///
/// Must be created and run on the thread that attached the [tabula::TabulaEnv].
pub struct SingleThreadedTabulaDetector<'env> {
    tabula_env: tabula::TabulaEnv<'env>,
}

impl<'env> SingleThreadedTabulaDetector<'env> {
    /// Creates a [SingleThreadedTabulaDetector] with the given [tabula::TabulaEnv].
    pub fn new(tabula_env: tabula::TabulaEnv<'env>) -> Self {
        Self { tabula_env }
    }
}

impl<'env> tabula_wrapper::TableDetector for SingleThreadedTabulaDetector<'env> {
    fn detect_tables(
        &self,
        request: &tabula_wrapper::DetectionRequest,
    ) -> anyhow::Result<Vec<Table>> {
        let pages = request.pages.pages();

        let tabula = self
            .tabula_env
            .configure_tabula(
                None,
                Some(pages.as_slice()),
                tabula::OutputFormat::Json,
                false,
                request.method.to_tabula_extraction_method(),
                false,
                request.password.as_deref(),
            )
            .context("configuring Tabula to detect tables")?;

        let extracted_file = tempfile::NamedTempFile::new()
            .context("creating temporary file for extracting PDF table data")?;
        tabula
            .parse_document_into(&request.pdf_path, extracted_file.path())
            .with_context(|| format!("extracting tables from pages {}", request.pages))?;

        let table_set: tabula_wrapper::JsonTableSet =
            serde_json::from_reader(extracted_file).context("parsing extracted PDF table data")?;

        log::info!(
            "Detected {} tables in {:?} pages {}.",
            table_set.0.len(),
            request.pdf_path,
            request.pages,
        );

        Ok(table_set.0.into_iter().map(Table::from).collect())
    }
}
