use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::{Config, OutputFormat};
use crate::document::{parse_document_with, ExamDocument, HeaderTemplate};
use crate::file_utils::FileManager;
use crate::language_utils::Language;
use crate::render::{export_docx, render_screen, to_html};

// @module: Application controller for rendering exam documents

// Suffix of the layout tree output; such files are skipped as inputs
const LAYOUT_SUFFIX: &str = "layout.json";

/// How the `.docx` output of an input is named
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocxNaming {
    /// `<subject>_Professional.docx`
    Subject,
    /// `<input stem>_<subject>_Professional.docx`; folder runs use this so
    /// inputs sharing a subject do not collide
    InputStem,
}

/// Per-run overrides of the configuration
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Forces the document language, overriding the document's own tag
    pub language: Option<Language>,
    /// Forces the header template
    pub template: Option<HeaderTemplate>,
    pub force_overwrite: bool,
}

/// Files written for one input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOutcome {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Main application controller for rendering exam papers
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read a document from disk, applying configured defaults and overrides
    pub fn load_document(&self, input_file: &Path, options: &RenderOptions) -> Result<ExamDocument> {
        let json = FileManager::read_to_string(input_file)?;
        let mut document = parse_document_with(
            &json,
            self.config.language(),
            self.config.default_header_template,
        )
        .with_context(|| format!("Failed to load document: {:?}", input_file))?;

        if let Some(language) = options.language {
            document.language = language;
        }
        if let Some(template) = options.template {
            document.set_header_template(template);
        }
        Ok(document)
    }

    /// Render one input file into `output_dir`
    pub async fn run(&self, input_file: PathBuf, output_dir: PathBuf, options: &RenderOptions) -> Result<RenderOutcome> {
        self.run_input(input_file, output_dir, options, DocxNaming::Subject).await
    }

    async fn run_input(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        options: &RenderOptions,
        naming: DocxNaming,
    ) -> Result<RenderOutcome> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }
        FileManager::ensure_dir(&output_dir)?;

        let document = self.load_document(&input_file, options)?;
        let outcome = self
            .render_outputs(&document, &input_file, &output_dir, options, naming)
            .await?;

        info!(
            "Rendered {:?}: {} file(s) written, {} skipped in {:.2?}",
            input_file.file_name().unwrap_or_default(),
            outcome.written.len(),
            outcome.skipped.len(),
            start_time.elapsed()
        );
        Ok(outcome)
    }

    /// Render every document JSON file under `input_dir`.
    ///
    /// A file that fails is logged and does not stop the others.
    pub async fn run_folder(&self, input_dir: PathBuf, output_dir: PathBuf, options: &RenderOptions) -> Result<Vec<RenderOutcome>> {
        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let inputs: Vec<PathBuf> = FileManager::find_files(&input_dir, "json")?
            .into_iter()
            .filter(|path| !path.to_string_lossy().ends_with(LAYOUT_SUFFIX))
            .collect();
        if inputs.is_empty() {
            warn!("No document files found in {:?}", input_dir);
            return Ok(Vec::new());
        }

        info!("Found {} document file(s) in {:?}", inputs.len(), input_dir);
        let mut outcomes = Vec::with_capacity(inputs.len());
        for input in inputs {
            match self
                .run_input(input.clone(), output_dir.clone(), options, DocxNaming::InputStem)
                .await
            {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => error!("Failed to render {:?}: {:#}", input, e),
            }
        }
        Ok(outcomes)
    }

    /// Write the requested outputs of an already loaded document
    pub async fn render_document(
        &self,
        document: &ExamDocument,
        input_file: &Path,
        output_dir: &Path,
        options: &RenderOptions,
    ) -> Result<RenderOutcome> {
        self.render_outputs(document, input_file, output_dir, options, DocxNaming::Subject)
            .await
    }

    async fn render_outputs(
        &self,
        document: &ExamDocument,
        input_file: &Path,
        output_dir: &Path,
        options: &RenderOptions,
        naming: DocxNaming,
    ) -> Result<RenderOutcome> {
        let mut outcome = RenderOutcome::default();
        let format = options.format;

        if format.includes_screen() || format.includes_html() {
            let layout = render_screen(document);

            if format.includes_screen() {
                let path = FileManager::generate_output_path(input_file, output_dir, LAYOUT_SUFFIX);
                if self.should_write(&path, options, &mut outcome) {
                    FileManager::write_to_file(&path, &serde_json::to_string_pretty(&layout)?)?;
                    outcome.written.push(path);
                }
            }

            if format.includes_html() {
                let path = FileManager::generate_output_path(input_file, output_dir, "html");
                if self.should_write(&path, options, &mut outcome) {
                    FileManager::write_to_file(&path, &to_html(&layout))?;
                    outcome.written.push(path);
                }
            }
        }

        if format.includes_docx() {
            let export = export_docx(document, &self.config.docx).await?;
            let path = docx_path(input_file, output_dir, &export.file_name, naming);
            if self.should_write(&path, options, &mut outcome) {
                FileManager::write_bytes(&path, &export.bytes)?;
                outcome.written.push(path);
            }
        }

        Ok(outcome)
    }

    fn should_write(&self, path: &Path, options: &RenderOptions, outcome: &mut RenderOutcome) -> bool {
        if FileManager::file_exists(path) && !options.force_overwrite {
            warn!("Skipping {:?}, file already exists (use -f to force overwrite)", path);
            outcome.skipped.push(path.to_path_buf());
            return false;
        }
        debug!("Writing {:?}", path);
        true
    }
}

fn docx_path(input_file: &Path, output_dir: &Path, file_name: &str, naming: DocxNaming) -> PathBuf {
    match naming {
        DocxNaming::Subject => output_dir.join(file_name),
        DocxNaming::InputStem => {
            let stem = input_file.file_stem().unwrap_or_default().to_string_lossy();
            output_dir.join(format!("{}_{}", stem, file_name))
        }
    }
}
