/*!
 * Tests for the application controller
 */

use anyhow::Result;
use exam_composer::app_config::{Config, OutputFormat};
use exam_composer::app_controller::{Controller, RenderOptions};
use exam_composer::document::HeaderTemplate;
use exam_composer::language_utils::Language;
use crate::common;

/// Test controller creation with the default configuration
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert_eq!(controller.config().default_language, "EN");
    Ok(())
}

/// Test that an invalid configuration is rejected
#[test]
fn test_controller_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.default_language = "xx".to_string();
    assert!(Controller::with_config(config).is_err());
}

/// Test that configured defaults apply to documents without tags
#[test]
fn test_load_document_withoutTags_shouldUseConfiguredDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "paper.json", common::TRANSCRIPTION_JSON)?;

    let mut config = Config::default();
    config.default_language = "ar".to_string();
    config.default_header_template = HeaderTemplate::Boxed;
    let controller = Controller::with_config(config)?;

    let document = controller.load_document(&input, &RenderOptions::default())?;
    assert_eq!(document.language, Language::Arabic);
    assert_eq!(document.header_template, HeaderTemplate::Boxed);
    Ok(())
}

/// Test that options override the document
#[test]
fn test_load_document_withOverrides_shouldApplyThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "paper.json", common::TRANSCRIPTION_JSON)?;
    let controller = Controller::new_for_test()?;

    let options = RenderOptions {
        format: OutputFormat::All,
        language: Some(Language::Urdu),
        template: Some(HeaderTemplate::Academic),
        force_overwrite: false,
    };
    let document = controller.load_document(&input, &options)?;
    assert_eq!(document.language, Language::Urdu);
    assert_eq!(document.header_template, HeaderTemplate::Academic);
    Ok(())
}

/// Test that a missing input file is an error
#[test]
fn test_run_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::new_for_test()?;
    let result = tokio_test::block_on(controller.run(
        temp_dir.path().join("missing.json"),
        temp_dir.path().to_path_buf(),
        &RenderOptions::default(),
    ));
    assert!(result.is_err());
    Ok(())
}
