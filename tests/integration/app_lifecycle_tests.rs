/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use std::fs;
use exam_composer::app_config::{Config, OutputFormat};
use exam_composer::app_controller::{Controller, RenderOptions};
use crate::common;

/// Test rendering one file into every output
#[tokio::test]
async fn test_run_withAllFormats_shouldWriteThreeFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "final.json", common::TRANSCRIPTION_JSON)?;
    let output_dir = temp_dir.path().join("out");
    let controller = Controller::new_for_test()?;

    let outcome = controller.run(input, output_dir.clone(), &RenderOptions::default()).await?;

    assert_eq!(outcome.written.len(), 3);
    assert!(output_dir.join("final.layout.json").exists());
    assert!(output_dir.join("final.html").exists());
    let docx = output_dir.join("Applied_Mathematics_Professional.docx");
    assert!(docx.exists());
    assert!(fs::read(&docx)?.starts_with(b"PK"));

    let layout: serde_json::Value = serde_json::from_str(&fs::read_to_string(output_dir.join("final.layout.json"))?)?;
    assert_eq!(layout["sections"].as_array().map(|s| s.len()), Some(2));
    Ok(())
}

/// Test that existing outputs are kept unless forced
#[tokio::test]
async fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "final.json", common::TRANSCRIPTION_JSON)?;
    let output_dir = temp_dir.path().join("out");
    let html_path = common::create_test_file(temp_dir.path(), "placeholder", "")?;
    fs::create_dir_all(&output_dir)?;
    fs::rename(&html_path, output_dir.join("final.html"))?;

    let controller = Controller::new_for_test()?;
    let options = RenderOptions {
        format: OutputFormat::Html,
        ..RenderOptions::default()
    };

    let outcome = controller.run(input.clone(), output_dir.clone(), &options).await?;
    assert!(outcome.written.is_empty());
    assert_eq!(outcome.skipped, vec![output_dir.join("final.html")]);
    assert_eq!(fs::read_to_string(output_dir.join("final.html"))?, "");

    let forced = RenderOptions {
        force_overwrite: true,
        ..options
    };
    let outcome = controller.run(input, output_dir.clone(), &forced).await?;
    assert_eq!(outcome.written.len(), 1);
    assert!(fs::read_to_string(output_dir.join("final.html"))?.contains("Final Term Examination"));
    Ok(())
}

/// Test rendering a folder with one broken document
#[tokio::test]
async fn test_run_folder_withBrokenFile_shouldRenderTheRest() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let input_dir = temp_dir.path().join("papers");
    fs::create_dir_all(&input_dir)?;
    common::create_test_file(&input_dir, "a.json", common::TRANSCRIPTION_JSON)?;
    common::create_test_file(&input_dir, "b.json", "{ not a document")?;
    common::create_test_file(&input_dir, "old.layout.json", "{}")?;

    let mut config = Config::default();
    config.output_dir = temp_dir.path().join("out").to_string_lossy().to_string();
    let controller = Controller::with_config(config)?;
    let options = RenderOptions {
        format: OutputFormat::Screen,
        ..RenderOptions::default()
    };

    let outcomes = controller
        .run_folder(input_dir, temp_dir.path().join("out"), &options)
        .await?;
    assert_eq!(outcomes.len(), 1);
    assert!(temp_dir.path().join("out").join("a.layout.json").exists());
    Ok(())
}

/// Test that documents sharing a subject get separate document files
#[tokio::test]
async fn test_run_folder_withSharedSubject_shouldWriteOneDocxPerInput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input_dir = temp_dir.path().join("papers");
    fs::create_dir_all(&input_dir)?;
    let physics = r#"{"subject": "Physics", "sections": [{"title": "A", "questions": []}]}"#;
    common::create_test_file(&input_dir, "a.json", physics)?;
    common::create_test_file(&input_dir, "b.json", physics)?;

    let output_dir = temp_dir.path().join("out");
    let controller = Controller::new_for_test()?;
    let options = RenderOptions {
        format: OutputFormat::Docx,
        ..RenderOptions::default()
    };

    let outcomes = controller
        .run_folder(input_dir, output_dir.clone(), &options)
        .await?;
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.written.len() == 1 && o.skipped.is_empty()));
    assert!(output_dir.join("a_Physics_Professional.docx").exists());
    assert!(output_dir.join("b_Physics_Professional.docx").exists());
    assert_eq!(fs::read_dir(&output_dir)?.count(), 2);
    Ok(())
}
