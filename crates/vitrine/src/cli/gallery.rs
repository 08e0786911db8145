//! One-shot gallery commands: `list`, `upload`, `show`, `annotate`.

use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};
use vitrine_core::{format, Annotation, Config, Vitrine};

/// Arguments for the `upload` command.
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// JPEG file to upload
    pub file: PathBuf,

    /// Object name in the bucket (defaults to the file name)
    #[arg(long)]
    pub name: Option<String>,

    /// Model to annotate with (overrides the configured provider model)
    #[arg(long)]
    pub model: Option<String>,
}

/// Arguments for the `annotate` command.
#[derive(Args, Debug)]
pub struct AnnotateArgs {
    /// Image file to send to the model
    pub file: PathBuf,

    /// Model to annotate with (overrides the configured provider model)
    #[arg(long)]
    pub model: Option<String>,
}

/// Print every JPEG name in the bucket, one per line.
pub async fn list(config: Config) -> anyhow::Result<()> {
    let vitrine = Vitrine::new(config)?;
    for name in vitrine.gallery().list_images().await? {
        println!("{name}");
    }
    Ok(())
}

/// Upload a local file, annotate it, and print the annotation.
pub async fn upload(config: Config, args: UploadArgs) -> anyhow::Result<()> {
    let name = match args.name {
        Some(name) => name,
        None => file_name(&args.file)?,
    };
    let bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Cannot read {}", args.file.display()))?;

    let vitrine = Vitrine::with_model(config, args.model.as_deref())?;
    let annotation = vitrine.gallery().upload_and_annotate(&name, bytes).await?;
    print_annotation(&annotation)
}

/// Print the stored annotation of an image.
pub async fn show(config: Config, name: &str) -> anyhow::Result<()> {
    let vitrine = Vitrine::new(config)?;
    match vitrine.gallery().annotation(name).await? {
        Some(annotation) => print_annotation(&annotation),
        None => anyhow::bail!("Metadata not found for {name}"),
    }
}

/// Send a local file to the model and print the extracted annotation.
pub async fn annotate(config: Config, args: AnnotateArgs) -> anyhow::Result<()> {
    let file = &args.file;
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Cannot read {}", file.display()))?;
    format::ensure_jpeg(&file_name(file)?, &bytes)?;

    let vitrine = Vitrine::with_model(config, args.model.as_deref())?;
    let annotation = vitrine.gallery().describe(&bytes).await?;
    print_annotation(&annotation)
}

fn file_name(path: &Path) -> anyhow::Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .with_context(|| format!("Cannot derive an object name from {}", path.display()))
}

fn print_annotation(annotation: &Annotation) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(annotation)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_from_path() {
        assert_eq!(file_name(Path::new("/tmp/photos/cat.jpg")).unwrap(), "cat.jpg");
        assert!(file_name(Path::new("/")).is_err());
    }
}
