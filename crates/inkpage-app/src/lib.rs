//! InkPage App Library
//!
//! Headless export of saved drawings: loads a document file and writes one
//! PNG per page using the tiny-skia renderer.

use inkpage_core::{Document, Theme};
use inkpage_render::{ExportBundle, RenderOptions, RendererError, export_file_name};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid arguments: {0}")]
    Usage(String),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid drawing file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Render(#[from] RendererError),
}

pub const USAGE: &str = "inkpage-export <drawing.json> [out_dir] [--page N] [--scale F] \
                         [--theme light|dark] [--grid|--no-grid]";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArgs {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    /// Export only this page (1-based). All pages when `None`.
    pub page: Option<usize>,
    pub scale: f64,
    /// Overrides the document's saved theme.
    pub theme: Option<Theme>,
    /// Overrides the document's saved grid toggle.
    pub show_grid: Option<bool>,
}

impl ExportArgs {
    /// Parse arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut positional = Vec::new();
        let mut page = None;
        let mut scale = 1.0;
        let mut theme = None;
        let mut show_grid = None;

        let mut args = args.into_iter().map(Into::<String>::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--page" => {
                    let n = value(&mut args, "--page")?
                        .parse::<usize>()
                        .ok()
                        .filter(|n| *n >= 1)
                        .ok_or_else(|| {
                            AppError::Usage("--page expects a number >= 1".into())
                        })?;
                    page = Some(n);
                }
                "--scale" => {
                    scale = value(&mut args, "--scale")?
                        .parse::<f64>()
                        .ok()
                        .filter(|s| s.is_finite() && *s > 0.0)
                        .ok_or_else(|| {
                            AppError::Usage("--scale expects a positive number".into())
                        })?;
                }
                "--theme" => {
                    theme = Some(match value(&mut args, "--theme")?.as_str() {
                        "light" => Theme::Light,
                        "dark" => Theme::Dark,
                        other => {
                            return Err(AppError::Usage(format!("unknown theme '{}'", other)));
                        }
                    });
                }
                "--grid" => show_grid = Some(true),
                "--no-grid" => show_grid = Some(false),
                flag if flag.starts_with("--") => {
                    return Err(AppError::Usage(format!("unknown option '{}'", flag)));
                }
                _ => positional.push(PathBuf::from(&arg)),
            }
        }

        let mut positional = positional.into_iter();
        let input = positional
            .next()
            .ok_or_else(|| AppError::Usage("missing input file".into()))?;
        let out_dir = positional.next().unwrap_or_else(|| PathBuf::from("."));
        if positional.next().is_some() {
            return Err(AppError::Usage("too many arguments".into()));
        }

        Ok(Self {
            input,
            out_dir,
            page,
            scale,
            theme,
            show_grid,
        })
    }

    /// Render options from the document's preferences plus command line overrides.
    pub fn render_options(&self, document: &Document) -> RenderOptions {
        let mut options = RenderOptions::from_preferences(&document.preferences);
        if let Some(theme) = self.theme {
            options = options.with_theme(theme);
        }
        if let Some(show_grid) = self.show_grid {
            options = options.with_grid(show_grid);
        }
        options
    }
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, AppError> {
    args.next()
        .ok_or_else(|| AppError::Usage(format!("{} expects a value", flag)))
}

/// Read a saved drawing.
pub fn load_document(path: &Path) -> Result<Document, AppError> {
    let json = fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Document::from_json(&json)?)
}

/// Export the requested pages and return the written file paths.
pub fn run(args: &ExportArgs, date: &str) -> Result<Vec<PathBuf>, AppError> {
    let document = load_document(&args.input)?;
    log::info!(
        "Loaded \"{}\" with {} page(s) from {}",
        document.title(),
        document.page_count(),
        args.input.display()
    );

    if let Some(n) = args.page {
        if n > document.page_count() {
            return Err(AppError::Usage(format!(
                "page {} out of range (document has {})",
                n,
                document.page_count()
            )));
        }
    }

    fs::create_dir_all(&args.out_dir).map_err(|source| AppError::Io {
        path: args.out_dir.clone(),
        source,
    })?;

    let options = args.render_options(&document);
    let bundle = ExportBundle::build(&document, &options, args.scale)?;

    let mut written = Vec::new();
    for (i, page) in bundle.pages.iter().enumerate() {
        let number = i + 1;
        if args.page.is_some_and(|n| n != number) {
            continue;
        }
        let path = args.out_dir.join(export_file_name(&bundle.title, number, date));
        let png = page.image.to_png()?;
        fs::write(&path, png).map_err(|source| AppError::Io {
            path: path.clone(),
            source,
        })?;
        log::info!("Wrote {} ({})", path.display(), page.annotation);
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_defaults() {
        let args = ExportArgs::parse(["drawing.json"]).unwrap();
        assert_eq!(args.input, PathBuf::from("drawing.json"));
        assert_eq!(args.out_dir, PathBuf::from("."));
        assert_eq!(args.page, None);
        assert_eq!(args.scale, 1.0);
        assert_eq!(args.theme, None);
    }

    #[test]
    fn test_parse_options() {
        let args = ExportArgs::parse([
            "drawing.json",
            "out",
            "--page",
            "2",
            "--scale",
            "2",
            "--theme",
            "dark",
            "--no-grid",
        ])
        .unwrap();
        assert_eq!(args.out_dir, PathBuf::from("out"));
        assert_eq!(args.page, Some(2));
        assert_eq!(args.scale, 2.0);
        assert_eq!(args.theme, Some(Theme::Dark));
        assert_eq!(args.show_grid, Some(false));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(ExportArgs::parse(Vec::<String>::new()), Err(AppError::Usage(_))));
        assert!(ExportArgs::parse(["a.json", "--page", "0"]).is_err());
        assert!(ExportArgs::parse(["a.json", "--scale"]).is_err());
        assert!(ExportArgs::parse(["a.json", "--theme", "sepia"]).is_err());
        assert!(ExportArgs::parse(["a.json", "--bogus"]).is_err());
        assert!(ExportArgs::parse(["a.json", "out", "extra"]).is_err());
    }

    #[test]
    fn test_overrides_apply_on_top_of_preferences() {
        let mut doc = Document::new();
        doc.preferences.show_grid = true;
        let args = ExportArgs::parse(["a.json", "--theme", "dark"]).unwrap();
        let options = args.render_options(&doc);
        assert_eq!(options.theme, Theme::Dark);
        assert!(options.show_grid);
    }

    #[test]
    fn test_run_writes_every_page() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("drawing.json");
        let mut doc = Document::new();
        doc.set_title("Field Notes");
        doc.add_page();
        fs::write(&input, doc.to_json().unwrap()).unwrap();

        let out_dir = dir.path().join("out");
        let args = ExportArgs::parse([
            input.to_string_lossy().into_owned(),
            out_dir.to_string_lossy().into_owned(),
        ])
        .unwrap();
        let written = run(&args, "2024-05-01").unwrap();

        assert_eq!(
            written,
            vec![
                out_dir.join("field_notes-page-1-2024-05-01.png"),
                out_dir.join("field_notes-page-2-2024-05-01.png"),
            ]
        );
        assert!(written.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_run_single_page_out_of_range() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("drawing.json");
        fs::write(&input, Document::new().to_json().unwrap()).unwrap();

        let args = ExportArgs {
            input,
            out_dir: dir.path().to_path_buf(),
            page: Some(3),
            scale: 1.0,
            theme: None,
            show_grid: None,
        };
        assert!(matches!(run(&args, "2024-05-01"), Err(AppError::Usage(_))));
    }

    #[test]
    fn test_run_rejects_invalid_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("broken.json");
        fs::write(&input, "not json").unwrap();

        let args = ExportArgs::parse([input.to_string_lossy().into_owned()]).unwrap();
        assert!(matches!(run(&args, "2024-05-01"), Err(AppError::Parse(_))));
    }
}
