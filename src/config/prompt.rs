//! Interactive question flow for filling in run settings
//!
//! Each question shows its default in brackets; an empty answer (or end of
//! input) accepts it, an invalid answer repeats the question.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::area::ApproximationSelector;

/// Answers gathered from the user
#[derive(Debug, Clone, PartialEq)]
pub struct PromptAnswers {
    pub input: PathBuf,
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
    pub rise: f64,
    pub approximation: ApproximationSelector,
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask all five run settings in order.
    ///
    /// # Arguments
    /// * `files` - Candidate grid files, the first one is the default
    /// * `defaults` - Values offered when the user just presses enter
    pub fn ask_all(
        &mut self,
        files: &[PathBuf],
        defaults: &PromptAnswers,
    ) -> io::Result<PromptAnswers> {
        let input = self.ask_file(files, &defaults.input)?;
        let horizontal_spacing = self.ask_f64(
            "Mean horizontal spacing in km (0 = calculate from the grid)",
            defaults.horizontal_spacing,
        )?;
        let vertical_spacing = self.ask_f64(
            "Mean vertical spacing in km (0 = calculate from the grid)",
            defaults.vertical_spacing,
        )?;
        let rise = self.ask_f64(
            "Sea level rise in m (0 = scan 1-800 m and export a curve)",
            defaults.rise,
        )?;
        let approximation = self.ask_approximation(defaults.approximation)?;

        Ok(PromptAnswers {
            input,
            horizontal_spacing,
            vertical_spacing,
            rise,
            approximation,
        })
    }

    fn ask_file(&mut self, files: &[PathBuf], default: &Path) -> io::Result<PathBuf> {
        if files.is_empty() {
            return self.ask_string("Grid file", default).map(PathBuf::from);
        }

        writeln!(self.output, "Available grid files:")?;
        for (i, file) in files.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, display_name(file))?;
        }

        let default = if default.as_os_str().is_empty() {
            files[0].as_path()
        } else {
            default
        };

        loop {
            let answer = self.ask_raw("Grid file (number or name)", &display_name(default))?;
            let Some(answer) = answer else {
                return Ok(default.to_path_buf());
            };

            if let Ok(n) = answer.parse::<usize>()
                && (1..=files.len()).contains(&n)
            {
                return Ok(files[n - 1].clone());
            }
            if let Some(file) = files
                .iter()
                .find(|f| display_name(f).eq_ignore_ascii_case(&answer))
            {
                return Ok(file.clone());
            }
            writeln!(self.output, "Unknown file: {}", answer)?;
        }
    }

    fn ask_string(&mut self, question: &str, default: &Path) -> io::Result<String> {
        let shown = default.display().to_string();
        Ok(self.ask_raw(question, &shown)?.unwrap_or(shown))
    }

    fn ask_f64(&mut self, question: &str, default: f64) -> io::Result<f64> {
        loop {
            let Some(answer) = self.ask_raw(question, &default.to_string())? else {
                return Ok(default);
            };
            match answer.parse::<f64>() {
                Ok(value) if value.is_finite() => return Ok(value),
                _ => writeln!(self.output, "Not a number: {}", answer)?,
            }
        }
    }

    fn ask_approximation(
        &mut self,
        default: ApproximationSelector,
    ) -> io::Result<ApproximationSelector> {
        let default_name = selector_name(default);
        loop {
            let Some(answer) =
                self.ask_raw("Area approximation (first, second, all)", &default_name)?
            else {
                return Ok(default);
            };
            match ApproximationSelector::from_str(&answer, true) {
                Ok(selector) => return Ok(selector),
                Err(_) => writeln!(self.output, "Choose one of: first, second, all")?,
            }
        }
    }

    /// Print a question and read one trimmed answer; `None` means "use default".
    fn ask_raw(&mut self, question: &str, default: &str) -> io::Result<Option<String>> {
        write!(self.output, "{} [{}]: ", question, default)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let answer = line.trim();
        if answer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(answer.to_string()))
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn selector_name(selector: ApproximationSelector) -> String {
    selector
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}
