use std::path::Path;

use css_vendor::{CssStructure, Feedback, analyze_css_structure, validate_imports};

use super::print_feedback;

/// Validate one stylesheet when given, otherwise analyze the whole tree.
/// Problems are printed; nothing here changes the exit status.
pub fn run(main_css: Option<&Path>, base_dir: &Path, css_dir: &Path) {
    match main_css {
        Some(stylesheet) => match validate_imports(stylesheet, base_dir) {
            Ok(report) => print_feedback(&report.feedback()),
            Err(e) => eprintln!("Error: {e}"),
        },
        None => match analyze_css_structure(css_dir) {
            Ok(structure) => print_feedback(&structure_feedback(&structure)),
            Err(e) => eprintln!("Error: {e}"),
        },
    }
}

fn structure_feedback(structure: &CssStructure) -> Vec<Feedback> {
    let mut lines = vec![
        Feedback::info(format!(
            "Analyzing CSS directory structure in {}...",
            structure.css_dir.display()
        )),
        Feedback::info(format!("Found {} CSS files", structure.file_count())),
        Feedback::info("Directory structure:"),
    ];

    for (group, files) in &structure.groups {
        lines.push(Feedback::info(format!("{group}/")));
        lines.extend(files.iter().map(|f| Feedback::info(format!("  - {f}"))));
    }

    if structure.entry_points.is_empty() {
        lines.push(Feedback::info("No main.css files found."));
        return lines;
    }

    lines.push(Feedback::info("Found main.css files:"));
    for entry in &structure.entry_points {
        let shown = entry
            .stylesheet
            .strip_prefix(&structure.css_dir)
            .unwrap_or(&entry.stylesheet);
        lines.push(Feedback::info(format!("  - {}", shown.display())));
        match &entry.validation {
            Ok(report) => lines.extend(report.feedback()),
            Err(e) => lines.push(Feedback::error(e.to_string())),
        }
    }
    lines
}
