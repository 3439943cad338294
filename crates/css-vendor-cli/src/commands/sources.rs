use std::path::Path;

use css_vendor::{SourceRegistry, SyncMode};

pub fn run(registry: &SourceRegistry, output_dir: &Path) {
    if registry.is_empty() {
        println!("No sources configured.");
        return;
    }

    for line in describe(registry, output_dir) {
        println!("{line}");
    }
}

/// One line per source: name, target directory and how it syncs.
fn describe(registry: &SourceRegistry, output_dir: &Path) -> Vec<String> {
    registry
        .iter()
        .map(|source| {
            let target = output_dir.join(&source.name);
            let mode = source.mode();
            match mode {
                SyncMode::AutoPull(_) => {
                    format!("{} -> {} ({mode})", source.name, target.display())
                }
                SyncMode::LocalDir(_) | SyncMode::Explicit => format!(
                    "{} -> {} ({mode}, {} files)",
                    source.name,
                    target.display(),
                    source.listed_paths().len()
                ),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use css_vendor::SourceConfig;

    use super::*;

    #[test]
    fn describes_each_mode() {
        let registry: SourceRegistry = [
            SourceConfig::remote("op", "https://unpkg.com/op").with_files(["a.css", "b.css"]),
            SourceConfig::remote("ui", "https://raw").with_auto_pull("o/r/main/src"),
            SourceConfig::local("custom", "styles").with_files(["layout.css"]),
        ]
        .into_iter()
        .collect();

        let lines = describe(&registry, Path::new("css"));

        let op = Path::new("css").join("op");
        assert_eq!(
            lines[0],
            format!("op -> {} (explicit file list, 2 files)", op.display())
        );
        assert!(lines[1].ends_with("(auto-pull from o/r/main/src)"));
        assert!(lines[2].contains("local copy from styles, 1 files"));
    }
}
