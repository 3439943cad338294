use css_vendor::{SyncSummary, Vendor, sync_header};

use super::print_feedback;

/// Sync every source, or only `names` when given, printing each source's
/// progress as soon as it finishes.
pub async fn run(vendor: &Vendor, names: &[String]) -> SyncSummary {
    let names: Vec<String> = if names.is_empty() {
        vendor.registry().names().map(str::to_owned).collect()
    } else {
        names.to_vec()
    };

    let mut summary = SyncSummary::default();
    for name in &names {
        print_feedback(&[sync_header(name)]);
        let report = vendor.sync_source(name).await;
        print_feedback(&report.feedback);
        summary.sources.push(report);
    }

    print_feedback(&[summary.completion()]);
    println!("Results by source: {}", format_counts(&summary));

    summary
}

fn format_counts(summary: &SyncSummary) -> String {
    let counts: Vec<String> = summary
        .counts()
        .into_iter()
        .map(|(name, count)| format!("{name}: {count}"))
        .collect();
    format!("{{{}}}", counts.join(", "))
}
