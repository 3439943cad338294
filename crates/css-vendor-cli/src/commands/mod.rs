pub mod sources;
pub mod sync;
pub mod validate;

use css_vendor::Feedback;

/// Progress and successes go to stdout, warnings and errors to stderr.
pub fn print_feedback(feedback: &[Feedback]) {
    for item in feedback {
        if item.is_problem() {
            eprintln!("{item}");
        } else {
            println!("{item}");
        }
    }
}
