//! Terminal output and result files

mod printer;
pub mod report;
pub mod results;

pub use printer::{
    print_failure, print_header, print_info, print_key_value, print_success, print_warning,
};
pub use report::render_run;
pub use results::write_results;
