use std::path::PathBuf;
use std::time::Duration;

use crate::{
    model::context::{
        test_support::{member, sample_context},
        MessageSnapshot,
    },
    service::template::{
        environment::build_environment, parser::parse_segment, render, select_variant,
        shell::ShellRunner, split_segments, substitute_identity, TemplateExpander,
    },
};

mod expand;

fn expander() -> TemplateExpander {
    TemplateExpander::new(ShellRunner::new(Duration::from_secs(5)))
}

/// A file that exists for as long as the tests run.
fn existing_file() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml")
}
