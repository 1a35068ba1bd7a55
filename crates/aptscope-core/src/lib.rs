mod output;
mod package;
mod specfile;

pub use output::parse_new_packages;
pub use package::PackageName;
pub use specfile::{read_spec_file, strip_comment};

#[cfg(test)]
mod tests;
