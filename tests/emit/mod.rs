mod tests_docs;
mod tests_identifiers;
mod tests_literals;
mod tests_options;
