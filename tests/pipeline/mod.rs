mod tests_coclass;
mod tests_declarations;
mod tests_end_to_end;
mod tests_enums;
mod tests_marshaling;
mod tests_recovery;
