/// Command line options for configuring a search.
pub mod cli_args;
