/// Connect four with configurable board size and line length.
pub mod connect_four;
