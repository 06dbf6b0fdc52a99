mod common;
mod parsing;
