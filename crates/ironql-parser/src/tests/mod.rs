mod lexer_tests;
mod parser_error_tests;
mod parser_tests;
mod utils;
