mod utils;

mod value_tests;
