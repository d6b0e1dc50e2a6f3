pub mod mortgage_reader;
