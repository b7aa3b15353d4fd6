pub mod api_client;
pub mod api_client_tests;
pub mod cli;
pub mod pubchem_api;
pub mod response_parser;
pub mod session_store;
pub mod stout_api;
