mod form_tests;
mod pdf_tests;
mod record_tests;
mod submit_tests;
mod workflow_tests;
