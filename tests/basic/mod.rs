mod book_test;
mod db_connection_test;
mod import_test;
mod ledger_test;
mod report_test;
