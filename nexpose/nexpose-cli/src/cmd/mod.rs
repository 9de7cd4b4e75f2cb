pub mod login;
pub mod scan;
pub mod site;
