//! The rozklady.mpk.krakow.pl collaborator: HTTP fetching and HTML cell
//! extraction. Everything downstream of here works on plain extracted cells.

pub mod mpk_client;
pub mod page_parser;
